pub mod assemble;
pub mod config;
pub mod currents;
pub mod depth;
pub mod error;
pub mod export;
pub mod grid;
pub mod mesh;
pub mod path;
pub mod render;
pub mod rng;

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use assemble::Assembled;
use config::Params;
use currents::CurrentField;
use depth::FieldShape;
use grid::Grid;
use mesh::SegmentGrid;
use path::PathSegment;

pub use error::{Error, Result};

pub struct River {
    pub segments: Vec<PathSegment>,
    pub grids: Vec<SegmentGrid>,
    pub depth: Vec<Grid<f64>>,
    pub currents: Vec<CurrentField>,
}

impl River {
    pub fn point_count(&self) -> usize {
        self.grids.iter().map(SegmentGrid::point_count).sum()
    }

    pub fn assemble(&self) -> Result<Assembled> {
        assemble::assemble(&self.grids, &self.depth, &self.currents)
    }
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn push_timing(timings: &mut Vec<Timing>, name: &'static str, t: Instant) {
    let ms = t.elapsed().as_secs_f64() * 1000.0;
    debug!(stage = name, ms, "stage done");
    timings.push(Timing { name, ms });
}

/// Global longitudinal index of each segment's first column.
fn first_rows(grids: &[SegmentGrid]) -> Vec<usize> {
    grids
        .iter()
        .scan(0, |acc, g| {
            let first = *acc;
            *acc += g.longitudinal();
            Some(first)
        })
        .collect()
}

pub fn generate(seed: u64, params: &Params) -> Result<(River, Vec<Timing>)> {
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Centerline
    let t = Instant::now();
    let segments = path::generate_path(params, &mut rng::stream(seed, rng::SALT_PATH, 0));
    push_timing(&mut timings, "path", t);

    // 2. Lateral grids
    let t = Instant::now();
    let grids = mesh::build_grids(&segments, params);
    push_timing(&mut timings, "grid", t);

    // 3. Depth and currents only read grid shape and headings, so they run
    // side by side with one stream per segment.
    let t = Instant::now();
    let offsets = first_rows(&grids);
    let (depth, currents) = rayon::join(
        || {
            grids
                .par_iter()
                .zip(&offsets)
                .enumerate()
                .map(|(k, (g, &first_row))| {
                    let shape = FieldShape {
                        lateral: g.lateral(),
                        longitudinal: g.longitudinal(),
                        first_row,
                    };
                    let mut rng = rng::stream(seed, rng::SALT_DEPTH, k as u64);
                    depth::depth_field(shape, params.depth_variance, params, &mut rng)
                })
                .collect::<Result<Vec<_>>>()
        },
        || {
            grids
                .par_iter()
                .zip(&offsets)
                .enumerate()
                .map(|(k, (g, &first_row))| {
                    let mut rng = rng::stream(seed, rng::SALT_CURRENT, k as u64);
                    currents::current_field(&g.headings, g.lateral(), first_row, params, &mut rng)
                })
                .collect::<Vec<_>>()
        },
    );
    let depth = depth?;
    push_timing(&mut timings, "fields", t);

    let river = River {
        segments,
        grids,
        depth,
        currents,
    };

    push_timing(&mut timings, "TOTAL", total_start);
    info!(
        segments = river.segments.len(),
        points = river.point_count(),
        "river generated"
    );

    Ok((river, timings))
}
