use crate::currents::CurrentField;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::mesh::SegmentGrid;

/// Flat per-point output. `coords[k]` and `metrics[k]` describe the same
/// point; metric columns are `0, cy, cx, depth, 0, 0, |c|`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assembled {
    pub coords: Vec<[f64; 2]>,
    pub metrics: Vec<[f64; 7]>,
}

impl Assembled {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

#[inline]
pub fn metric_row(depth: f64, cx: f64, cy: f64) -> [f64; 7] {
    [0.0, cy, cx, depth, 0.0, 0.0, cx.hypot(cy)]
}

fn check(segment: usize, arrays: &[(&'static str, &Grid<f64>)]) -> Result<()> {
    let (left, reference) = arrays[0];
    for &(right, grid) in &arrays[1..] {
        if grid.shape() != reference.shape() {
            return Err(Error::ShapeMismatch {
                segment,
                left,
                right,
                left_shape: reference.shape(),
                right_shape: grid.shape(),
            });
        }
    }
    Ok(())
}

/// Flatten segment-major, then row-major within each segment. Every array
/// of a segment must share one shape.
pub fn assemble(
    grids: &[SegmentGrid],
    depth: &[Grid<f64>],
    currents: &[CurrentField],
) -> Result<Assembled> {
    if grids.len() != depth.len() || grids.len() != currents.len() {
        return Err(Error::SegmentCount {
            grids: grids.len(),
            depth: depth.len(),
            currents: currents.len(),
        });
    }

    for (k, ((g, d), c)) in grids.iter().zip(depth).zip(currents).enumerate() {
        check(
            k,
            &[
                ("x", &g.x),
                ("y", &g.y),
                ("depth", d),
                ("current_x", &c.x),
                ("current_y", &c.y),
            ],
        )?;
    }

    let total: usize = grids.iter().map(SegmentGrid::point_count).sum();
    let mut out = Assembled {
        coords: Vec::with_capacity(total),
        metrics: Vec::with_capacity(total),
    };
    for ((g, d), c) in grids.iter().zip(depth).zip(currents) {
        out.coords
            .extend(g.x.data.iter().zip(&g.y.data).map(|(&x, &y)| [x, y]));
        out.metrics.extend(
            d.data
                .iter()
                .zip(&c.x.data)
                .zip(&c.y.data)
                .map(|((&z, &cx), &cy)| metric_row(z, cx, cy)),
        );
    }

    Ok(out)
}
