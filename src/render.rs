use rayon::prelude::*;

use crate::currents::CurrentField;
use crate::grid::{Grid, stitch};

// Depth palette: shallow water is light, the thalweg is dark.
const BANK: [u8; 4] = [210, 200, 160, 255];
const WATER_SHALLOW: [u8; 4] = [52, 100, 145, 255];
const WATER_MID: [u8; 4] = [32, 55, 92, 255];
const WATER_DEEP: [u8; 4] = [18, 36, 70, 255];

// Speed palette.
const STILL: [u8; 4] = [20, 20, 30, 255];
const SLOW: [u8; 4] = [40, 120, 160, 255];
const FAST: [u8; 4] = [245, 240, 200, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

fn colorize(g: &Grid<f64>, color: impl Fn(f32) -> [u8; 4] + Sync) -> Vec<u8> {
    let w = g.w;
    let mut rgba = vec![0u8; w * g.h * 4];
    if w == 0 {
        return rgba;
    }
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let c = color(g.get(x, y) as f32);
            row[x * 4..x * 4 + 4].copy_from_slice(&c);
        }
    });
    rgba
}

/// Straightened depth map: segments side by side, one pixel per grid point.
/// Returns `(rgba, width, height)`, or None when segment row counts differ.
pub fn render_depth(depth: &[Grid<f64>], max_depth: f64) -> Option<(Vec<u8>, usize, usize)> {
    let merged = stitch(depth)?;
    let max = max_depth.max(f64::EPSILON) as f32;
    let rgba = colorize(&merged, |d| {
        let t = d / max;
        if t < 0.1 {
            lerp_color(BANK, WATER_SHALLOW, t / 0.1)
        } else if t < 0.6 {
            lerp_color(WATER_SHALLOW, WATER_MID, (t - 0.1) / 0.5)
        } else {
            lerp_color(WATER_MID, WATER_DEEP, (t - 0.6) / 0.4)
        }
    });
    Some((rgba, merged.w, merged.h))
}

/// Current speed laid out like [`render_depth`].
pub fn render_speed(currents: &[CurrentField], max_velocity: f64) -> Option<(Vec<u8>, usize, usize)> {
    let speeds: Vec<Grid<f64>> = currents
        .iter()
        .map(|c| {
            let mut g = c.x.clone();
            for (s, &cy) in g.data.iter_mut().zip(&c.y.data) {
                *s = s.hypot(cy);
            }
            g
        })
        .collect();
    let merged = stitch(&speeds)?;
    let max = max_velocity.max(f64::EPSILON) as f32;
    let rgba = colorize(&merged, |v| {
        let t = v / max;
        if t < 0.5 {
            lerp_color(STILL, SLOW, t / 0.5)
        } else {
            lerp_color(SLOW, FAST, (t - 0.5) / 0.5)
        }
    });
    Some((rgba, merged.w, merged.h))
}
