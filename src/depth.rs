use rand::Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::config::Params;
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Dimensions of a field to synthesize. `first_row` is the global
/// longitudinal index of column 0 so profiles continue across segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldShape {
    pub lateral: usize,
    pub longitudinal: usize,
    pub first_row: usize,
}

/// Evenly spaced samples over `[lo, hi]`, endpoints included.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![(lo + hi) / 2.0],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|j| lo + j as f64 * step).collect()
        }
    }
}

/// Width multiplier of the bell at global row `i`, always in [0.3, 1.7].
#[inline]
pub fn bell_shape(i: usize) -> f64 {
    1.0 + 0.7 * (0.5 * i as f64).to_radians().sin()
}

/// Mean lateral shift of the deepest point at global row `i`.
#[inline]
pub fn meander(i: usize, amplitude: f64) -> f64 {
    amplitude * (i as f64).to_radians().sin()
}

/// Per-row shift of the deepest point. With `variance == 0` no randomness
/// is drawn and the channel follows the plain sinusoid.
pub fn row_centers<R: Rng + ?Sized>(
    shape: FieldShape,
    variance: f64,
    params: &Params,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !variance.is_finite() || variance < 0.0 {
        return Err(Error::config(format!("depth variance must be >= 0, got {variance}")));
    }
    let rows = shape.first_row..shape.first_row + shape.longitudinal;
    if variance == 0.0 {
        return Ok(rows.map(|i| meander(i, params.meander_amplitude)).collect());
    }
    rows.map(|i| -> Result<f64> {
        let normal = Normal::new(meander(i, params.meander_amplitude), variance)
            .map_err(|e| Error::config(format!("depth variance: {e}")))?;
        Ok(normal.sample(rng))
    })
    .collect()
}

/// Quartic bell `max_depth * exp(-k * shape * (x + center)^4)`.
#[inline]
fn bell(x: f64, shape: f64, center: f64, params: &Params) -> f64 {
    params.max_depth * (-params.depth_steepness * shape * (x + center).powi(4)).exp()
}

/// Depth map with one row per lateral sample and one column per
/// longitudinal sample.
pub fn depth_field<R: Rng + ?Sized>(
    shape: FieldShape,
    variance: f64,
    params: &Params,
    rng: &mut R,
) -> Result<Grid<f64>> {
    let centers = row_centers(shape, variance, params, rng)?;
    let shapes: Vec<f64> = (0..shape.longitudinal)
        .map(|i| bell_shape(shape.first_row + i))
        .collect();
    let xs = linspace(-params.depth_span, params.depth_span, shape.lateral);

    let w = shape.longitudinal;
    let mut depth = Grid::new(w, shape.lateral);
    depth.data.par_chunks_mut(w).enumerate().for_each(|(j, row)| {
        for i in 0..w {
            row[i] = bell(xs[j], shapes[i], centers[i], params).clamp(0.0, params.max_depth);
        }
    });

    Ok(depth)
}
