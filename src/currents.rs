use rand::Rng;
use rayon::prelude::*;

use crate::config::Params;
use crate::depth::linspace;
use crate::grid::Grid;

/// Velocity components (m/s) sampled on a segment grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentField {
    pub x: Grid<f64>,
    pub y: Grid<f64>,
}

impl CurrentField {
    pub fn speed(&self, x: usize, y: usize) -> f64 {
        self.x.get(x, y).hypot(self.y.get(x, y))
    }
}

/// Stylized channel flow. Speed peaks mid-channel and drops to zero at the
/// banks; direction follows the local heading, deflected by a per-column
/// swirl that also fades towards the banks. `|v| <= max_velocity` holds
/// everywhere.
pub fn current_field<R: Rng + ?Sized>(
    headings: &[f64],
    lateral: usize,
    first_row: usize,
    params: &Params,
    rng: &mut R,
) -> CurrentField {
    let w = headings.len();

    // Per-column randomized shape: peak speed factor and deflection amplitude.
    let columns: Vec<(f64, f64)> = (0..w)
        .map(|i| {
            let peak = rng.gen_range(0.85..=1.0);
            let phase = (2.0 * (first_row + i) as f64).to_radians().sin();
            let swirl = params.swirl_deg.to_radians() * phase * rng.gen_range(0.5..=1.0);
            (peak, swirl)
        })
        .collect();

    // 1 on the centerline, 0 on the banks.
    let profile: Vec<f64> = linspace(-1.0, 1.0, lateral)
        .into_iter()
        .map(|s| (1.0 - s * s).max(0.0))
        .collect();

    let mut cx = Grid::new(w, lateral);
    let mut cy = Grid::new(w, lateral);
    cx.data
        .par_chunks_mut(w)
        .zip(cy.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(j, (row_x, row_y))| {
            let p = profile[j];
            for i in 0..w {
                let (peak, swirl) = columns[i];
                let speed = params.max_velocity * peak * p;
                let (sin, cos) = (headings[i] + swirl * p).sin_cos();
                row_x[i] = speed * cos;
                row_y[i] = speed * sin;
            }
        });

    CurrentField { x: cx, y: cy }
}
