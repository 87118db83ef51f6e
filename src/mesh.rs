use rayon::prelude::*;

use crate::config::Params;
use crate::grid::Grid;
use crate::path::PathSegment;

/// World-space grid around one path segment. `x` and `y` have shape
/// `[lateral_points][longitudinal_samples]`.
#[derive(Clone, Debug)]
pub struct SegmentGrid {
    pub x: Grid<f64>,
    pub y: Grid<f64>,
    pub centerline: Vec<[f64; 2]>,
    /// Local path heading at each column.
    pub headings: Vec<f64>,
}

impl SegmentGrid {
    #[inline]
    pub fn lateral(&self) -> usize {
        self.x.h
    }

    #[inline]
    pub fn longitudinal(&self) -> usize {
        self.x.w
    }

    pub fn point_count(&self) -> usize {
        self.x.len()
    }
}

/// Number of columns for a centerline of `length` at `spacing`. The end
/// point is left to the next segment, and even a very short segment keeps
/// its start sample.
pub fn longitudinal_samples(length: f64, spacing: f64) -> usize {
    ((length / spacing).floor() as usize).max(1)
}

/// `count` evenly spaced offsets across `width`, symmetric about 0.
pub fn lateral_offsets(count: usize, width: f64) -> Vec<f64> {
    if count <= 1 {
        return vec![0.0; count];
    }
    let step = width / (count - 1) as f64;
    let half = width / 2.0;
    (0..count).map(|j| j as f64 * step - half).collect()
}

pub fn build_grid(segment: &PathSegment, params: &Params) -> SegmentGrid {
    let cols = longitudinal_samples(segment.length(), params.spacing);
    let offsets = lateral_offsets(params.lateral_points, params.channel_width);

    let poses: Vec<_> = (0..cols)
        .map(|i| segment.pose_at(i as f64 * params.spacing))
        .collect();
    let normals: Vec<_> = poses.iter().map(|p| p.normal()).collect();

    // Offsets follow the local normal so rows bend with the arc.
    let rows = offsets.len();
    let x = Grid::from_fn(cols, rows, |i, j| poses[i].x + offsets[j] * normals[i][0]);
    let y = Grid::from_fn(cols, rows, |i, j| poses[i].y + offsets[j] * normals[i][1]);

    SegmentGrid {
        x,
        y,
        centerline: poses.iter().map(|p| [p.x, p.y]).collect(),
        headings: poses.iter().map(|p| p.heading).collect(),
    }
}

pub fn build_grids(segments: &[PathSegment], params: &Params) -> Vec<SegmentGrid> {
    segments.par_iter().map(|s| build_grid(s, params)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::path::{Pose, Turn};

    fn params() -> Params {
        Params::default()
    }

    #[test]
    fn offsets_are_symmetric_and_even() {
        let o = lateral_offsets(76, 300.0);
        assert_eq!(o.len(), 76);
        assert_abs_diff_eq!(o[0], -150.0, epsilon = 1e-12);
        assert_abs_diff_eq!(o[75], 150.0, epsilon = 1e-9);
        for j in 0..76 {
            assert_abs_diff_eq!(o[j], -o[75 - j], epsilon = 1e-9);
        }
        let odd = lateral_offsets(5, 40.0);
        assert_eq!(odd, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
        assert_eq!(lateral_offsets(1, 40.0), vec![0.0]);
    }

    #[test]
    fn sample_counts() {
        assert_eq!(longitudinal_samples(400.0, 20.0), 20);
        assert_eq!(longitudinal_samples(419.9, 20.0), 20);
        assert_eq!(longitudinal_samples(5.0, 20.0), 1);
    }

    #[test]
    fn straight_grid_shape_and_layout() {
        let seg = PathSegment::Straight { start: Pose::ORIGIN, length: 400.0 };
        let g = build_grid(&seg, &params());
        assert_eq!(g.x.shape(), (76, 20));
        assert_eq!(g.y.shape(), (76, 20));
        // Heading +x: columns advance in x, rows spread in y.
        assert_abs_diff_eq!(g.x.get(19, 0), 380.0, epsilon = 1e-9);
        assert_abs_diff_eq!(g.y.get(0, 0), -150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(g.y.get(0, 75), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn short_segment_keeps_start_sample() {
        let start = Pose { x: 3.0, y: 4.0, heading: 1.0 };
        let seg = PathSegment::Straight { start, length: 7.0 };
        let g = build_grid(&seg, &params());
        assert_eq!(g.longitudinal(), 1);
        assert_eq!(g.centerline, vec![[3.0, 4.0]]);
    }

    fn check_rows(g: &SegmentGrid, width: f64) {
        let rows = g.lateral();
        let step = width / (rows - 1) as f64;
        for i in 0..g.longitudinal() {
            let t = [g.headings[i].cos(), g.headings[i].sin()];
            for j in 1..rows {
                let dx = g.x.get(i, j) - g.x.get(i, j - 1);
                let dy = g.y.get(i, j) - g.y.get(i, j - 1);
                assert_abs_diff_eq!((dx * dx + dy * dy).sqrt(), step, epsilon = 1e-6);
                assert_abs_diff_eq!(dx * t[0] + dy * t[1], 0.0, epsilon = 1e-6);
            }
            // Middle of the fan is the centerline for odd counts.
            if rows % 2 == 1 {
                let c = g.centerline[i];
                assert_abs_diff_eq!(g.x.get(i, rows / 2), c[0], epsilon = 1e-6);
                assert_abs_diff_eq!(g.y.get(i, rows / 2), c[1], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn arc_rows_are_rigid_and_orthogonal() {
        for turn in [Turn::Left, Turn::Right] {
            let seg = PathSegment::Arc {
                start: Pose { x: 100.0, y: 50.0, heading: -0.4 },
                radius: 600.0,
                angle: 75f64.to_radians(),
                turn,
            };
            let p = Params { lateral_points: 31, ..params() };
            let g = build_grid(&seg, &p);
            assert_eq!(g.longitudinal(), longitudinal_samples(seg.length(), 20.0));
            check_rows(&g, p.channel_width);

            // Each lateral row is a concentric circle about the arc center.
            let c = seg.center().unwrap();
            let offsets = lateral_offsets(31, p.channel_width);
            for j in 0..31 {
                let r = 600.0 - turn.sign() * offsets[j];
                for i in 0..g.longitudinal() {
                    let d = ((g.x.get(i, j) - c[0]).powi(2) + (g.y.get(i, j) - c[1]).powi(2)).sqrt();
                    assert_abs_diff_eq!(d, r, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn straight_rows_are_rigid_and_orthogonal() {
        let seg = PathSegment::Straight {
            start: Pose { x: -20.0, y: 7.0, heading: 2.1 },
            length: 900.0,
        };
        let g = build_grid(&seg, &params());
        check_rows(&g, 300.0);
    }
}
