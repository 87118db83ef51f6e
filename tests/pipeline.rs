use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;

use rivergen::config::{Params, Range};
use rivergen::export::{self, Silent};
use rivergen::grid::Grid;
use rivergen::path::{PathSegment, SegmentKind, SegmentPolicy};
use rivergen::{Error, generate};

fn read_rows(path: &Path) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect()
}

#[test]
fn single_straight_segment_export() {
    let params = Params {
        segments: 1,
        policy: SegmentPolicy::Pattern(vec![SegmentKind::Straight]),
        straight_length: Range::new(400.0, 400.0),
        spacing: 20.0,
        lateral_points: 76,
        ..Params::default()
    };
    let (river, _) = generate(42, &params).unwrap();
    assert_eq!(river.grids[0].x.shape(), (76, 20));

    let assembled = river.assemble().unwrap();
    assert_eq!(assembled.len(), 1520);

    let tmp = tempfile::tempdir().unwrap();
    let dir = export::create_run_dir(tmp.path(), "run").unwrap();
    export::write_run(&dir, &assembled, &river.segments, &mut Silent).unwrap();

    let coords = read_rows(&dir.join(export::COORDS_FILE));
    let metrics = read_rows(&dir.join(export::METRICS_FILE));
    assert_eq!(coords.len(), 1520);
    assert_eq!(metrics.len(), 1520);
    for (c, m) in coords.iter().zip(&metrics) {
        assert_eq!(c.len(), 2);
        assert_eq!(m.len(), 7);
        assert_eq!([m[0], m[4], m[5]], [0.0; 3]);
        assert!((0.0..=7.0).contains(&m[3]));
        assert!((0.0..=1.0 + 1e-12).contains(&m[6]));
        assert_abs_diff_eq!(m[6], m[1].hypot(m[2]), epsilon = 1e-9);
    }

    let segments: Vec<PathSegment> =
        serde_json::from_str(&fs::read_to_string(dir.join(export::SEGMENTS_FILE)).unwrap())
            .unwrap();
    assert_eq!(segments, river.segments);
}

#[test]
fn straight_arc_straight_is_continuous() {
    let params = Params {
        segments: 3,
        policy: SegmentPolicy::Pattern(vec![
            SegmentKind::Straight,
            SegmentKind::Arc,
            SegmentKind::Straight,
        ]),
        ..Params::default()
    };
    for seed in 0..10 {
        let (river, _) = generate(seed, &params).unwrap();
        let kinds: Vec<_> = river.segments.iter().map(PathSegment::kind).collect();
        assert_eq!(kinds, vec![SegmentKind::Straight, SegmentKind::Arc, SegmentKind::Straight]);

        for pair in river.segments.windows(2) {
            let (end, start) = (pair[0].end(), pair[1].start());
            assert_abs_diff_eq!(end.x, start.x, epsilon = 1e-9);
            assert_abs_diff_eq!(end.y, start.y, epsilon = 1e-9);
            assert_abs_diff_eq!(end.heading, start.heading, epsilon = 1e-12);
        }

        // The junction step is at least one spacing and below two.
        for pair in river.grids.windows(2) {
            let last = pair[0].centerline.last().unwrap();
            let first = pair[1].centerline[0];
            let gap = (last[0] - first[0]).hypot(last[1] - first[1]);
            assert!(gap > 0.99 * params.spacing && gap < 2.0 * params.spacing);
        }

        let expected: usize = river
            .grids
            .iter()
            .map(|g| g.lateral() * g.longitudinal())
            .sum();
        let assembled = river.assemble().unwrap();
        assert_eq!(assembled.coords.len(), expected);
        assert_eq!(assembled.metrics.len(), expected);
    }
}

#[test]
fn default_run_respects_field_bounds() {
    let params = Params { segments: 6, ..Params::default() };
    let (river, _) = generate(2024, &params).unwrap();
    let assembled = river.assemble().unwrap();
    assert_eq!(assembled.len(), river.point_count());
    for m in &assembled.metrics {
        assert!((0.0..=params.max_depth).contains(&m[3]));
        assert!(m[6] <= params.max_velocity + 1e-12);
    }
}

#[test]
fn shape_mismatch_writes_nothing() {
    let params = Params { segments: 2, ..Params::default() };
    let (mut river, _) = generate(3, &params).unwrap();
    let (rows, cols) = river.grids[1].x.shape();
    river.depth[1] = Grid::new(cols + 1, rows);

    let tmp = tempfile::tempdir().unwrap();
    let result = river.assemble().and_then(|assembled| {
        let dir = export::create_run_dir(tmp.path(), "run")?;
        export::write_run(&dir, &assembled, &river.segments, &mut Silent)
    });

    assert!(matches!(
        result,
        Err(Error::ShapeMismatch { segment: 1, right: "depth", .. })
    ));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn config_errors_surface_before_generation() {
    let params = Params {
        arc_radius: Range::new(900.0, 600.0),
        ..Params::default()
    };
    assert!(matches!(generate(0, &params), Err(Error::Config(_))));
}
