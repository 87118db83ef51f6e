use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Params;

/// Position (m) and heading (rad, CCW from +x).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub const ORIGIN: Pose = Pose { x: 0.0, y: 0.0, heading: 0.0 };

    #[inline]
    pub fn tangent(&self) -> [f64; 2] {
        [self.heading.cos(), self.heading.sin()]
    }

    /// Unit vector pointing to the left of travel.
    #[inline]
    pub fn normal(&self) -> [f64; 2] {
        [-self.heading.sin(), self.heading.cos()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// +1 for counter-clockwise.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Straight,
    Arc,
}

/// How the kind of each segment is chosen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPolicy {
    #[default]
    Random,
    /// Straight, Arc, Straight, ...
    Alternating,
    /// Cycles through the listed kinds.
    Pattern(Vec<SegmentKind>),
}

impl SegmentPolicy {
    fn pick<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> SegmentKind {
        match self {
            SegmentPolicy::Random => {
                if rng.gen_bool(0.5) {
                    SegmentKind::Straight
                } else {
                    SegmentKind::Arc
                }
            }
            SegmentPolicy::Alternating => {
                if index % 2 == 0 {
                    SegmentKind::Straight
                } else {
                    SegmentKind::Arc
                }
            }
            SegmentPolicy::Pattern(kinds) => kinds[index % kinds.len()],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSegment {
    Straight {
        start: Pose,
        length: f64,
    },
    Arc {
        start: Pose,
        radius: f64,
        /// Subtended angle in radians.
        angle: f64,
        turn: Turn,
    },
}

impl PathSegment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            PathSegment::Straight { .. } => SegmentKind::Straight,
            PathSegment::Arc { .. } => SegmentKind::Arc,
        }
    }

    pub fn start(&self) -> Pose {
        match *self {
            PathSegment::Straight { start, .. } | PathSegment::Arc { start, .. } => start,
        }
    }

    /// Centerline length (arc length for arcs).
    pub fn length(&self) -> f64 {
        match *self {
            PathSegment::Straight { length, .. } => length,
            PathSegment::Arc { radius, angle, .. } => radius * angle,
        }
    }

    /// Center of the circle an arc follows.
    pub fn center(&self) -> Option<[f64; 2]> {
        match *self {
            PathSegment::Straight { .. } => None,
            PathSegment::Arc { start, radius, turn, .. } => {
                let n = start.normal();
                let r = turn.sign() * radius;
                Some([start.x + r * n[0], start.y + r * n[1]])
            }
        }
    }

    /// Pose after travelling `s` metres along the segment.
    pub fn pose_at(&self, s: f64) -> Pose {
        match *self {
            PathSegment::Straight { start, .. } => {
                let t = start.tangent();
                Pose {
                    x: start.x + s * t[0],
                    y: start.y + s * t[1],
                    heading: start.heading,
                }
            }
            PathSegment::Arc { start, radius, turn, .. } => {
                let sign = turn.sign();
                let n0 = start.normal();
                let cx = start.x + sign * radius * n0[0];
                let cy = start.y + sign * radius * n0[1];
                let heading = start.heading + sign * s / radius;
                let (sin, cos) = heading.sin_cos();
                // The point sits opposite the local left normal, seen from the center.
                Pose {
                    x: cx + sign * radius * sin,
                    y: cy - sign * radius * cos,
                    heading,
                }
            }
        }
    }

    pub fn end(&self) -> Pose {
        self.pose_at(self.length())
    }
}

/// Build `params.segments` chained segments starting at the origin.
/// `params` must already be validated.
pub fn generate_path<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Vec<PathSegment> {
    let heading = match params.initial_heading_deg {
        Some(deg) => deg.to_radians(),
        None => rng.gen_range(0.0..TAU),
    };
    let mut pose = Pose { heading, ..Pose::ORIGIN };
    let mut segments = Vec::with_capacity(params.segments);

    for i in 0..params.segments {
        let segment = match params.policy.pick(i, rng) {
            SegmentKind::Straight => PathSegment::Straight {
                start: pose,
                length: params.straight_length.sample(rng),
            },
            SegmentKind::Arc => {
                let radius = params.arc_radius.sample(rng);
                let angle = params.arc_angle_deg.sample(rng).to_radians();
                let turn = if rng.gen_bool(0.5) { Turn::Left } else { Turn::Right };
                PathSegment::Arc { start: pose, radius, angle, turn }
            }
        };
        pose = segment.end();
        segments.push(segment);
    }

    segments
}
