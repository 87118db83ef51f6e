use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::SegmentPolicy;

/// Closed interval a segment dimension is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max]`. A degenerate range returns `min`
    /// without touching the generator.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    fn check(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::config(format!("{name}: bounds must be finite")));
        }
        if self.min > self.max {
            return Err(Error::config(format!(
                "{name}: min {} > max {}",
                self.min, self.max
            )));
        }
        if self.min <= 0.0 {
            return Err(Error::config(format!("{name}: min must be positive, got {}", self.min)));
        }
        Ok(())
    }
}

/// All tunable parameters. Defaults reproduce the reference channel:
/// 76 lateral points, 20 m spacing, 7 m deep, 1 m/s peak current.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Run
    pub segments: usize,
    pub depth_variance: f64,
    pub policy: SegmentPolicy,
    /// `None` draws a random initial heading.
    pub initial_heading_deg: Option<f64>,

    // Grid
    pub lateral_points: usize,
    pub spacing: f64,
    pub channel_width: f64,

    // Segment ranges
    pub straight_length: Range,
    pub arc_radius: Range,
    pub arc_angle_deg: Range,

    // Depth profile
    pub max_depth: f64,
    pub depth_steepness: f64,
    pub depth_span: f64,
    pub meander_amplitude: f64,

    // Currents
    pub max_velocity: f64,
    pub swirl_deg: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            segments: 10,
            depth_variance: 1.0,
            policy: SegmentPolicy::Random,
            initial_heading_deg: Some(0.0),
            lateral_points: 76,
            spacing: 20.0,
            channel_width: 300.0,
            straight_length: Range::new(400.0, 2000.0),
            arc_radius: Range::new(500.0, 2000.0),
            arc_angle_deg: Range::new(60.0, 80.0),
            max_depth: 7.0,
            depth_steepness: 5e-5,
            depth_span: 15.0,
            meander_amplitude: 2.0,
            max_velocity: 1.0,
            swirl_deg: 20.0,
        }
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be >= 0, got {v}")))
    }
}

impl Params {
    /// Read a JSON parameter file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(Error::config("segments must be at least 1"));
        }
        if self.lateral_points == 0 {
            return Err(Error::config("lateral_points must be at least 1"));
        }
        if let SegmentPolicy::Pattern(kinds) = &self.policy {
            if kinds.is_empty() {
                return Err(Error::config("segment pattern is empty"));
            }
        }
        if let Some(h) = self.initial_heading_deg {
            if !h.is_finite() {
                return Err(Error::config("initial_heading_deg must be finite"));
            }
        }

        positive("spacing", self.spacing)?;
        positive("channel_width", self.channel_width)?;
        self.straight_length.check("straight_length")?;
        self.arc_radius.check("arc_radius")?;
        self.arc_angle_deg.check("arc_angle_deg")?;
        if self.arc_angle_deg.max > 360.0 {
            return Err(Error::config("arc_angle_deg: max exceeds a full turn"));
        }
        // Inner bank must stay on the outside of the arc center.
        if self.arc_radius.min <= self.channel_width / 2.0 {
            return Err(Error::config(format!(
                "arc_radius.min {} must exceed half the channel width {}",
                self.arc_radius.min,
                self.channel_width / 2.0
            )));
        }

        positive("max_depth", self.max_depth)?;
        non_negative("depth_steepness", self.depth_steepness)?;
        non_negative("depth_span", self.depth_span)?;
        non_negative("meander_amplitude", self.meander_amplitude)?;
        non_negative("depth_variance", self.depth_variance)?;
        non_negative("max_velocity", self.max_velocity)?;
        non_negative("swirl_deg", self.swirl_deg)?;
        Ok(())
    }
}
