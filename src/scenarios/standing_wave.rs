//! Standing wave from two counter-propagating travelling waves.
//!
//! # Governing Equations
//!
//! ```text
//! Rightward:     y₊(x, t) = A·sin(kx − ωt)
//! Leftward:      y₋(x, t) = A·sin(kx + ωt)
//! Superposition: y(x, t)  = 2A·sin(kx)·cos(ωt)
//! Nodes:         x = m·π/k,     antinodes midway between them
//! ```
//!
//! Frames are rendered as a pure function of the frame index, so a
//! given animation is reproducible sample for sample.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DemoError, DemoResult};
use crate::visualization::Series;

use super::{CriterionStatus, Demonstration, VerificationStatus};

/// Configuration for the standing-wave demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StandingWaveConfig {
    /// Whether this demonstration runs.
    #[serde(default = "super::default_enabled")]
    pub enabled: bool,
    /// Amplitude of each travelling component.
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Oscillation frequency (Hz).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_frequency")]
    pub frequency: f64,
    /// Wavenumber k (rad/m).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_wavenumber")]
    pub wavenumber: f64,
    /// Spatial span, x from 0 to this length (m).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_span")]
    pub span: f64,
    /// Number of spatial samples.
    #[validate(range(min = 2))]
    #[serde(default = "default_points")]
    pub points: usize,
    /// Simulated time advanced per frame (s).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_seconds_per_frame")]
    pub seconds_per_frame: f64,
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_frequency() -> f64 {
    0.5
}

fn default_wavenumber() -> f64 {
    std::f64::consts::FRAC_PI_2
}

fn default_span() -> f64 {
    10.0
}

const fn default_points() -> usize {
    1000
}

fn default_seconds_per_frame() -> f64 {
    0.05
}

impl Default for StandingWaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            wavenumber: default_wavenumber(),
            span: default_span(),
            points: default_points(),
            seconds_per_frame: default_seconds_per_frame(),
        }
    }
}

/// One rendered animation frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveFrame {
    /// Index of this frame in the animation.
    pub frame_index: usize,
    /// Simulated time of this frame (s).
    pub time: f64,
    /// Spatial sample positions.
    pub positions: Vec<f64>,
    /// Rightward-travelling component at each position.
    pub rightward: Vec<f64>,
    /// Leftward-travelling component at each position.
    pub leftward: Vec<f64>,
    /// Superposed displacement at each position.
    pub superposition: Vec<f64>,
}

impl WaveFrame {
    /// The superposed displacement as a plottable series.
    #[must_use]
    pub fn superposition_series(&self) -> Series {
        Series::from_points(
            format!("frame {}", self.frame_index),
            self.positions
                .iter()
                .copied()
                .zip(self.superposition.iter().copied()),
        )
    }
}

/// The standing-wave demonstration.
#[derive(Debug, Clone)]
pub struct StandingWaveScenario {
    config: StandingWaveConfig,
}

impl StandingWaveScenario {
    /// Create the demonstration from its configuration.
    #[must_use]
    pub const fn new(config: StandingWaveConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    #[must_use]
    pub const fn config(&self) -> &StandingWaveConfig {
        &self.config
    }

    /// Angular frequency ω = 2π·f (rad/s).
    #[must_use]
    pub fn angular_frequency(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.config.frequency
    }

    /// Superposed displacement at position `x` and time `t`,
    /// `2A·sin(kx)·cos(ωt)`.
    #[must_use]
    pub fn displacement(&self, x: f64, t: f64) -> f64 {
        2.0 * self.config.amplitude
            * (self.config.wavenumber * x).sin()
            * (self.angular_frequency() * t).cos()
    }

    /// Node positions `m·π/k` inside the span.
    #[must_use]
    pub fn nodes(&self) -> Vec<f64> {
        let spacing = std::f64::consts::PI / self.config.wavenumber;
        let mut positions = Vec::new();
        let mut m = 0u32;
        loop {
            let x = f64::from(m) * spacing;
            if x > self.config.span {
                break;
            }
            positions.push(x);
            m += 1;
        }
        positions
    }

    /// Antinode positions, midway between adjacent nodes.
    #[must_use]
    pub fn antinodes(&self) -> Vec<f64> {
        let spacing = std::f64::consts::PI / self.config.wavenumber;
        let mut positions = Vec::new();
        let mut m = 0u32;
        loop {
            let x = (f64::from(m) + 0.5) * spacing;
            if x > self.config.span {
                break;
            }
            positions.push(x);
            m += 1;
        }
        positions
    }

    /// Render the frame at `frame_index`. Pure in the index: the same
    /// index always yields the same frame.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::NonFinite`] when the frame time overflows to
    /// a non-finite value.
    pub fn render_frame(&self, frame_index: usize) -> DemoResult<WaveFrame> {
        let time = frame_index as f64 * self.config.seconds_per_frame;
        if !time.is_finite() {
            return Err(DemoError::non_finite("standing-wave frame time"));
        }
        let omega = self.angular_frequency();
        let k = self.config.wavenumber;
        let amplitude = self.config.amplitude;
        let step = self.config.span / (self.config.points - 1) as f64;

        let mut positions = Vec::with_capacity(self.config.points);
        let mut rightward = Vec::with_capacity(self.config.points);
        let mut leftward = Vec::with_capacity(self.config.points);
        let mut superposition = Vec::with_capacity(self.config.points);
        for i in 0..self.config.points {
            let x = i as f64 * step;
            let right = amplitude * (k * x - omega * time).sin();
            let left = amplitude * (k * x + omega * time).sin();
            positions.push(x);
            rightward.push(right);
            leftward.push(left);
            superposition.push(right + left);
        }

        Ok(WaveFrame {
            frame_index,
            time,
            positions,
            rightward,
            leftward,
            superposition,
        })
    }

    /// Render `count` consecutive frames starting at index 0.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::render_frame`].
    pub fn render_frames(&self, count: usize) -> DemoResult<Vec<WaveFrame>> {
        (0..count).map(|i| self.render_frame(i)).collect()
    }
}

impl Demonstration for StandingWaveScenario {
    fn name(&self) -> &'static str {
        "Standing Wave"
    }

    fn topic(&self) -> &'static str {
        "waves/standing_wave"
    }

    fn execute(&self) -> DemoResult<VerificationStatus> {
        let nodes = self.nodes();

        // Check a handful of frames spread over one full period.
        let period = 1.0 / self.config.frequency;
        let frames_per_period = (period / self.config.seconds_per_frame).round() as usize;
        let frame_indices = [
            0,
            frames_per_period / 4,
            frames_per_period / 2,
            frames_per_period,
        ];

        let mut max_node_displacement: f64 = 0.0;
        let mut max_identity_deviation: f64 = 0.0;
        for &index in &frame_indices {
            let frame = self.render_frame(index)?;
            for &node in &nodes {
                max_node_displacement =
                    max_node_displacement.max(self.displacement(node, frame.time).abs());
            }
            for (i, &x) in frame.positions.iter().enumerate() {
                let deviation = (frame.superposition[i] - self.displacement(x, frame.time)).abs();
                max_identity_deviation = max_identity_deviation.max(deviation);
            }
        }

        let criteria = vec![
            CriterionStatus::below(
                "SW-NODE",
                "Nodes stay at rest across frames",
                max_node_displacement,
                1e-9,
            ),
            CriterionStatus::below(
                "SW-IDENT",
                "Superposition matches 2A sin(kx) cos(wt)",
                max_identity_deviation,
                1e-9,
            ),
        ];

        Ok(VerificationStatus::from_criteria(
            criteria,
            format!(
                "k = {:.4} rad/m, f = {} Hz, {} nodes in span",
                self.config.wavenumber,
                self.config.frequency,
                nodes.len()
            ),
        ))
    }
}
