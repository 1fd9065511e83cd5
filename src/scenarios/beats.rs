//! Beat-frequency superposition of two tones.
//!
//! # Governing Equations
//!
//! ```text
//! Superposition:  y(t) = a₁·sin(2π·f₁·t) + a₂·sin(2π·f₂·t)
//! Beat frequency: f_beat = |f₁ − f₂|
//! Equal amplitudes: y = 2a·sin(π(f₁+f₂)t)·cos(π(f₁−f₂)t)
//! ```
//!
//! For equal amplitudes the slow cosine factor is the audible envelope;
//! its zeroes are spaced half a beat period apart.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DemoResult;
use crate::visualization::Series;

use super::{CriterionStatus, Demonstration, VerificationStatus};

/// Configuration for the beat-frequency demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BeatsConfig {
    /// Whether this demonstration runs.
    #[serde(default = "super::default_enabled")]
    pub enabled: bool,
    /// First tone frequency (Hz).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_f1")]
    pub frequency_1: f64,
    /// Second tone frequency (Hz).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_f2")]
    pub frequency_2: f64,
    /// First tone amplitude.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_amplitude")]
    pub amplitude_1: f64,
    /// Second tone amplitude.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_amplitude")]
    pub amplitude_2: f64,
    /// Sampled duration (s).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Number of samples over the duration.
    #[validate(range(min = 2))]
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_f1() -> f64 {
    440.0
}

fn default_f2() -> f64 {
    444.0
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_duration() -> f64 {
    1.0
}

const fn default_samples() -> usize {
    5000
}

impl Default for BeatsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_1: default_f1(),
            frequency_2: default_f2(),
            amplitude_1: default_amplitude(),
            amplitude_2: default_amplitude(),
            duration: default_duration(),
            samples: default_samples(),
        }
    }
}

/// The beat-frequency demonstration.
#[derive(Debug, Clone)]
pub struct BeatsScenario {
    config: BeatsConfig,
}

impl BeatsScenario {
    /// Create the demonstration from its configuration.
    #[must_use]
    pub const fn new(config: BeatsConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    #[must_use]
    pub const fn config(&self) -> &BeatsConfig {
        &self.config
    }

    /// Beat frequency `|f₁ − f₂|` (Hz).
    #[must_use]
    pub fn beat_frequency(&self) -> f64 {
        (self.config.frequency_1 - self.config.frequency_2).abs()
    }

    /// Beat period (s); `None` when the tones are identical and no beat
    /// exists.
    #[must_use]
    pub fn beat_period(&self) -> Option<f64> {
        let beat = self.beat_frequency();
        (beat > 0.0).then(|| 1.0 / beat)
    }

    /// First tone at time `t`.
    #[must_use]
    pub fn tone_1(&self, t: f64) -> f64 {
        self.config.amplitude_1 * (2.0 * std::f64::consts::PI * self.config.frequency_1 * t).sin()
    }

    /// Second tone at time `t`.
    #[must_use]
    pub fn tone_2(&self, t: f64) -> f64 {
        self.config.amplitude_2 * (2.0 * std::f64::consts::PI * self.config.frequency_2 * t).sin()
    }

    /// Superposed displacement at time `t`.
    #[must_use]
    pub fn superposition(&self, t: f64) -> f64 {
        self.tone_1(t) + self.tone_2(t)
    }

    /// Envelope `2a·cos(π(f₁−f₂)t)` at time `t`. Exact for equal
    /// amplitudes; for unequal amplitudes the mean amplitude is used and
    /// the envelope is approximate.
    #[must_use]
    pub fn envelope(&self, t: f64) -> f64 {
        let mean_amplitude = 0.5 * (self.config.amplitude_1 + self.config.amplitude_2);
        2.0 * mean_amplitude
            * (std::f64::consts::PI * (self.config.frequency_1 - self.config.frequency_2) * t).cos()
    }

    fn sample_times(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.config.duration / (self.config.samples - 1) as f64;
        (0..self.config.samples).map(move |i| i as f64 * step)
    }

    /// Superposed waveform for a plot sink.
    #[must_use]
    pub fn waveform(&self) -> Series {
        Series::from_points(
            "superposition",
            self.sample_times().map(|t| (t, self.superposition(t))),
        )
    }

    /// The two component tones for a plot sink.
    #[must_use]
    pub fn components(&self) -> (Series, Series) {
        let first = Series::from_points(
            format!("{} Hz", self.config.frequency_1),
            self.sample_times().map(|t| (t, self.tone_1(t))),
        );
        let second = Series::from_points(
            format!("{} Hz", self.config.frequency_2),
            self.sample_times().map(|t| (t, self.tone_2(t))),
        );
        (first, second)
    }
}

impl Demonstration for BeatsScenario {
    fn name(&self) -> &'static str {
        "Beat-Frequency Superposition"
    }

    fn topic(&self) -> &'static str {
        "waves/beat_frequency"
    }

    fn execute(&self) -> DemoResult<VerificationStatus> {
        let amplitude_sum = self.config.amplitude_1 + self.config.amplitude_2;
        let equal_amplitudes =
            (self.config.amplitude_1 - self.config.amplitude_2).abs() < f64::EPSILON;

        let mut max_excess_over_sum: f64 = 0.0;
        let mut max_excess_over_envelope: f64 = 0.0;
        for t in self.sample_times() {
            let y = self.superposition(t);
            max_excess_over_sum = max_excess_over_sum.max(y.abs() - amplitude_sum);
            if equal_amplitudes {
                max_excess_over_envelope =
                    max_excess_over_envelope.max(y.abs() - self.envelope(t).abs());
            }
        }

        let mut criteria = vec![CriterionStatus::below(
            "BT-BOUND",
            "Superposition bounded by a1 + a2",
            max_excess_over_sum,
            1e-12,
        )];
        if equal_amplitudes {
            criteria.push(CriterionStatus::below(
                "BT-ENV",
                "Envelope contains the waveform",
                max_excess_over_envelope,
                1e-12,
            ));
        }

        Ok(VerificationStatus::from_criteria(
            criteria,
            format!(
                "f1 = {} Hz, f2 = {} Hz, beat = {} Hz",
                self.config.frequency_1,
                self.config.frequency_2,
                self.beat_frequency()
            ),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_frequency_and_period() {
        let scenario = BeatsScenario::new(BeatsConfig::default());
        assert!((scenario.beat_frequency() - 4.0).abs() < f64::EPSILON);
        assert!((scenario.beat_period().unwrap() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_identical_tones_have_no_beat() {
        let scenario = BeatsScenario::new(BeatsConfig {
            frequency_2: 440.0,
            ..BeatsConfig::default()
        });
        assert!(scenario.beat_frequency().abs() < f64::EPSILON);
        assert!(scenario.beat_period().is_none());
    }

    #[test]
    fn test_superposition_is_sum_of_tones() {
        let scenario = BeatsScenario::new(BeatsConfig {
            amplitude_2: 0.5,
            ..BeatsConfig::default()
        });
        for t in [0.0, 0.01, 0.1, 0.37] {
            let sum = scenario.tone_1(t) + scenario.tone_2(t);
            assert!((scenario.superposition(t) - sum).abs() < 1e-15);
        }
    }

    #[test]
    fn test_superposition_zero_at_origin() {
        let scenario = BeatsScenario::new(BeatsConfig::default());
        assert!(scenario.superposition(0.0).abs() < 1e-15);
    }

    #[test]
    fn test_envelope_identity_for_equal_amplitudes() {
        // y = 2a·sin(π(f1+f2)t)·cos(π(f1−f2)t), so |y| ≤ |envelope|.
        let scenario = BeatsScenario::new(BeatsConfig::default());
        for i in 0..1000 {
            let t = f64::from(i) * 1e-3;
            assert!(
                scenario.superposition(t).abs() <= scenario.envelope(t).abs() + 1e-12,
                "t = {t}"
            );
        }
    }

    #[test]
    fn test_envelope_zero_at_quarter_beat_period() {
        // cos(π·Δf·t) = 0 at t = 1/(2Δf), half the beat period.
        let scenario = BeatsScenario::new(BeatsConfig::default());
        let half_beat = scenario.beat_period().unwrap() / 2.0;
        assert!(scenario.envelope(half_beat / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_waveform_series_shape() {
        let scenario = BeatsScenario::new(BeatsConfig {
            samples: 100,
            ..BeatsConfig::default()
        });
        let waveform = scenario.waveform();
        assert_eq!(waveform.len(), 100);
        assert!((waveform.points[99].0 - 1.0).abs() < 1e-12);

        let (first, second) = scenario.components();
        assert_eq!(first.name, "440 Hz");
        assert_eq!(second.name, "444 Hz");
    }

    #[test]
    fn test_scenario_executes_verified() {
        let scenario = BeatsScenario::new(BeatsConfig::default());
        let status = scenario.execute().unwrap();
        assert!(status.verified, "criteria: {:?}", status.criteria);
        assert_eq!(status.criteria.len(), 2);
        assert!(status.message.contains("beat = 4 Hz"));
    }

    #[test]
    fn test_unequal_amplitudes_skip_envelope_criterion() {
        let scenario = BeatsScenario::new(BeatsConfig {
            amplitude_2: 0.2,
            ..BeatsConfig::default()
        });
        let status = scenario.execute().unwrap();
        assert!(status.verified);
        assert_eq!(status.criteria.len(), 1);
        assert_eq!(status.criteria[0].id, "BT-BOUND");
    }
}
