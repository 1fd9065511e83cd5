//! Newton's rings: interference in the air gap under a plano-convex lens.
//!
//! # Governing Equations
//!
//! ```text
//! Gap thickness: d(r) = R − √(R² − r²)
//! Intensity:     I(r) = 4·sin²(2π·d/λ)
//! Dark rings:    r_m = √(m·λ·R),  m = 1, 2, …
//! ```
//!
//! Reflection at the glass-air boundary introduces a π phase shift, so
//! the centre of the pattern (zero gap) is dark.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DemoError, DemoResult};
use crate::visualization::{IntensityGrid, Series};

use super::{CriterionStatus, Demonstration, VerificationStatus};

/// Configuration for the Newton's-rings demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RingsConfig {
    /// Whether this demonstration runs.
    #[serde(default = "super::default_enabled")]
    pub enabled: bool,
    /// Illumination wavelength (m).
    #[validate(range(min = 0.000_000_001))]
    #[serde(default = "default_wavelength")]
    pub wavelength: f64,
    /// Radius of curvature of the lens (m).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_lens_radius")]
    pub lens_radius: f64,
    /// Half-width of the square observation region (m).
    #[validate(range(min = 0.000_001))]
    #[serde(default = "default_extent")]
    pub extent: f64,
    /// Grid resolution per axis.
    #[validate(range(min = 2))]
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_wavelength() -> f64 {
    632.8e-9
}

fn default_lens_radius() -> f64 {
    0.1
}

fn default_extent() -> f64 {
    0.002
}

const fn default_points() -> usize {
    1000
}

impl Default for RingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wavelength: default_wavelength(),
            lens_radius: default_lens_radius(),
            extent: default_extent(),
            points: default_points(),
        }
    }
}

/// The Newton's-rings demonstration.
#[derive(Debug, Clone)]
pub struct RingsScenario {
    config: RingsConfig,
}

impl RingsScenario {
    /// Create the demonstration from its configuration.
    #[must_use]
    pub const fn new(config: RingsConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    #[must_use]
    pub const fn config(&self) -> &RingsConfig {
        &self.config
    }

    /// Air-gap thickness under the lens at radial distance `r`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when `r` is negative,
    /// non-finite, or beyond the lens radius.
    pub fn gap_thickness(&self, r: f64) -> DemoResult<f64> {
        if !r.is_finite() || r < 0.0 {
            return Err(DemoError::invalid_argument(format!(
                "radial distance must be finite and non-negative, got {r}"
            )));
        }
        if r > self.config.lens_radius {
            return Err(DemoError::invalid_argument(format!(
                "radial distance {r} m exceeds lens radius {} m",
                self.config.lens_radius
            )));
        }
        let radius = self.config.lens_radius;
        Ok(radius - (radius * radius - r * r).sqrt())
    }

    /// Reflected intensity at radial distance `r`, normalized so the
    /// bright fringes reach 4.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when `r` lies outside the
    /// lens footprint.
    pub fn intensity(&self, r: f64) -> DemoResult<f64> {
        let gap = self.gap_thickness(r)?;
        let phase = 2.0 * std::f64::consts::PI * gap / self.config.wavelength;
        Ok(4.0 * phase.sin().powi(2))
    }

    /// Radius of the `m`-th dark ring, `r_m = √(m·λ·R)`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when `m` is zero.
    pub fn dark_ring_radius(&self, m: u32) -> DemoResult<f64> {
        if m == 0 {
            return Err(DemoError::invalid_argument(
                "dark-ring order must be at least 1; the central dark spot is not a ring",
            ));
        }
        Ok((f64::from(m) * self.config.wavelength * self.config.lens_radius).sqrt())
    }

    /// Radial intensity profile for a plot sink.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when the configured extent
    /// exceeds the lens radius.
    pub fn radial_profile(&self) -> DemoResult<Series> {
        let step = self.config.extent / (self.config.points - 1) as f64;
        let mut series = Series::new("intensity");
        for i in 0..self.config.points {
            let r = i as f64 * step;
            series.push(r, self.intensity(r)?);
        }
        Ok(series)
    }

    /// Two-dimensional intensity map over the observation square.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when a corner of the square
    /// falls outside the lens footprint.
    pub fn intensity_grid(&self) -> DemoResult<IntensityGrid> {
        let points = self.config.points;
        let extent = self.config.extent;
        let step = 2.0 * extent / (points - 1) as f64;
        let mut values = Vec::with_capacity(points * points);
        for row in 0..points {
            let y = -extent + row as f64 * step;
            for col in 0..points {
                let x = -extent + col as f64 * step;
                values.push(self.intensity(x.hypot(y))?);
            }
        }
        IntensityGrid::new(points, extent, values)
    }
}

impl Demonstration for RingsScenario {
    fn name(&self) -> &'static str {
        "Newton's Rings"
    }

    fn topic(&self) -> &'static str {
        "optics/newtons_rings"
    }

    fn execute(&self) -> DemoResult<VerificationStatus> {
        let centre = self.intensity(0.0)?;

        // Dark rings sit where the predicted radii say they should.
        let mut max_dark_intensity: f64 = 0.0;
        for order in 1..=5 {
            let radius = self.dark_ring_radius(order)?;
            max_dark_intensity = max_dark_intensity.max(self.intensity(radius)?);
        }

        let criteria = vec![
            CriterionStatus::below("NR-CENTER", "Central spot is dark", centre, 1e-9),
            // The √(mλR) formula is exact for the parabolic gap r²/(2R);
            // against the exact spherical gap a residual of order 1e-8
            // in intensity remains at the fifth ring.
            CriterionStatus::below(
                "NR-DARK",
                "Predicted dark rings are dark (orders 1-5)",
                max_dark_intensity,
                1e-6,
            ),
        ];

        Ok(VerificationStatus::from_criteria(
            criteria,
            format!(
                "lambda = {:.1} nm, R = {} m, first dark ring at {:.3} mm",
                self.config.wavelength * 1e9,
                self.config.lens_radius,
                self.dark_ring_radius(1)? * 1e3
            ),
        ))
    }
}
