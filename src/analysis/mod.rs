//! Analysis methods and options

use serde::{Deserialize, Serialize};

use crate::atmosphere::{MAX_ALTITUDE, MIN_ALTITUDE};
use crate::elements::DEFAULT_ELASTIC_AXIS;
use crate::error::{FlutterError, FlutterResult};
use crate::modal::ModalBasis;

/// Flutter formulation used to predict the flutter speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlutterMethod {
    /// Rayleigh-Ritz bending-torsion model with Theodorsen aerodynamics,
    /// solved as a generalized eigenproblem over reduced frequency
    ModalEigenproblem,
    /// Martin's closed-form estimate (NACA TN 4197)
    EmpiricalClosedForm,
}

impl Default for FlutterMethod {
    fn default() -> Self {
        Self::ModalEigenproblem
    }
}

impl FlutterMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModalEigenproblem => "modal eigenproblem",
            Self::EmpiricalClosedForm => "empirical closed form",
        }
    }
}

/// Reduced-frequency sweep k = start, start + step, ... while k < end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    /// First reduced frequency sampled
    pub start: f64,
    /// Increment between samples
    pub step: f64,
    /// Exclusive upper bound
    pub end: f64,
    /// Maximum number of samples evaluated
    pub max_iterations: usize,
    /// Damping above which a mode is reported as unstable
    pub damping_threshold: f64,
    /// Iteration limit for each eigen-decomposition (0 = no limit)
    pub max_eigen_iterations: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            start: 0.01,
            step: 0.01,
            end: 10.0,
            max_iterations: 1000,
            damping_threshold: 1e-4,
            max_eigen_iterations: 10_000,
        }
    }
}

impl SweepOptions {
    /// Reduced frequencies visited by the sweep, in ascending order
    pub fn reduced_frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        let limit = self.end - 0.5 * self.step;
        (0..self.max_iterations)
            .map(move |i| self.start + i as f64 * self.step)
            .take_while(move |&k| k < limit)
    }

    pub fn validate(&self) -> FlutterResult<()> {
        if !(self.start.is_finite() && self.start > 0.0) {
            return Err(FlutterError::ReducedFrequencyOutOfRange(self.start));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(FlutterError::invalid("sweep.step", self.step, "must be finite and > 0"));
        }
        if !(self.end.is_finite() && self.end > self.start) {
            return Err(FlutterError::invalid("sweep.end", self.end, "must be finite and > sweep.start"));
        }
        if self.max_iterations == 0 {
            return Err(FlutterError::invalid("sweep.max_iterations", 0.0, "must be >= 1"));
        }
        if !(self.damping_threshold.is_finite() && self.damping_threshold >= 0.0) {
            return Err(FlutterError::invalid(
                "sweep.damping_threshold",
                self.damping_threshold,
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Options for a single flutter analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Flutter formulation
    pub method: FlutterMethod,
    /// Number of bending trial functions
    pub bending_modes: usize,
    /// Number of torsion trial functions
    pub torsion_modes: usize,
    /// Integration stations along the span
    pub stations: usize,
    /// Elastic-axis location as a fraction of the semichord
    pub elastic_axis: f64,
    /// Altitude of a single-point analysis in m
    pub altitude: f64,
    /// Reduced-frequency sweep
    pub sweep: SweepOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        let basis = ModalBasis::default();
        Self {
            method: FlutterMethod::ModalEigenproblem,
            bending_modes: basis.bending_modes,
            torsion_modes: basis.torsion_modes,
            stations: basis.stations,
            elastic_axis: DEFAULT_ELASTIC_AXIS,
            altitude: 0.0,
            sweep: SweepOptions::default(),
        }
    }
}

impl AnalysisOptions {
    /// Create options for the modal eigenproblem
    pub fn modal() -> Self {
        Self::default()
    }

    /// Create options for the closed-form estimate
    pub fn empirical() -> Self {
        Self {
            method: FlutterMethod::EmpiricalClosedForm,
            ..Self::default()
        }
    }

    /// Set the number of bending and torsion trial functions
    pub fn with_modes(mut self, bending: usize, torsion: usize) -> Self {
        self.bending_modes = bending;
        self.torsion_modes = torsion;
        self
    }

    /// Set the analysis altitude
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Set the maximum number of reduced-frequency samples
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.sweep.max_iterations = max_iter;
        self
    }

    /// Set the reduced-frequency sweep
    pub fn with_sweep(mut self, sweep: SweepOptions) -> Self {
        self.sweep = sweep;
        self
    }

    /// Trial-function basis described by these options
    pub fn basis(&self) -> ModalBasis {
        ModalBasis {
            bending_modes: self.bending_modes,
            torsion_modes: self.torsion_modes,
            stations: self.stations,
        }
    }

    pub fn validate(&self) -> FlutterResult<()> {
        if self.method == FlutterMethod::ModalEigenproblem {
            self.basis().validate()?;
            self.sweep.validate()?;
        }
        if !(self.elastic_axis.is_finite() && self.elastic_axis.abs() < 1.0) {
            return Err(FlutterError::invalid("elastic_axis", self.elastic_axis, "must lie in (-1, 1)"));
        }
        Ok(())
    }
}

/// Options for the velocity-vs-altitude envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeOptions {
    /// Lowest altitude in m
    pub min_altitude: f64,
    /// Highest altitude in m
    pub max_altitude: f64,
    /// Altitude step in m
    pub step: f64,
    /// Fraction of the flutter speed withheld as margin
    pub safety_margin: f64,
    /// Largest number of altitude points a range may hold
    pub max_points: usize,
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        Self {
            min_altitude: 0.0,
            max_altitude: 10_000.0,
            step: 1.0,
            safety_margin: 0.25,
            max_points: 20_001,
        }
    }
}

impl EnvelopeOptions {
    /// Set the altitude range and step
    pub fn with_range(mut self, min_altitude: f64, max_altitude: f64, step: f64) -> Self {
        self.min_altitude = min_altitude;
        self.max_altitude = max_altitude;
        self.step = step;
        self
    }

    /// Set the safety margin
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Number of altitude points in the range
    pub fn point_count(&self) -> usize {
        ((self.max_altitude - self.min_altitude) / self.step + 1e-9).floor() as usize + 1
    }

    /// Altitudes visited by the sweep, in ascending order
    pub fn altitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.point_count())
            .map(move |i| self.min_altitude + i as f64 * self.step)
    }

    pub fn validate(&self) -> FlutterResult<()> {
        for altitude in [self.min_altitude, self.max_altitude] {
            if !(altitude.is_finite() && (MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude)) {
                return Err(FlutterError::AltitudeOutOfRange {
                    altitude,
                    min: MIN_ALTITUDE,
                    max: MAX_ALTITUDE,
                });
            }
        }
        if self.max_altitude < self.min_altitude {
            return Err(FlutterError::invalid(
                "envelope.max_altitude",
                self.max_altitude,
                "must be >= envelope.min_altitude",
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(FlutterError::invalid("envelope.step", self.step, "must be finite and > 0"));
        }
        if !(0.0..1.0).contains(&self.safety_margin) {
            return Err(FlutterError::invalid(
                "envelope.safety_margin",
                self.safety_margin,
                "must lie in [0, 1)",
            ));
        }
        let count = self.point_count();
        if count > self.max_points {
            return Err(FlutterError::invalid(
                "envelope.max_points",
                self.max_points as f64,
                &format!("range holds {count} altitudes; widen the step or raise the cap"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sweep_domain() {
        let sweep = SweepOptions::default();
        let ks: Vec<f64> = sweep.reduced_frequencies().collect();
        assert_eq!(ks.len(), 999);
        assert_relative_eq!(ks[0], 0.01);
        assert_relative_eq!(ks[998], 9.99, epsilon = 1e-9);
        assert!(ks.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sweep_respects_iteration_cap() {
        let options = AnalysisOptions::modal().with_max_iter(25);
        assert_eq!(options.sweep.reduced_frequencies().count(), 25);
    }

    #[test]
    fn test_sweep_rejects_zero_start() {
        let sweep = SweepOptions { start: 0.0, ..SweepOptions::default() };
        assert!(sweep.validate().unwrap_err().is_domain());
    }

    #[test]
    fn test_default_envelope() {
        let env = EnvelopeOptions::default();
        assert_eq!(env.point_count(), 10_001);
        assert_eq!(env.altitudes().last(), Some(10_000.0));
        assert!(env.validate().is_ok());
    }

    #[test]
    fn test_envelope_rejects_stratosphere() {
        let env = EnvelopeOptions::default().with_range(0.0, 15_000.0, 100.0);
        assert!(env.validate().unwrap_err().is_domain());
    }

    #[test]
    fn test_envelope_rejects_range_over_point_cap() {
        let fine = EnvelopeOptions::default().with_range(0.0, 10_000.0, 0.25);
        assert_eq!(fine.point_count(), 40_001);
        let err = fine.validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("40001 altitudes"));

        let mut capped = EnvelopeOptions::default().with_range(0.0, 100.0, 10.0);
        capped.max_points = 11;
        assert!(capped.validate().is_ok());
        capped.max_points = 10;
        assert!(capped.validate().is_err());
    }

    #[test]
    fn test_envelope_rejects_full_margin() {
        let env = EnvelopeOptions::default().with_safety_margin(1.0);
        assert!(env.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_options_roundtrip_defaults() {
        let options: AnalysisOptions = serde_json::from_str(r#"{"method": "empirical_closed_form"}"#).unwrap();
        assert_eq!(options.method, FlutterMethod::EmpiricalClosedForm);
        assert_eq!(options.bending_modes, 2);
        assert_eq!(options.sweep, SweepOptions::default());
    }
}
