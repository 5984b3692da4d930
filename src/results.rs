//! Result types for flutter analysis

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::FlutterMethod;
use crate::atmosphere::AirState;
use crate::elements::SectionProperties;
use crate::flutter::FlutterPoint;

/// Outcome of one flutter analysis
///
/// An absent `flutter_speed_m_s` means the sweep finished without finding an
/// unstable mode, which is a valid result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlutterReport {
    /// Formulation used
    pub method: FlutterMethod,
    /// Flutter speed in m/s
    pub flutter_speed_m_s: Option<f64>,
    /// 1-based index of the unstable mode
    pub flutter_mode_index: Option<usize>,
    /// Reduced frequency at onset
    pub reduced_frequency: Option<f64>,
    /// Circular frequency at onset in rad/s
    pub flutter_frequency_rad_s: Option<f64>,
    /// Sweep samples skipped after a failed eigen-decomposition
    pub skipped_samples: usize,
    /// Bending stiffness in N·m²
    #[serde(rename = "EI")]
    pub ei: f64,
    /// Torsional stiffness in N·m²
    #[serde(rename = "GJ")]
    pub gj: f64,
    /// Mass per unit span in kg/m
    pub mass_per_span: f64,
    /// Spanwise mass moment of inertia in kg·m²/m
    pub spanwise_inertia: f64,
    /// Semichord in m
    pub semichord: f64,
    /// Elastic-axis fraction
    pub elastic_axis: f64,
    /// Span in m
    pub span: f64,
    /// Bending trial functions used
    pub bending_modes: usize,
    /// Torsion trial functions used
    pub torsion_modes: usize,
    /// Altitude of the analysis in m
    pub altitude_m: f64,
    /// Air density at that altitude in kg/m³
    pub air_density: f64,
}

impl FlutterReport {
    pub fn new(
        method: FlutterMethod,
        point: FlutterPoint,
        section: &SectionProperties,
        air: &AirState,
        modes: (usize, usize),
    ) -> Self {
        Self {
            method,
            flutter_speed_m_s: point.flutter_speed,
            flutter_mode_index: point.mode_index,
            reduced_frequency: point.reduced_frequency,
            flutter_frequency_rad_s: point.frequency,
            skipped_samples: point.skipped_samples,
            ei: section.ei,
            gj: section.gj,
            mass_per_span: section.mass_per_span,
            spanwise_inertia: section.spanwise_inertia,
            semichord: section.semichord,
            elastic_axis: section.elastic_axis,
            span: section.span,
            bending_modes: modes.0,
            torsion_modes: modes.1,
            altitude_m: air.altitude,
            air_density: air.density,
        }
    }

    pub fn flutter_found(&self) -> bool {
        self.flutter_speed_m_s.is_some()
    }
}

impl fmt::Display for FlutterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method: {}", self.method.name())?;
        writeln!(
            f,
            "Altitude: {:.0} m (air density {:.4} kg/m^3)",
            self.altitude_m, self.air_density
        )?;
        match (self.flutter_speed_m_s, self.flutter_mode_index) {
            (Some(speed), Some(mode)) => writeln!(f, "Flutter speed: {speed:.4} m/s (mode {mode})")?,
            (Some(speed), None) => writeln!(f, "Flutter speed: {speed:.4} m/s")?,
            _ => writeln!(f, "Flutter speed: no flutter found")?,
        }
        if let (Some(k), Some(omega)) = (self.reduced_frequency, self.flutter_frequency_rad_s) {
            writeln!(f, "Reduced frequency: {k:.3}, circular frequency: {omega:.4} rad/s")?;
        }
        if self.skipped_samples > 0 {
            writeln!(f, "Skipped samples: {} (eigenvalue solve failed)", self.skipped_samples)?;
        }
        writeln!(f, "EI: {:.4e} N*m^2", self.ei)?;
        writeln!(f, "GJ: {:.4e} N*m^2", self.gj)?;
        writeln!(f, "Mass per span: {:.4} kg/m", self.mass_per_span)?;
        writeln!(f, "Spanwise inertia: {:.4e} kg*m^2/m", self.spanwise_inertia)?;
        write!(
            f,
            "Semichord: {:.4} m, elastic axis: {}, span: {:.4} m",
            self.semichord, self.elastic_axis, self.span
        )
    }
}
