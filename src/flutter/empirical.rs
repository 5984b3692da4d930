//! Martin's closed-form flutter estimate (NACA TN 4197)

use std::f64::consts::PI;

use super::{FlutterModel, FlutterPoint};
use crate::atmosphere::{AirState, GAMMA, SEA_LEVEL_PRESSURE};
use crate::elements::EquivalentFin;
use crate::error::{FlutterError, FlutterResult};

/// Closed-form flutter speed from planform ratios and shear modulus
///
/// V_f = a·√( G / ( D_N·AR³ / ((t/c_r)³·(AR+2)) · (λ+1)/2 · p/p₀ ) )
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalClosedForm {
    shear_modulus: f64,
    thickness_ratio: f64,
    aspect_ratio: f64,
    taper_ratio: f64,
    denominator_constant: f64,
}

/// Chordwise center-of-pressure offset ε = C_x/c_r - ¼
fn center_of_pressure_offset(fin: &EquivalentFin) -> f64 {
    let (ct, cr, m) = (fin.tip_chord, fin.root_chord, fin.sweep_length);
    let cx = (2.0 * ct * m + ct * ct + m * cr + ct * cr + cr * cr) / (3.0 * (ct + cr));
    cx / cr - 0.25
}

impl EmpiricalClosedForm {
    pub fn new(fin: &EquivalentFin) -> FlutterResult<Self> {
        let epsilon = center_of_pressure_offset(fin);
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(FlutterError::invalid(
                "center_of_pressure_offset",
                epsilon,
                "planform must place the center of pressure aft of the quarter chord",
            ));
        }

        Ok(Self {
            shear_modulus: fin.shear_modulus,
            thickness_ratio: fin.thickness_ratio(),
            aspect_ratio: fin.aspect_ratio(),
            taper_ratio: fin.taper_ratio(),
            denominator_constant: 24.0 * epsilon * GAMMA * SEA_LEVEL_PRESSURE / PI,
        })
    }

    /// Flutter speed in m/s for the given speed of sound and static pressure
    pub fn flutter_speed(&self, speed_of_sound: f64, pressure: f64) -> f64 {
        let ar = self.aspect_ratio;
        let geometry = self.denominator_constant * ar.powi(3) / (self.thickness_ratio.powi(3) * (ar + 2.0));
        let loading = geometry * (self.taper_ratio + 1.0) / 2.0 * pressure / SEA_LEVEL_PRESSURE;
        speed_of_sound * (self.shear_modulus / loading).sqrt()
    }
}

impl FlutterModel for EmpiricalClosedForm {
    fn name(&self) -> &'static str {
        "empirical closed form"
    }

    fn predict(&self, air: &AirState) -> FlutterResult<FlutterPoint> {
        let speed = self.flutter_speed(air.speed_of_sound, air.pressure);
        if !(speed.is_finite() && speed > 0.0) {
            return Err(FlutterError::Configuration(format!(
                "closed-form flutter speed {speed} at h = {} m (air pressure {} Pa and speed of sound {} m/s must be > 0)",
                air.altitude, air.pressure, air.speed_of_sound
            )));
        }
        log::debug!("h = {:.0} m: V_f = {speed:.2} m/s", air.altitude);
        Ok(FlutterPoint {
            flutter_speed: Some(speed),
            ..FlutterPoint::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_fin() -> EquivalentFin {
        EquivalentFin {
            root_chord: 0.2,
            tip_chord: 0.06,
            span: 0.1,
            sweep_length: 0.0,
            shear_modulus: 5e9,
            thickness: 0.003,
        }
    }

    #[test]
    fn test_reference_fin_sea_level() {
        let model = EmpiricalClosedForm::new(&reference_fin()).unwrap();
        let point = model.predict(&AirState::sea_level()).unwrap();
        assert_relative_eq!(point.flutter_speed.unwrap(), 398.2327, max_relative = 1e-5);
        assert_eq!(point.mode_index, None);
    }

    #[test]
    fn test_thin_air_raises_flutter_speed() {
        let model = EmpiricalClosedForm::new(&reference_fin()).unwrap();
        let high = model.predict(&AirState::at_altitude(10_000.0).unwrap()).unwrap();
        assert_relative_eq!(high.flutter_speed.unwrap(), 686.0911, max_relative = 1e-5);
    }

    #[test]
    fn test_stiffer_fin_flutters_faster() {
        let soft = EmpiricalClosedForm::new(&reference_fin()).unwrap();
        let stiff = EmpiricalClosedForm::new(&EquivalentFin {
            shear_modulus: 20e9,
            ..reference_fin()
        })
        .unwrap();
        let air = AirState::sea_level();
        let ratio = stiff.flutter_speed(air.speed_of_sound, air.pressure)
            / soft.flutter_speed(air.speed_of_sound, air.pressure);
        assert_relative_eq!(ratio, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_forward_swept_planform_rejected() {
        let fin = EquivalentFin {
            root_chord: 0.2,
            tip_chord: 0.0,
            sweep_length: -0.15,
            ..reference_fin()
        };
        assert!(EmpiricalClosedForm::new(&fin).unwrap_err().is_configuration());
    }

    #[test]
    fn test_vacuum_rejected() {
        let model = EmpiricalClosedForm::new(&reference_fin()).unwrap();
        let vacuum = AirState {
            pressure: 0.0,
            ..AirState::sea_level()
        };
        let err = model.predict(&vacuum).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("pressure 0 Pa"));

        let silent = AirState {
            speed_of_sound: 0.0,
            ..AirState::sea_level()
        };
        assert!(model.predict(&silent).unwrap_err().is_configuration());
    }
}
