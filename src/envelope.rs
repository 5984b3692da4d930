//! Velocity-vs-altitude flutter envelope

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::EnvelopeOptions;
use crate::atmosphere::AirState;
use crate::error::FlutterResult;
use crate::flutter::FlutterModel;

/// Flutter and safe speed at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub altitude_m: f64,
    pub flutter_speed_m_s: Option<f64>,
    /// Flutter speed reduced by the safety margin
    pub safe_speed_m_s: Option<f64>,
}

/// Ordered altitude table of flutter and safe speeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub safety_margin: f64,
    pub points: Vec<EnvelopePoint>,
}

impl Envelope {
    /// Run `model` at every altitude of `options`
    pub fn sweep(model: &dyn FlutterModel, options: &EnvelopeOptions) -> FlutterResult<Self> {
        options.validate()?;
        let keep = 1.0 - options.safety_margin;

        let points = options
            .altitudes()
            .map(|altitude| -> FlutterResult<EnvelopePoint> {
                let air = AirState::at_altitude(altitude)?;
                let point = model.predict(&air)?;
                Ok(EnvelopePoint {
                    altitude_m: altitude,
                    flutter_speed_m_s: point.flutter_speed,
                    safe_speed_m_s: point.flutter_speed.map(|v| v * keep),
                })
            })
            .collect::<FlutterResult<Vec<_>>>()?;

        log::info!(
            "{} envelope: {} altitudes from {} m to {} m",
            model.name(),
            points.len(),
            options.min_altitude,
            points.last().map_or(options.min_altitude, |p| p.altitude_m)
        );

        Ok(Self {
            safety_margin: options.safety_margin,
            points,
        })
    }

    /// Lowest flutter speed over the envelope and its altitude
    pub fn min_flutter_speed(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.flutter_speed_m_s.map(|v| (p.altitude_m, v)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// CSV with header `altitude_m,flutter_speed_m_s,safe_speed_m_s`; absent
    /// speeds are left empty
    pub fn to_csv(&self) -> String {
        let mut out = String::from("altitude_m,flutter_speed_m_s,safe_speed_m_s\n");
        let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        for p in &self.points {
            let _ = writeln!(
                out,
                "{},{},{}",
                p.altitude_m,
                cell(p.flutter_speed_m_s),
                cell(p.safe_speed_m_s)
            );
        }
        out
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> FlutterResult<()> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlutterError;
    use crate::flutter::FlutterPoint;
    use approx::assert_relative_eq;

    /// Flutter speed proportional to the speed of sound
    struct SoundBarrier;

    impl FlutterModel for SoundBarrier {
        fn name(&self) -> &'static str {
            "sound barrier"
        }

        fn predict(&self, air: &AirState) -> FlutterResult<FlutterPoint> {
            Ok(FlutterPoint {
                flutter_speed: Some(air.speed_of_sound),
                ..FlutterPoint::default()
            })
        }
    }

    struct Calm;

    impl FlutterModel for Calm {
        fn name(&self) -> &'static str {
            "calm"
        }

        fn predict(&self, _air: &AirState) -> FlutterResult<FlutterPoint> {
            Ok(FlutterPoint::not_found())
        }
    }

    #[test]
    fn test_safe_speed_applies_margin() {
        let options = EnvelopeOptions::default().with_range(0.0, 1000.0, 500.0);
        let env = Envelope::sweep(&SoundBarrier, &options).unwrap();
        assert_eq!(env.points.len(), 3);
        for p in &env.points {
            assert_relative_eq!(p.safe_speed_m_s.unwrap(), 0.75 * p.flutter_speed_m_s.unwrap());
        }
        let (altitude, speed) = env.min_flutter_speed().unwrap();
        assert_eq!(altitude, 1000.0);
        assert!(speed < 340.3);
    }

    #[test]
    fn test_range_over_point_cap_rejected() {
        let mut options = EnvelopeOptions::default();
        options.max_points = 7;
        let err = Envelope::sweep(&SoundBarrier, &options).unwrap_err();
        assert!(err.is_configuration());

        let options = EnvelopeOptions {
            max_points: 7,
            ..EnvelopeOptions::default().with_range(0.0, 6.0, 1.0)
        };
        let env = Envelope::sweep(&SoundBarrier, &options).unwrap();
        assert_eq!(env.points.len(), 7);
        assert_eq!(env.points[6].altitude_m, 6.0);
    }

    #[test]
    fn test_no_flutter_rows() {
        let options = EnvelopeOptions::default().with_range(0.0, 10.0, 10.0);
        let env = Envelope::sweep(&Calm, &options).unwrap();
        assert_eq!(env.min_flutter_speed(), None);
        assert_eq!(env.to_csv(), "altitude_m,flutter_speed_m_s,safe_speed_m_s\n0,,\n10,,\n");
    }

    #[test]
    fn test_above_troposphere_rejected() {
        let options = EnvelopeOptions::default().with_range(0.0, 12_000.0, 1000.0);
        let err = Envelope::sweep(&SoundBarrier, &options).unwrap_err();
        assert!(matches!(err, FlutterError::AltitudeOutOfRange { altitude, .. } if altitude == 12_000.0));
    }
}
