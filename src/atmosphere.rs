//! ISA troposphere model

use serde::{Deserialize, Serialize};

use crate::error::{FlutterError, FlutterResult};

/// Sea-level temperature in K
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.16;
/// Sea-level static pressure in Pa
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Temperature lapse rate in K/m
pub const LAPSE_RATE: f64 = 0.0065;
/// Ratio of specific heats for air
pub const GAMMA: f64 = 1.4;
/// Specific gas constant for air in J/(kg·K)
pub const GAS_CONSTANT: f64 = 287.0;
/// Exponent of the pressure-temperature relation
pub const PRESSURE_EXPONENT: f64 = 5.256;
/// Lowest altitude the model accepts in m
pub const MIN_ALTITUDE: f64 = 0.0;
/// Tropopause altitude in m
pub const MAX_ALTITUDE: f64 = 11_000.0;

/// Air properties at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirState {
    /// Geometric altitude in m
    pub altitude: f64,
    /// Static temperature in K
    pub temperature: f64,
    /// Speed of sound in m/s
    pub speed_of_sound: f64,
    /// Static pressure in Pa
    pub pressure: f64,
    /// Density in kg/m³
    pub density: f64,
}

impl AirState {
    /// Air state at `altitude` metres
    pub fn at_altitude(altitude: f64) -> FlutterResult<Self> {
        if !(altitude.is_finite() && (MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude)) {
            return Err(FlutterError::AltitudeOutOfRange {
                altitude,
                min: MIN_ALTITUDE,
                max: MAX_ALTITUDE,
            });
        }

        let temperature = temperature_at(altitude);
        let pressure = pressure_at(temperature);
        Ok(Self {
            altitude,
            temperature,
            speed_of_sound: speed_of_sound(temperature),
            pressure,
            density: pressure / (GAS_CONSTANT * temperature),
        })
    }

    /// Sea-level standard day
    pub fn sea_level() -> Self {
        let temperature = SEA_LEVEL_TEMPERATURE;
        Self {
            altitude: 0.0,
            temperature,
            speed_of_sound: speed_of_sound(temperature),
            pressure: SEA_LEVEL_PRESSURE,
            density: SEA_LEVEL_PRESSURE / (GAS_CONSTANT * temperature),
        }
    }

    /// Override the density, keeping the other properties
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }
}

/// T(h) = 288.16 - 0.0065·h
pub fn temperature_at(altitude: f64) -> f64 {
    SEA_LEVEL_TEMPERATURE - LAPSE_RATE * altitude
}

/// a(T) = √(γ·R·T)
pub fn speed_of_sound(temperature: f64) -> f64 {
    (GAMMA * GAS_CONSTANT * temperature).sqrt()
}

/// p(T) = p₀·(T/T₀)^5.256
pub fn pressure_at(temperature: f64) -> f64 {
    SEA_LEVEL_PRESSURE * (temperature / SEA_LEVEL_TEMPERATURE).powf(PRESSURE_EXPONENT)
}
