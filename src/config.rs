//! Fin configuration loaded from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, EnvelopeOptions};
use crate::elements::{Layup, MaterialLayer};
use crate::error::{FlutterError, FlutterResult};

/// Complete input for one fin analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinConfig {
    /// Outer diameter of the body tube in m
    pub body_tube_outer_diameter: f64,
    /// Number of fins around the body tube
    pub number_of_fins: u32,
    pub core_layer: MaterialLayer,
    /// Layers bonded to both faces of the core, innermost first
    #[serde(default)]
    pub additional_layers: Vec<MaterialLayer>,
    #[serde(default)]
    pub analysis: AnalysisOptions,
    #[serde(default)]
    pub envelope: EnvelopeOptions,
}

impl Default for FinConfig {
    fn default() -> Self {
        Self {
            body_tube_outer_diameter: 0.08,
            number_of_fins: 4,
            core_layer: MaterialLayer::default(),
            additional_layers: Vec::new(),
            analysis: AnalysisOptions::default(),
            envelope: EnvelopeOptions::default(),
        }
    }
}

impl FinConfig {
    pub fn from_json_str(json: &str) -> FlutterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> FlutterResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> FlutterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The layup described by the core and additional layers
    pub fn layup(&self) -> Layup {
        Layup::new(self.core_layer.clone(), self.additional_layers.clone())
    }

    /// Reject invalid inputs before any numerical work
    pub fn validate(&self) -> FlutterResult<()> {
        if !(self.body_tube_outer_diameter.is_finite() && self.body_tube_outer_diameter > 0.0) {
            return Err(FlutterError::invalid(
                "body_tube_outer_diameter",
                self.body_tube_outer_diameter,
                "must be finite and > 0",
            ));
        }
        if self.number_of_fins == 0 {
            return Err(FlutterError::invalid("number_of_fins", 0.0, "must be >= 1"));
        }
        self.layup().validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FlutterMethod;

    const MINIMAL: &str = r#"{
        "body_tube_outer_diameter": 0.08,
        "number_of_fins": 4,
        "core_layer": {
            "material": "Carbon Fiber",
            "E": 70e9,
            "G": 5e9,
            "thickness": 0.003,
            "root_chord": 0.2,
            "tip_chord": 0.06,
            "span": 0.1,
            "sweep_length": 0.0,
            "density": 1600,
            "poisson_ratio": 0.3
        }
    }"#;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = FinConfig::from_json_str(MINIMAL).unwrap();
        assert_eq!(config.core_layer.e, 70e9);
        assert!(config.additional_layers.is_empty());
        assert_eq!(config.analysis, AnalysisOptions::default());
        assert_eq!(config.envelope, EnvelopeOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analysis_section_overrides() {
        let json = MINIMAL.trim_end().trim_end_matches('}').to_string()
            + r#", "analysis": {"method": "empirical_closed_form", "altitude": 500}}"#;
        let config = FinConfig::from_json_str(&json).unwrap();
        assert_eq!(config.analysis.method, FlutterMethod::EmpiricalClosedForm);
        assert_eq!(config.analysis.altitude, 500.0);
    }

    #[test]
    fn test_zero_fins_rejected() {
        let config = FinConfig {
            number_of_fins: 0,
            ..FinConfig::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_negative_layer_thickness_rejected() {
        let mut config = FinConfig::default();
        config.additional_layers.push(MaterialLayer::fiberglass().with_thickness(-0.001));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("additional_layers[0]"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = FinConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, FlutterError::Serialization(_)));
    }

    #[test]
    fn test_pretty_json_reloads() {
        let config = FinConfig::default();
        let reloaded = FinConfig::from_json_str(&config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reloaded.number_of_fins, 4);
        assert_eq!(reloaded.core_layer.material, config.core_layer.material);
        assert_eq!(reloaded.analysis.method, config.analysis.method);
    }
}
