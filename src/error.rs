//! Error types for the flutter solver

use thiserror::Error;

/// Main error type for flutter analysis
#[derive(Error, Debug)]
pub enum FlutterError {
    /// Rejected input, raised before any numerical work starts
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Eigen-decomposition failure at one reduced-frequency sample
    #[error("Eigenvalue solve failed at k = {k:.4}: {reason}")]
    Numerical { k: f64, reason: String },

    #[error("Altitude {altitude} m outside the troposphere model range [{min}, {max}] m")]
    AltitudeOutOfRange { altitude: f64, min: f64, max: f64 },

    #[error("Reduced frequency {0} outside the valid sweep domain (k must be finite and > 0)")]
    ReducedFrequencyOutOfRange(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FlutterError {
    /// Shorthand for a configuration error naming the offending field and value
    pub(crate) fn invalid(field: &str, value: f64, requirement: &str) -> Self {
        Self::Configuration(format!("{field} = {value} ({requirement})"))
    }

    /// True for errors raised while validating inputs
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// True for errors raised because an input fell outside a model's valid domain
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::AltitudeOutOfRange { .. } | Self::ReducedFrequencyOutOfRange(_)
        )
    }
}

/// Result type for flutter operations
pub type FlutterResult<T> = Result<T, FlutterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_names_field() {
        let err = FlutterError::invalid("core_layer.span", -0.1, "must be > 0");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("core_layer.span = -0.1"));
    }

    #[test]
    fn test_domain_classification() {
        assert!(FlutterError::ReducedFrequencyOutOfRange(0.0).is_domain());
        let err = FlutterError::AltitudeOutOfRange { altitude: 12000.0, min: 0.0, max: 11000.0 };
        assert!(err.is_domain());
        assert!(!err.is_configuration());
    }
}
