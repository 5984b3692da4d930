//! Flutter formulations
//!
//! Every formulation implements [`FlutterModel`]: given the air state at one
//! altitude it predicts the airspeed at which the fin flutters, or reports that
//! no flutter was found.

mod empirical;
mod modal;

pub use empirical::EmpiricalClosedForm;
pub use modal::{ModalEigenproblem, ModeStability};

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, FlutterMethod};
use crate::atmosphere::AirState;
use crate::elements::{EquivalentFin, SectionProperties};
use crate::error::FlutterResult;

/// Flutter onset predicted at one air state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlutterPoint {
    /// Flutter speed in m/s, `None` when no flutter was found
    pub flutter_speed: Option<f64>,
    /// 1-based index of the unstable mode
    pub mode_index: Option<usize>,
    /// Reduced frequency at onset
    pub reduced_frequency: Option<f64>,
    /// Circular frequency at onset in rad/s
    pub frequency: Option<f64>,
    /// Reduced-frequency samples skipped after a failed eigen-decomposition
    #[serde(default)]
    pub skipped_samples: usize,
}

impl FlutterPoint {
    /// Outcome of a sweep that never became unstable
    pub fn not_found() -> Self {
        Self::default()
    }
}

/// A formulation that predicts flutter onset from the air state
pub trait FlutterModel {
    /// Short human-readable name of the formulation
    fn name(&self) -> &'static str;

    /// Predict flutter onset in the given air
    fn predict(&self, air: &AirState) -> FlutterResult<FlutterPoint>;
}

impl FlutterMethod {
    /// Build the formulation selected by `options` for a prepared fin
    pub fn build(
        &self,
        fin: &EquivalentFin,
        section: &SectionProperties,
        options: &AnalysisOptions,
    ) -> FlutterResult<Box<dyn FlutterModel>> {
        Ok(match self {
            Self::ModalEigenproblem => Box::new(ModalEigenproblem::new(section, options)?),
            Self::EmpiricalClosedForm => Box::new(EmpiricalClosedForm::new(fin)?),
        })
    }
}
