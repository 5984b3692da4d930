//! Fin Flutter - flutter prediction for composite rocket fins
//!
//! This library estimates the airspeed at which a layered rocket fin flutters:
//! - Homogenization of a core + symmetric outer layers into one equivalent section
//! - Rayleigh-Ritz bending-torsion modal assembly
//! - Theodorsen unsteady aerodynamics
//! - Generalized eigenvalue sweep over reduced frequency
//! - Martin's closed-form estimate
//! - ISA troposphere and velocity-vs-altitude envelopes
//!
//! ## Example
//! ```rust
//! use fin_flutter::prelude::*;
//!
//! // Carbon fibre core, 0.2 m root chord, 0.06 m tip chord, 0.1 m span
//! let config = FinConfig {
//!     core_layer: MaterialLayer::carbon_fiber().with_planform(0.2, 0.06, 0.1, 0.0),
//!     analysis: AnalysisOptions::empirical(),
//!     ..FinConfig::default()
//! };
//!
//! let model = FinModel::new(config).unwrap();
//! let report = model.analyze_at(1000.0).unwrap();
//! println!("{report}");
//! ```

pub mod aero;
pub mod analysis;
pub mod atmosphere;
pub mod config;
pub mod elements;
pub mod envelope;
pub mod error;
pub mod flutter;
pub mod math;
pub mod modal;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, EnvelopeOptions, FlutterMethod, SweepOptions};
    pub use crate::atmosphere::AirState;
    pub use crate::config::FinConfig;
    pub use crate::elements::{EquivalentFin, Layup, MaterialLayer, SectionProperties};
    pub use crate::envelope::{Envelope, EnvelopePoint};
    pub use crate::error::{FlutterError, FlutterResult};
    pub use crate::flutter::{EmpiricalClosedForm, FlutterModel, FlutterPoint, ModalEigenproblem};
    pub use crate::model::FinModel;
    pub use crate::results::FlutterReport;
}
