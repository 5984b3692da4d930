//! Fin structure: material layers, layup homogenization and section properties

mod layup;
mod material;
mod section;

pub use layup::{EquivalentFin, Layup};
pub use material::MaterialLayer;
pub use section::{SectionProperties, DEFAULT_ELASTIC_AXIS};
