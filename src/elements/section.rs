//! Section properties of the fin used by the modal formulation

use serde::{Deserialize, Serialize};

use super::{EquivalentFin, Layup};
use crate::error::{FlutterError, FlutterResult};

/// Elastic-axis location as a fraction of the semichord
pub const DEFAULT_ELASTIC_AXIS: f64 = 0.25;

/// Stiffness and inertia properties of a fin section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Bending stiffness Σ Eᵢtᵢ³/12 in N·m²
    pub ei: f64,
    /// Torsional stiffness Σ Gᵢ·c̄·tᵢ³/3 in N·m²
    pub gj: f64,
    /// Mass per unit span m̄ in kg/m
    pub mass_per_span: f64,
    /// Mass moment of inertia per unit span m̄·b² in kg·m²/m
    pub spanwise_inertia: f64,
    /// Average chord c̄ in m
    pub average_chord: f64,
    /// Semichord b = c̄/2 in m
    pub semichord: f64,
    /// Elastic-axis fraction a
    pub elastic_axis: f64,
    /// Span L in m
    pub span: f64,
}

impl SectionProperties {
    /// Derive section properties from a layup and its homogenized fin.
    ///
    /// Chord and span come from the equivalent fin; stiffness and mass sums run
    /// over the listed stack, each layer once.
    pub fn from_layup(layup: &Layup, fin: &EquivalentFin, elastic_axis: f64) -> FlutterResult<Self> {
        if !elastic_axis.is_finite() {
            return Err(FlutterError::invalid("elastic_axis", elastic_axis, "must be finite"));
        }

        let average_chord = fin.average_chord();
        let semichord = average_chord / 2.0;

        let mass_per_span = layup.stack().map(|l| l.density * l.thickness).sum::<f64>() * average_chord;
        let ei = layup.stack().map(|l| l.e * l.thickness.powi(3) / 12.0).sum::<f64>();
        let gj = layup
            .stack()
            .map(|l| l.g * average_chord * l.thickness.powi(3) / 3.0)
            .sum::<f64>();

        let props = Self {
            ei,
            gj,
            mass_per_span,
            spanwise_inertia: mass_per_span * semichord * semichord,
            average_chord,
            semichord,
            elastic_axis,
            span: fin.span,
        };
        props.validate()?;
        Ok(props)
    }

    fn validate(&self) -> FlutterResult<()> {
        let checks = [
            ("EI", self.ei),
            ("GJ", self.gj),
            ("mass_per_span", self.mass_per_span),
            ("semichord", self.semichord),
            ("span", self.span),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlutterError::invalid(name, value, "section property must be > 0"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::MaterialLayer;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_fin_properties() {
        let core = MaterialLayer::new("Carbon Fiber", 70e9, 5e9, 0.003, 1600.0).with_planform(0.2, 0.06, 0.1, 0.0);
        let layup = Layup::new(core, vec![]);
        let fin = layup.homogenize().unwrap();
        let props = SectionProperties::from_layup(&layup, &fin, DEFAULT_ELASTIC_AXIS).unwrap();

        assert_relative_eq!(props.average_chord, 0.13, epsilon = 1e-12);
        assert_relative_eq!(props.semichord, 0.065, epsilon = 1e-12);
        assert_relative_eq!(props.mass_per_span, 0.624, epsilon = 1e-9);
        assert_relative_eq!(props.ei, 157.5, max_relative = 1e-9);
        assert_relative_eq!(props.gj, 5e9 * 0.13 * 0.003f64.powi(3) / 3.0, max_relative = 1e-9);
        assert_relative_eq!(props.spanwise_inertia, 0.624 * 0.065 * 0.065, max_relative = 1e-9);
    }

    #[test]
    fn test_layers_add_stiffness() {
        let core = MaterialLayer::plywood().with_planform(0.2, 0.06, 0.1, 0.05);
        let skin = MaterialLayer::fiberglass().with_planform(0.2, 0.06, 0.1, 0.05);
        let bare = Layup::new(core.clone(), vec![]);
        let skinned = Layup::new(core, vec![skin]);

        let p_bare = SectionProperties::from_layup(&bare, &bare.homogenize().unwrap(), 0.25).unwrap();
        let p_skin = SectionProperties::from_layup(&skinned, &skinned.homogenize().unwrap(), 0.25).unwrap();

        assert!(p_skin.ei > p_bare.ei);
        assert!(p_skin.mass_per_span > p_bare.mass_per_span);
    }
}
