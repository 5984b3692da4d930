//! Layup stack and homogenization into an equivalent fin

use serde::{Deserialize, Serialize};

use super::MaterialLayer;
use crate::error::{FlutterError, FlutterResult};

/// An ordered fin layup: a core with additional layers bonded symmetrically to both faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layup {
    /// Core layer (counted once)
    pub core: MaterialLayer,
    /// Outer layers, innermost first (each counted on both faces)
    #[serde(default)]
    pub layers: Vec<MaterialLayer>,
}

/// Homogenized single-section representative of a layup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalentFin {
    /// Root chord in m
    pub root_chord: f64,
    /// Tip chord in m
    pub tip_chord: f64,
    /// Span in m
    pub span: f64,
    /// Sweep length in m
    pub sweep_length: f64,
    /// Equivalent shear modulus in Pa
    pub shear_modulus: f64,
    /// Total thickness in m
    pub thickness: f64,
}

impl Layup {
    /// Create a layup from a core and its outer layers
    pub fn new(core: MaterialLayer, layers: Vec<MaterialLayer>) -> Self {
        Self { core, layers }
    }

    /// Create a layup from a flat stack whose first entry is the core
    pub fn from_stack(stack: Vec<MaterialLayer>) -> FlutterResult<Self> {
        let mut iter = stack.into_iter();
        let core = iter.next().ok_or_else(|| {
            FlutterError::Configuration("insufficient layers: a layup needs at least a core".to_string())
        })?;
        Ok(Self::new(core, iter.collect()))
    }

    /// Every layer of the stack, core first
    pub fn stack(&self) -> impl Iterator<Item = &MaterialLayer> {
        std::iter::once(&self.core).chain(self.layers.iter())
    }

    /// Validate every layer
    pub fn validate(&self) -> FlutterResult<()> {
        self.core.validate("core_layer")?;
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(&format!("additional_layers[{i}]"))?;
        }
        Ok(())
    }

    /// Total laminate thickness t_core + 2·Σtᵢ
    pub fn total_thickness(&self) -> f64 {
        self.core.thickness + 2.0 * self.layers.iter().map(|l| l.thickness).sum::<f64>()
    }

    /// Volume weights of each stack entry: core ×1, outer layers ×2
    fn volume_weights(&self) -> impl Iterator<Item = (&MaterialLayer, f64)> {
        self.stack().enumerate().map(|(i, layer)| {
            let faces = if i == 0 { 1.0 } else { 2.0 };
            (layer, faces * layer.planform_area() * layer.thickness)
        })
    }

    /// Total material volume A_core·t_core + Σ2·Aᵢ·tᵢ
    pub fn total_volume(&self) -> f64 {
        self.volume_weights().map(|(_, w)| w).sum()
    }

    /// Collapse the stack into one equivalent section.
    ///
    /// Shear modulus and every planform scalar are volume-weighted averages over
    /// the whole stack; thickness is the total laminate thickness.
    pub fn homogenize(&self) -> FlutterResult<EquivalentFin> {
        let volume = self.total_volume();
        if !(volume.is_finite() && volume > 0.0) {
            return Err(FlutterError::invalid(
                "layup total volume",
                volume,
                "degenerate layup, volume must be > 0",
            ));
        }

        let weighted = |attr: fn(&MaterialLayer) -> f64| -> f64 {
            self.volume_weights().map(|(layer, w)| attr(layer) * w).sum::<f64>() / volume
        };

        Ok(EquivalentFin {
            root_chord: weighted(|l| l.root_chord),
            tip_chord: weighted(|l| l.tip_chord),
            span: weighted(|l| l.span),
            sweep_length: weighted(|l| l.sweep_length),
            shear_modulus: weighted(|l| l.g),
            thickness: self.total_thickness(),
        })
    }
}

impl EquivalentFin {
    /// Mean of root and tip chord
    pub fn average_chord(&self) -> f64 {
        0.5 * (self.root_chord + self.tip_chord)
    }

    /// Planform area of one fin
    pub fn planform_area(&self) -> f64 {
        self.average_chord() * self.span
    }

    /// Aspect ratio span² / area
    pub fn aspect_ratio(&self) -> f64 {
        self.span * self.span / self.planform_area()
    }

    /// Taper ratio tip / root
    pub fn taper_ratio(&self) -> f64 {
        self.tip_chord / self.root_chord
    }

    /// Thickness-to-root-chord ratio
    pub fn thickness_ratio(&self) -> f64 {
        self.thickness / self.root_chord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layer(root: f64, tip: f64, span: f64, sweep: f64, g: f64, t: f64) -> MaterialLayer {
        MaterialLayer::new("test", 10e9, g, t, 1500.0).with_planform(root, tip, span, sweep)
    }

    #[test]
    fn test_single_layer_is_identity() {
        let core = layer(0.1905, 0.0635, 0.0762, 0.1088, 1e8, 0.002);
        let fin = Layup::new(core.clone(), vec![]).homogenize().unwrap();

        assert_relative_eq!(fin.root_chord, core.root_chord, max_relative = 1e-12);
        assert_relative_eq!(fin.tip_chord, core.tip_chord, max_relative = 1e-12);
        assert_relative_eq!(fin.span, core.span, max_relative = 1e-12);
        assert_relative_eq!(fin.sweep_length, core.sweep_length, max_relative = 1e-12);
        assert_relative_eq!(fin.shear_modulus, core.g, max_relative = 1e-12);
        assert_eq!(fin.thickness, core.thickness);
    }

    #[test]
    fn test_three_layer_blend() {
        let core = layer(0.1905, 0.0635, 0.0762, 0.1088, 1e8, 0.002);
        let l1 = layer(0.195, 0.065, 0.077, 0.11, 4e9, 0.0005);
        let l2 = layer(0.188, 0.061, 0.075, 0.107, 5e9, 0.00025);
        let layup = Layup::new(core.clone(), vec![l1.clone(), l2.clone()]);
        let fin = layup.homogenize().unwrap();

        assert_eq!(fin.thickness, core.thickness + 2.0 * (l1.thickness + l2.thickness));

        let v0 = core.planform_area() * core.thickness;
        let v1 = 2.0 * l1.planform_area() * l1.thickness;
        let v2 = 2.0 * l2.planform_area() * l2.thickness;
        let v = v0 + v1 + v2;
        assert_relative_eq!(layup.total_volume(), v, max_relative = 1e-12);

        let g_eq = (core.g * v0 + l1.g * v1 + l2.g * v2) / v;
        assert_relative_eq!(fin.shear_modulus, g_eq, max_relative = 1e-12);

        let root_eq = (core.root_chord * v0 + l1.root_chord * v1 + l2.root_chord * v2) / v;
        assert_relative_eq!(fin.root_chord, root_eq, max_relative = 1e-12);

        // Blended geometry sits between the extremes of the stack
        assert!(fin.span > 0.075 && fin.span < 0.077);
        assert!(fin.shear_modulus > core.g && fin.shear_modulus < l2.g);
    }

    #[test]
    fn test_empty_stack_rejected() {
        let err = Layup::from_stack(vec![]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_zero_volume_rejected() {
        let core = layer(0.0, 0.0, 0.1, 0.0, 1e9, 0.002);
        let err = Layup::new(core, vec![]).homogenize().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_derived_ratios() {
        let fin = EquivalentFin {
            root_chord: 0.2,
            tip_chord: 0.1,
            span: 0.15,
            sweep_length: 0.05,
            shear_modulus: 5e9,
            thickness: 0.003,
        };
        assert_relative_eq!(fin.taper_ratio(), 0.5);
        assert_relative_eq!(fin.aspect_ratio(), 0.15 * 0.15 / (0.15 * 0.15), epsilon = 1e-12);
        assert_relative_eq!(fin.thickness_ratio(), 0.015, epsilon = 1e-15);
    }
}
