//! Material layers of a fin layup

use serde::{Deserialize, Serialize};

use crate::error::{FlutterError, FlutterResult};

/// One layer of a fin layup: a trapezoidal planform of a single material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    /// Material label
    #[serde(default)]
    pub material: String,
    /// Modulus of elasticity (Young's modulus) in Pa
    #[serde(alias = "E")]
    pub e: f64,
    /// Shear modulus in Pa
    #[serde(alias = "G")]
    pub g: f64,
    /// Layer thickness in m
    pub thickness: f64,
    /// Root chord in m
    pub root_chord: f64,
    /// Tip chord in m
    pub tip_chord: f64,
    /// Span (root to tip height) in m
    pub span: f64,
    /// Leading-edge sweep length in m
    #[serde(default)]
    pub sweep_length: f64,
    /// Density in kg/m³
    pub density: f64,
    /// Poisson's ratio
    #[serde(default)]
    pub poisson_ratio: f64,
}

impl MaterialLayer {
    /// Create a layer with the given moduli, thickness and density.
    ///
    /// Planform defaults to zero and must be set with [`MaterialLayer::with_planform`].
    pub fn new(material: &str, e: f64, g: f64, thickness: f64, density: f64) -> Self {
        Self {
            material: material.to_string(),
            e,
            g,
            thickness,
            root_chord: 0.0,
            tip_chord: 0.0,
            span: 0.0,
            sweep_length: 0.0,
            density,
            poisson_ratio: 0.0,
        }
    }

    /// Set the trapezoidal planform
    pub fn with_planform(mut self, root_chord: f64, tip_chord: f64, span: f64, sweep_length: f64) -> Self {
        self.root_chord = root_chord;
        self.tip_chord = tip_chord;
        self.span = span;
        self.sweep_length = sweep_length;
        self
    }

    /// Set the layer thickness
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set Poisson's ratio
    pub fn with_poisson_ratio(mut self, nu: f64) -> Self {
        self.poisson_ratio = nu;
        self
    }

    /// Woven carbon fibre / epoxy laminate
    pub fn carbon_fiber() -> Self {
        Self::new("Carbon Fiber", 70e9, 5e9, 0.003, 1600.0).with_poisson_ratio(0.1)
    }

    /// E-glass / epoxy laminate
    pub fn fiberglass() -> Self {
        Self::new("Fiberglass", 20e9, 3.8e9, 0.0005, 1850.0).with_poisson_ratio(0.13)
    }

    /// Aluminium 6061-T6 sheet
    pub fn aluminum() -> Self {
        Self::new("Aluminium", 68.9e9, 26e9, 0.002, 2700.0).with_poisson_ratio(0.33)
    }

    /// Aircraft birch plywood
    pub fn plywood() -> Self {
        Self::new("Birch Plywood", 12.4e9, 0.62e9, 0.003, 680.0).with_poisson_ratio(0.3)
    }

    /// Mean of root and tip chord
    pub fn average_chord(&self) -> f64 {
        0.5 * (self.root_chord + self.tip_chord)
    }

    /// Planform area ½(root + tip)·span
    pub fn planform_area(&self) -> f64 {
        self.average_chord() * self.span
    }

    /// Check every physical property of the layer.
    ///
    /// `label` prefixes field names in the error message, e.g. `core_layer`.
    pub fn validate(&self, label: &str) -> FlutterResult<()> {
        let positive = [
            ("thickness", self.thickness),
            ("root_chord", self.root_chord),
            ("tip_chord", self.tip_chord),
            ("span", self.span),
            ("density", self.density),
            ("e", self.e),
            ("g", self.g),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlutterError::invalid(
                    &format!("{label}.{field}"),
                    value,
                    "must be finite and > 0",
                ));
            }
        }

        if !(self.sweep_length.is_finite() && self.sweep_length >= 0.0) {
            return Err(FlutterError::invalid(
                &format!("{label}.sweep_length"),
                self.sweep_length,
                "must be finite and >= 0",
            ));
        }

        if !(self.poisson_ratio > -1.0 && self.poisson_ratio < 0.5) {
            return Err(FlutterError::invalid(
                &format!("{label}.poisson_ratio"),
                self.poisson_ratio,
                "must lie in (-1, 0.5)",
            ));
        }

        Ok(())
    }
}

impl Default for MaterialLayer {
    fn default() -> Self {
        Self::carbon_fiber().with_planform(0.2, 0.06, 0.1, 0.0)
    }
}
