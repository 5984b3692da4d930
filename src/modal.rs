//! Rayleigh-Ritz modal assembly of the fin's bending-torsion dynamics
//!
//! Bending deflection is expanded in ψᵢ(y) = yⁱ⁺¹ (i = 0..N-1) and torsional
//! rotation in φⱼ(y) = yʲ (j = 0..M-1), with y the spanwise coordinate normalized
//! to [0, 1]. Integrals over the span are evaluated with the trapezoidal rule on
//! evenly spaced stations.

use serde::{Deserialize, Serialize};

use crate::elements::SectionProperties;
use crate::error::{FlutterError, FlutterResult};
use crate::math::{self, Mat, Vec as SpanVec};

/// Trial-function basis and integration grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalBasis {
    /// Number of bending trial functions N
    pub bending_modes: usize,
    /// Number of torsion trial functions M
    pub torsion_modes: usize,
    /// Number of integration stations along the span
    pub stations: usize,
}

impl Default for ModalBasis {
    fn default() -> Self {
        Self {
            bending_modes: 2,
            torsion_modes: 2,
            stations: 101,
        }
    }
}

impl ModalBasis {
    /// Create a basis with the given mode counts and the default grid
    pub fn new(bending_modes: usize, torsion_modes: usize) -> Self {
        Self {
            bending_modes,
            torsion_modes,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FlutterResult<()> {
        if self.bending_modes == 0 {
            return Err(FlutterError::invalid("bending_modes", 0.0, "must be >= 1"));
        }
        if self.torsion_modes == 0 {
            return Err(FlutterError::invalid("torsion_modes", 0.0, "must be >= 1"));
        }
        if self.stations < 2 {
            return Err(FlutterError::invalid("stations", self.stations as f64, "must be >= 2"));
        }
        Ok(())
    }
}

/// Trial-function integral matrices
#[derive(Debug, Clone, PartialEq)]
pub struct ModalMatrices {
    /// ∫ψᵢψⱼ (N x N)
    pub del: Mat,
    /// ∫ψᵢ''ψⱼ'' with each derivative taken in physical span (N x N)
    pub bmat: Mat,
    /// ∫φᵢφⱼ (M x M)
    pub dmat: Mat,
    /// ∫φᵢ'φⱼ' with each derivative taken in physical span (M x M)
    pub tmat: Mat,
    /// ∫ψᵢφⱼ (N x M)
    pub cmat: Mat,
}

/// Bending trial function ψᵢ = yⁱ⁺¹ sampled on `y`
fn bending_shape(i: usize, y: &SpanVec) -> SpanVec {
    y.map(|v| v.powi(i as i32 + 1))
}

/// ψᵢ'' = (i+1)·i·yⁱ⁻¹ / L²
fn bending_curvature(i: usize, y: &SpanVec, span: f64) -> SpanVec {
    if i == 0 {
        return SpanVec::zeros(y.len());
    }
    let coeff = ((i + 1) * i) as f64 / (span * span);
    y.map(|v| coeff * v.powi(i as i32 - 1))
}

/// Torsion trial function φⱼ = yʲ sampled on `y`
fn torsion_shape(j: usize, y: &SpanVec) -> SpanVec {
    y.map(|v| v.powi(j as i32))
}

/// φⱼ' = j·yʲ⁻¹ / L
fn torsion_rate(j: usize, y: &SpanVec, span: f64) -> SpanVec {
    if j == 0 {
        return SpanVec::zeros(y.len());
    }
    let coeff = j as f64 / span;
    y.map(|v| coeff * v.powi(j as i32 - 1))
}

/// Gram matrix ∫fᵢ·gⱼ of two sampled function families
fn gram(f: &[SpanVec], g: &[SpanVec], y: &SpanVec) -> Mat {
    Mat::from_fn(f.len(), g.len(), |i, j| math::trapezoid(&f[i].component_mul(&g[j]), y))
}

impl ModalMatrices {
    /// Assemble the integral matrices for a fin of the given span
    pub fn assemble(basis: &ModalBasis, span: f64) -> FlutterResult<Self> {
        basis.validate()?;
        if !(span.is_finite() && span > 0.0) {
            return Err(FlutterError::invalid("span", span, "must be finite and > 0"));
        }

        let y = math::unit_linspace(basis.stations);
        let n = basis.bending_modes;
        let m = basis.torsion_modes;

        let psi: std::vec::Vec<SpanVec> = (0..n).map(|i| bending_shape(i, &y)).collect();
        let psi_dd: std::vec::Vec<SpanVec> = (0..n).map(|i| bending_curvature(i, &y, span)).collect();
        let phi: std::vec::Vec<SpanVec> = (0..m).map(|j| torsion_shape(j, &y)).collect();
        let phi_d: std::vec::Vec<SpanVec> = (0..m).map(|j| torsion_rate(j, &y, span)).collect();

        Ok(Self {
            del: gram(&psi, &psi, &y),
            bmat: gram(&psi_dd, &psi_dd, &y),
            dmat: gram(&phi, &phi, &y),
            tmat: gram(&phi_d, &phi_d, &y),
            cmat: gram(&psi, &phi, &y),
        })
    }

    pub fn bending_modes(&self) -> usize {
        self.del.nrows()
    }

    pub fn torsion_modes(&self) -> usize {
        self.dmat.nrows()
    }
}

/// Structural mass and stiffness matrices in generalized coordinates [bending; torsion]
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralMatrices {
    /// M = [[m̄·Del, -m̄ab·Cmat], [-m̄ab·Cmatᵀ, I·Dmat]]
    pub mass: Mat,
    /// K = [[EI·Bmat, 0], [0, GJ·Tmat]]
    pub stiffness: Mat,
}

impl StructuralMatrices {
    pub fn assemble(modal: &ModalMatrices, section: &SectionProperties) -> Self {
        let n = modal.bending_modes();
        let m = modal.torsion_modes();
        let coupling = -section.mass_per_span * section.elastic_axis * section.semichord;

        let mass = math::block2(
            &(&modal.del * section.mass_per_span),
            &(&modal.cmat * coupling),
            &(modal.cmat.transpose() * coupling),
            &(&modal.dmat * section.spanwise_inertia),
        );
        let stiffness = math::block2(
            &(&modal.bmat * section.ei),
            &Mat::zeros(n, m),
            &Mat::zeros(m, n),
            &(&modal.tmat * section.gj),
        );

        Self { mass, stiffness }
    }
}
