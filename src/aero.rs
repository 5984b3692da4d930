//! Unsteady aerodynamics: Theodorsen's function and the frequency-domain
//! aerodynamic matrices of the modal formulation

use std::f64::consts::PI;

use crate::error::{FlutterError, FlutterResult};
use crate::math::{self, bessel, CMat, Complex};
use crate::modal::ModalMatrices;

/// Theodorsen's function C(k) = K₁(ik) / (K₀(ik) + K₁(ik))
///
/// C → 1 as k → 0⁺ and C → ½ as k → ∞. The function is singular at k = 0, so
/// non-positive or non-finite reduced frequencies are rejected.
pub fn theodorsen(k: f64) -> FlutterResult<Complex<f64>> {
    if !(k.is_finite() && k > 0.0) {
        return Err(FlutterError::ReducedFrequencyOutOfRange(k));
    }
    let (k0, k1) = bessel::k0_k1(Complex::new(0.0, k));
    Ok(k1 / (k0 + k1))
}

/// Aerodynamic matrix Â(k) = A(k) + B(k) + Ĉ(k) in generalized coordinates
///
/// # Arguments
/// * `modal` - Trial-function integral matrices
/// * `b` - Semichord
/// * `a` - Elastic-axis fraction
/// * `k` - Reduced frequency
/// * `c` - Theodorsen's function at `k`
pub fn aerodynamic_matrix(modal: &ModalMatrices, b: f64, a: f64, k: f64, c: Complex<f64>) -> CMat {
    let del = math::to_complex(&modal.del);
    let dmat = math::to_complex(&modal.dmat);
    let cmat = math::to_complex(&modal.cmat);
    let cmat_t = cmat.transpose();
    let zero_nn = CMat::zeros(modal.bending_modes(), modal.bending_modes());
    let zero_mn = CMat::zeros(modal.torsion_modes(), modal.bending_modes());

    let one = Complex::new(1.0, 0.0);
    let scale = |m: &CMat, s: Complex<f64>| m.map(|v| v * s);

    // Aerodynamic stiffness, proportional to k²
    let stiffness = math::block2(
        &del,
        &scale(&cmat, one * (a * b)),
        &scale(&cmat_t, one * (a * b)),
        &scale(&dmat, one * (b * b * (a * a + 0.125))),
    )
    .map(|v| v * (2.0 * PI * b * k * k));

    // Aerodynamic damping, proportional to k·C(k)
    let damping = math::block2(
        &scale(&del, c * 2.0),
        &scale(&cmat, -(one + c * (2.0 * (0.5 - a))) * b),
        &scale(&cmat_t, c * (2.0 * b * (0.5 + a))),
        &scale(&dmat, (one - c * (2.0 * (0.5 + a))) * (b * b * (0.5 - a))),
    )
    .map(|v| v * Complex::new(0.0, -2.0 * PI * k));

    // Circulatory mass-like terms
    let circulatory = math::block2(
        &zero_nn,
        &scale(&cmat, c * -2.0),
        &zero_mn,
        &scale(&dmat, c * (-b * (1.0 + 2.0 * a))),
    )
    .map(|v| v * (-2.0 * PI * b));

    stiffness + damping + circulatory
}
