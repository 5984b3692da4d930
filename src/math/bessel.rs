//! Modified Bessel functions of the second kind for complex arguments
//!
//! K₀ and K₁ are evaluated with the ascending power series for |z| ≤ 10 and the
//! Hankel asymptotic expansion beyond. Both branches agree to better than 1e-9
//! at the crossover. The argument must lie in the right half-plane closure
//! (Re z ≥ 0, z ≠ 0), which covers the imaginary axis used by Theodorsen's function.

use std::f64::consts::PI;

use super::Complex;

/// Euler-Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// |z| at or below which the power series is used
const SERIES_LIMIT: f64 = 10.0;

const MAX_TERMS: usize = 200;

/// K₀(z)
pub fn k0(z: Complex<f64>) -> Complex<f64> {
    k0_k1(z).0
}

/// K₁(z)
pub fn k1(z: Complex<f64>) -> Complex<f64> {
    k0_k1(z).1
}

/// K₀(z) and K₁(z) evaluated together
pub fn k0_k1(z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    if z.norm() <= SERIES_LIMIT {
        series(z)
    } else {
        (asymptotic(0.0, z), asymptotic(1.0, z))
    }
}

/// Ascending series
///
/// K₀(z) = -(ln(z/2) + γ)·I₀(z) + Σ Hₘ·tₘ
/// K₁(z) = 1/z + (ln(z/2) + γ)·I₁(z) - ½·Σ (z/2)·tₘ·(2Hₘ + 1/(m+1))
///
/// with tₘ = (z²/4)ᵐ/(m!)² and Hₘ the m-th harmonic number.
fn series(z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let quarter_z2 = z * z * 0.25;
    let log_term = (z * 0.5).ln() + EULER_GAMMA;

    let mut t0 = Complex::new(1.0, 0.0);
    let mut t1 = z * 0.5;
    let mut harmonic = 0.0;

    let mut i0 = t0;
    let mut i1 = t1;
    let mut s0 = Complex::new(0.0, 0.0);
    let mut s1 = t1;

    for m in 1..MAX_TERMS {
        let mf = m as f64;
        t0 *= quarter_z2 / (mf * mf);
        t1 *= quarter_z2 / (mf * (mf + 1.0));
        harmonic += 1.0 / mf;

        i0 += t0;
        i1 += t1;
        s0 += t0 * harmonic;
        s1 += t1 * (2.0 * harmonic + 1.0 / (mf + 1.0));

        if t0.norm() <= f64::EPSILON * i0.norm().max(1.0) * 1e-3
            && t1.norm() <= f64::EPSILON * i1.norm().max(1.0) * 1e-3
        {
            break;
        }
    }

    let k0 = -log_term * i0 + s0;
    let k1 = z.inv() + log_term * i1 - s1 * 0.5;
    (k0, k1)
}

/// Hankel asymptotic expansion
///
/// K_ν(z) ≈ √(π/2z)·e⁻ᶻ·Σ aₘ(ν)/zᵐ, truncated at the smallest term.
fn asymptotic(nu: f64, z: Complex<f64>) -> Complex<f64> {
    let mu = 4.0 * nu * nu;
    let mut term = Complex::new(1.0, 0.0);
    let mut sum = term;

    for m in 1..MAX_TERMS {
        let odd = (2 * m - 1) as f64;
        let next = term * (mu - odd * odd) / (z * (8.0 * m as f64));
        if next.norm() >= term.norm() {
            break;
        }
        term = next;
        sum += term;
        if term.norm() <= f64::EPSILON * sum.norm() {
            break;
        }
    }

    (Complex::new(PI, 0.0) / (z * 2.0)).sqrt() * (-z).exp() * sum
}
