//! Numerical utilities for the flutter formulation

pub mod bessel;

use nalgebra::linalg::Schur;
use nalgebra::{DMatrix, DVector, Scalar};

pub use nalgebra::Complex;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type CMat = DMatrix<Complex<f64>>;

/// `n` evenly spaced points on [0, 1], both ends included
pub fn unit_linspace(n: usize) -> Vec {
    if n < 2 {
        return Vec::zeros(n);
    }
    let last = (n - 1) as f64;
    Vec::from_fn(n, |i, _| i as f64 / last)
}

/// Trapezoidal integral of samples `f` over abscissae `x`
pub fn trapezoid(f: &Vec, x: &Vec) -> f64 {
    debug_assert_eq!(f.len(), x.len());
    (1..x.len())
        .map(|i| (x[i] - x[i - 1]) * (f[i] + f[i - 1]) / 2.0)
        .sum()
}

/// Assemble a 2x2 block matrix [[a11, a12], [a21, a22]]
///
/// # Arguments
/// * `a11` - Upper-left block (n x n)
/// * `a12` - Upper-right block (n x m)
/// * `a21` - Lower-left block (m x n)
/// * `a22` - Lower-right block (m x m)
pub fn block2<T: Scalar>(
    a11: &DMatrix<T>,
    a12: &DMatrix<T>,
    a21: &DMatrix<T>,
    a22: &DMatrix<T>,
) -> DMatrix<T> {
    let n = a11.nrows();
    let m = a22.nrows();
    debug_assert_eq!(a12.shape(), (n, m));
    debug_assert_eq!(a21.shape(), (m, n));

    DMatrix::from_fn(n + m, n + m, |i, j| match (i < n, j < n) {
        (true, true) => a11[(i, j)].clone(),
        (true, false) => a12[(i, j - n)].clone(),
        (false, true) => a21[(i - n, j)].clone(),
        (false, false) => a22[(i - n, j - n)].clone(),
    })
}

/// Promote a real matrix to a complex one
pub fn to_complex(m: &Mat) -> CMat {
    m.map(|v| Complex::new(v, 0.0))
}

/// Eigenvalues λ of the generalized problem K·x = λ·B·x
///
/// The problem is reduced to the standard form (B⁻¹K)·x = λ·x with an LU solve
/// and the eigenvalues are read off a complex Schur decomposition.
///
/// # Arguments
/// * `k` - Left-hand matrix
/// * `b` - Right-hand matrix, must be nonsingular
/// * `max_iterations` - Iteration limit for the Schur decomposition (0 = no limit)
pub fn generalized_eigenvalues(
    k: &CMat,
    b: &CMat,
    max_iterations: usize,
) -> Result<std::vec::Vec<Complex<f64>>, String> {
    if k.shape() != b.shape() || !k.is_square() {
        return Err(format!(
            "dimension mismatch: K is {:?}, B is {:?}",
            k.shape(),
            b.shape()
        ));
    }

    let a = b
        .clone()
        .lu()
        .solve(k)
        .ok_or_else(|| "right-hand matrix is singular".to_string())?;

    if a.iter().any(|v| !(v.re.is_finite() && v.im.is_finite())) {
        return Err("reduced matrix contains non-finite entries".to_string());
    }

    let schur = Schur::try_new(a, f64::EPSILON, max_iterations)
        .ok_or_else(|| format!("Schur decomposition did not converge in {max_iterations} iterations"))?;
    let (_, t) = schur.unpack();

    Ok(quasi_triangular_eigenvalues(&t))
}

/// Eigenvalues of an upper quasi-triangular matrix
///
/// Diagonal entries are read directly; any 2x2 block left on the diagonal is
/// solved with the quadratic formula.
fn quasi_triangular_eigenvalues(t: &CMat) -> std::vec::Vec<Complex<f64>> {
    let n = t.nrows();
    let scale = t.iter().map(|v| v.norm()).fold(0.0, f64::max);
    let negligible = |v: Complex<f64>| v.norm() <= f64::EPSILON * scale;

    let mut out = std::vec::Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && !negligible(t[(i + 1, i)]) {
            let (a, b, c, d) = (t[(i, i)], t[(i, i + 1)], t[(i + 1, i)], t[(i + 1, i + 1)]);
            let half_trace = (a + d) * 0.5;
            let half_diff = (a - d) * 0.5;
            let root = (half_diff * half_diff + b * c).sqrt();
            out.push(half_trace + root);
            out.push(half_trace - root);
            i += 2;
        } else {
            out.push(t[(i, i)]);
            i += 1;
        }
    }
    out
}

/// Check symmetry to a relative tolerance
pub fn is_symmetric(m: &Mat, rel_tol: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let scale = m.amax().max(f64::MIN_POSITIVE);
    (0..m.nrows()).all(|i| (0..i).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= rel_tol * scale))
}
