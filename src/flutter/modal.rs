//! Modal flutter eigenproblem swept over reduced frequency

use serde::{Deserialize, Serialize};

use super::{FlutterModel, FlutterPoint};
use crate::aero;
use crate::analysis::{AnalysisOptions, SweepOptions};
use crate::atmosphere::AirState;
use crate::elements::SectionProperties;
use crate::error::{FlutterError, FlutterResult};
use crate::math::{self, Complex};
use crate::modal::{ModalMatrices, StructuralMatrices};

/// Eigenvalues below this fraction of the largest are null modes of K
const NULL_MODE_TOLERANCE: f64 = 1e-9;

/// Stability of one mode at one reduced frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeStability {
    /// Eigenvalue λ of K·x = λ·(M + q·Â)·x
    pub eigenvalue: Complex<f64>,
    /// ω = √(1/Re λ), `None` when Re λ ≤ 0
    pub frequency: Option<f64>,
    /// g = -½·Im λ
    pub damping: f64,
}

impl ModeStability {
    fn from_eigenvalue(eigenvalue: Complex<f64>) -> Self {
        let frequency = (eigenvalue.re > 0.0).then(|| (1.0 / eigenvalue.re).sqrt());
        Self {
            eigenvalue,
            frequency,
            damping: -0.5 * eigenvalue.im,
        }
    }
}

/// Rayleigh-Ritz bending-torsion model with Theodorsen aerodynamics
///
/// Modal and structural matrices are assembled once and reused for every
/// reduced-frequency sample and every air state.
#[derive(Debug, Clone)]
pub struct ModalEigenproblem {
    section: SectionProperties,
    modal: ModalMatrices,
    structural: StructuralMatrices,
    sweep: SweepOptions,
}

impl ModalEigenproblem {
    pub fn new(section: &SectionProperties, options: &AnalysisOptions) -> FlutterResult<Self> {
        options.sweep.validate()?;
        let modal = ModalMatrices::assemble(&options.basis(), section.span)?;
        let structural = StructuralMatrices::assemble(&modal, section);
        Ok(Self {
            section: *section,
            modal,
            structural,
            sweep: options.sweep,
        })
    }

    pub fn structural(&self) -> &StructuralMatrices {
        &self.structural
    }

    /// Mode stabilities at reduced frequency `k`
    ///
    /// Modes with a defined frequency come first in ascending frequency,
    /// followed by modes with Re λ ≤ 0 (including the null modes of K).
    pub fn modes_at(&self, air: &AirState, k: f64) -> FlutterResult<Vec<ModeStability>> {
        let c = aero::theodorsen(k)?;
        let b = self.section.semichord;
        let a_hat = aero::aerodynamic_matrix(&self.modal, b, self.section.elastic_axis, k, c);

        let q = 0.5 * air.density * b * b / (k * k);
        let rhs = math::to_complex(&self.structural.mass) + a_hat.map(|v| v * q);
        let lhs = math::to_complex(&self.structural.stiffness);

        let eigenvalues = math::generalized_eigenvalues(&lhs, &rhs, self.sweep.max_eigen_iterations)
            .map_err(|reason| FlutterError::Numerical { k, reason })?;

        // Rigid trial functions leave K singular; their eigenvalues come back as round-off
        let scale = eigenvalues.iter().map(|l| l.norm()).fold(0.0, f64::max);
        let mut modes: Vec<ModeStability> = eigenvalues
            .into_iter()
            .map(|l| if l.norm() <= NULL_MODE_TOLERANCE * scale { Complex::new(0.0, 0.0) } else { l })
            .map(ModeStability::from_eigenvalue)
            .collect();
        modes.sort_by(|x, y| match (x.frequency, y.frequency) {
            (Some(fx), Some(fy)) => fx.total_cmp(&fy),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(modes)
    }
}

impl FlutterModel for ModalEigenproblem {
    fn name(&self) -> &'static str {
        "modal eigenproblem"
    }

    fn predict(&self, air: &AirState) -> FlutterResult<FlutterPoint> {
        self.sweep(air, |k| self.modes_at(air, k))
    }
}

impl ModalEigenproblem {
    /// Scan the reduced-frequency samples in ascending order with `evaluate`
    ///
    /// The first sample holding a defined mode with damping above the threshold
    /// ends the sweep; within a sample the first such mode in `evaluate`'s order
    /// is reported. Samples whose eigen-decomposition fails are skipped and counted.
    fn sweep<F>(&self, air: &AirState, mut evaluate: F) -> FlutterResult<FlutterPoint>
    where
        F: FnMut(f64) -> FlutterResult<Vec<ModeStability>>,
    {
        let threshold = self.sweep.damping_threshold;
        let mut evaluated = 0usize;
        let mut skipped = 0usize;

        for k in self.sweep.reduced_frequencies() {
            let modes = match evaluate(k) {
                Ok(modes) => modes,
                Err(err @ FlutterError::Numerical { .. }) => {
                    log::warn!("{err}; sample skipped");
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };
            evaluated += 1;

            let max_damping = modes.iter().map(|m| m.damping).fold(f64::NEG_INFINITY, f64::max);
            log::debug!("k = {k:.3}: {} modes, max damping {max_damping:.3e}", modes.len());

            let unstable = modes.iter().enumerate().find_map(|(i, mode)| match mode.frequency {
                Some(omega) if mode.damping > threshold => Some((i, omega)),
                _ => None,
            });

            if let Some((index, omega)) = unstable {
                let speed = omega * self.section.semichord / k;
                log::info!(
                    "flutter at h = {:.0} m: U = {speed:.4} m/s, mode {}, k = {k:.3}, omega = {omega:.4} rad/s",
                    air.altitude,
                    index + 1
                );
                return Ok(FlutterPoint {
                    flutter_speed: Some(speed),
                    mode_index: Some(index + 1),
                    reduced_frequency: Some(k),
                    frequency: Some(omega),
                    skipped_samples: skipped,
                });
            }
        }

        if evaluated == 0 {
            log::warn!(
                "no reduced-frequency sample could be evaluated at h = {:.0} m ({skipped} skipped); no flutter result",
                air.altitude
            );
        } else {
            log::info!(
                "no flutter found at h = {:.0} m after {evaluated} samples ({skipped} skipped)",
                air.altitude
            );
        }
        Ok(FlutterPoint {
            skipped_samples: skipped,
            ..FlutterPoint::not_found()
        })
    }
}
