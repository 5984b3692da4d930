//! Fin model - prepared fin ready for flutter analysis

use std::path::Path;

use crate::atmosphere::AirState;
use crate::config::FinConfig;
use crate::elements::{EquivalentFin, Layup, SectionProperties};
use crate::envelope::Envelope;
use crate::error::FlutterResult;
use crate::flutter::FlutterModel;
use crate::results::FlutterReport;

/// A validated fin with its homogenized section
///
/// Construction validates the configuration, homogenizes the layup and derives
/// section properties once. Analyses and envelopes reuse them unchanged.
#[derive(Debug, Clone)]
pub struct FinModel {
    config: FinConfig,
    layup: Layup,
    fin: EquivalentFin,
    section: SectionProperties,
}

impl FinModel {
    pub fn new(config: FinConfig) -> FlutterResult<Self> {
        config.validate()?;
        let layup = config.layup();
        let fin = layup.homogenize()?;
        let section = SectionProperties::from_layup(&layup, &fin, config.analysis.elastic_axis)?;

        log::debug!(
            "fin prepared: {} layers, c = {:.4} m, L = {:.4} m, t = {:.4} m, EI = {:.4e}, GJ = {:.4e}",
            layup.stack().count(),
            section.average_chord,
            section.span,
            fin.thickness,
            section.ei,
            section.gj
        );

        Ok(Self {
            config,
            layup,
            fin,
            section,
        })
    }

    /// Load and prepare a fin from a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> FlutterResult<Self> {
        Self::new(FinConfig::from_json_file(path)?)
    }

    pub fn config(&self) -> &FinConfig {
        &self.config
    }

    pub fn layup(&self) -> &Layup {
        &self.layup
    }

    pub fn equivalent_fin(&self) -> &EquivalentFin {
        &self.fin
    }

    pub fn section(&self) -> &SectionProperties {
        &self.section
    }

    /// Build the configured flutter formulation
    pub fn flutter_model(&self) -> FlutterResult<Box<dyn FlutterModel>> {
        let options = &self.config.analysis;
        options.method.build(&self.fin, &self.section, options)
    }

    /// Analyze at the configured altitude
    pub fn analyze(&self) -> FlutterResult<FlutterReport> {
        self.analyze_at(self.config.analysis.altitude)
    }

    /// Analyze at `altitude` metres
    pub fn analyze_at(&self, altitude: f64) -> FlutterResult<FlutterReport> {
        let air = AirState::at_altitude(altitude)?;
        self.analyze_in(&air)
    }

    /// Analyze in an explicit air state
    pub fn analyze_in(&self, air: &AirState) -> FlutterResult<FlutterReport> {
        let options = &self.config.analysis;
        let model = self.flutter_model()?;
        let point = model.predict(air)?;
        Ok(FlutterReport::new(
            options.method,
            point,
            &self.section,
            air,
            (options.bending_modes, options.torsion_modes),
        ))
    }

    /// Velocity-vs-altitude envelope over the configured altitude range
    pub fn envelope(&self) -> FlutterResult<Envelope> {
        let model = self.flutter_model()?;
        Envelope::sweep(model.as_ref(), &self.config.envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisOptions;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_layer_keeps_core_geometry() {
        let model = FinModel::new(FinConfig::default()).unwrap();
        let core = &model.config().core_layer;
        let fin = model.equivalent_fin();
        assert_relative_eq!(fin.root_chord, core.root_chord, max_relative = 1e-12);
        assert_relative_eq!(fin.tip_chord, core.tip_chord, max_relative = 1e-12);
        assert_relative_eq!(fin.span, core.span, max_relative = 1e-12);
        assert_relative_eq!(fin.shear_modulus, core.g, max_relative = 1e-12);
        assert_eq!(fin.thickness, core.thickness);
    }

    #[test]
    fn test_empirical_analysis() {
        let config = FinConfig {
            analysis: AnalysisOptions::empirical(),
            ..FinConfig::default()
        };
        let report = FinModel::new(config).unwrap().analyze().unwrap();
        assert_relative_eq!(report.flutter_speed_m_s.unwrap(), 398.2327, max_relative = 1e-5);
        assert_eq!(report.flutter_mode_index, None);
    }

    #[test]
    fn test_altitude_out_of_range() {
        let model = FinModel::new(FinConfig::default()).unwrap();
        assert!(model.analyze_at(11_500.0).unwrap_err().is_domain());
    }
}
