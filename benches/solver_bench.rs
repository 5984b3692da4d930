//! Benchmarks for the flutter solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fin_flutter::aero;
use fin_flutter::prelude::*;

fn create_sandwich_config(method: FlutterMethod) -> FinConfig {
    let planform = |layer: MaterialLayer| layer.with_planform(0.2, 0.06, 0.1, 0.05);
    FinConfig {
        core_layer: planform(MaterialLayer::plywood()),
        additional_layers: vec![
            planform(MaterialLayer::fiberglass()),
            planform(MaterialLayer::carbon_fiber().with_thickness(0.0003)),
        ],
        analysis: AnalysisOptions {
            method,
            ..AnalysisOptions::default()
        },
        ..FinConfig::default()
    }
}

fn benchmark_theodorsen(c: &mut Criterion) {
    c.bench_function("theodorsen_sweep_999", |b| {
        let sweep = SweepOptions::default();
        b.iter(|| {
            for k in sweep.reduced_frequencies() {
                black_box(aero::theodorsen(black_box(k)).unwrap());
            }
        })
    });
}

fn benchmark_modal_sample(c: &mut Criterion) {
    let model = FinModel::new(create_sandwich_config(FlutterMethod::ModalEigenproblem)).unwrap();
    let solver = ModalEigenproblem::new(model.section(), &model.config().analysis).unwrap();
    let air = AirState::sea_level();
    c.bench_function("modal_single_sample_4x4", |b| {
        b.iter(|| black_box(solver.modes_at(&air, black_box(0.5)).unwrap()))
    });
}

fn benchmark_full_sweep(c: &mut Criterion) {
    // Zero density never trips the threshold, so every sample is evaluated
    let model = FinModel::new(create_sandwich_config(FlutterMethod::ModalEigenproblem)).unwrap();
    let air = AirState::sea_level().with_density(0.0);
    c.bench_function("modal_full_sweep_no_flutter", |b| {
        b.iter(|| black_box(model.analyze_in(&air).unwrap()))
    });
}

fn benchmark_empirical_envelope(c: &mut Criterion) {
    let model = FinModel::new(create_sandwich_config(FlutterMethod::EmpiricalClosedForm)).unwrap();
    c.bench_function("empirical_envelope_10001", |b| {
        b.iter(|| black_box(model.envelope().unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_theodorsen,
    benchmark_modal_sample,
    benchmark_full_sweep,
    benchmark_empirical_envelope,
);

criterion_main!(benches);
