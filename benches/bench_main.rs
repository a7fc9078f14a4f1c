use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geocap::{CapacityEstimator, PercentileEstimate};

fn estimate(c: &mut Criterion) {
    let estimator = CapacityEstimator::default();
    let area = PercentileEstimate::new(1., 10.);
    let power_density = PercentileEstimate::new(10., 24.);

    c.bench_function("estimate", |b| {
        b.iter(|| estimator.estimate(black_box(&area), black_box(&power_density)))
    });
}

fn estimate_scenarios(c: &mut Criterion) {
    let n = 1_000;
    let area_p90s = (0..n).map(|i| 1. + i as f64 / 100.).collect::<Vec<_>>();
    let area_p10s = area_p90s.iter().map(|x| x * 10.).collect::<Vec<_>>();
    let pd_p90s = vec![10.; n];
    let pd_p10s = vec![24.; n];

    for &parallel in &[false, true] {
        let estimator = CapacityEstimator::default().parallel(parallel);
        let name = if parallel {
            "estimate_scenarios/parallel"
        } else {
            "estimate_scenarios/sequential"
        };

        c.bench_function(name, |b| {
            b.iter(|| estimator.estimate_scenarios(&area_p90s, &area_p10s, &pd_p90s, &pd_p10s))
        });
    }
}

criterion_group!(benches, estimate, estimate_scenarios);
criterion_main!(benches);
