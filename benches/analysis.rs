use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taguchi_l25::construct::build_l25;
use taguchi_l25::design::{build_schedule, Design};
use taguchi_l25::doe::{analyze, Objective};
use taguchi_l25::session::Session;
use taguchi_l25::simulate::simulate;

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Construction");
    let design = Design::default();

    group.bench_function("build_l25", |b| b.iter(build_l25));

    let oa = build_l25();
    group.bench_function("build_schedule", |b| {
        b.iter(|| build_schedule(black_box(&oa), design.factors()).unwrap());
    });
    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let schedule = build_schedule(&build_l25(), Design::default().factors()).unwrap();
    let mut group = c.benchmark_group("Simulate");

    for name in ["CTR (%)", "CPA ($)", "Revenue"] {
        group.bench_function(name, |b| b.iter(|| simulate(black_box(name), &schedule)));
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let schedule = build_schedule(&build_l25(), Design::default().factors()).unwrap();
    let ctr = simulate("CTR (%)", &schedule);
    let mut group = c.benchmark_group("Analyze");

    group.bench_function("single_kpi", |b| {
        b.iter(|| analyze(&schedule, black_box(&ctr), Objective::Maximize).unwrap());
    });

    let mut session = Session::default();
    session.generate().unwrap();
    for i in 0..30 {
        session
            .add_kpi(&format!("KPI {i}"), Objective::Maximize)
            .unwrap();
    }
    group.bench_function("analyze_all_32", |b| {
        b.iter(|| session.analyze_all().unwrap());
    });

    #[cfg(feature = "parallel")]
    group.bench_function("par_analyze_all_32", |b| {
        b.iter(|| session.par_analyze_all().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_simulate, bench_analyze);
criterion_main!(benches);
