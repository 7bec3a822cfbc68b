use circuit::{Circuit, Inequality};
use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn bench_comparison_build(c: &mut Criterion) {
    c.bench_function("comparison_64_build", |b| {
        b.iter(|| {
            let circ = Circuit::comparison(64, Inequality::Greater);
            criterion::black_box(circ);
        });
    });
}

fn bench_comparison_eval(c: &mut Criterion) {
    c.bench_function("comparison_64_eval", |b| {
        let circ = Circuit::comparison(64, Inequality::Greater);
        let a: Vec<bool> = (0..65).map(|_| rand::random()).collect();
        let e: Vec<bool> = (0..65).map(|_| rand::random()).collect();
        b.iter(|| {
            let res = circ.eval(&a, &e).unwrap();
            criterion::black_box(res);
        });
    });
}

criterion_group! {
    name = comparison_eval;
    config = Criterion::default().warm_up_time(Duration::from_millis(100));
    targets = bench_comparison_build, bench_comparison_eval
}
criterion_main!(comparison_eval);
