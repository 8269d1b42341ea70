use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dv_core::{parse_unit, DimensionalVariable};
use std::hint::black_box;

fn bench_parse_unit(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_unit");

    for (name, unit) in [
        ("base", "m"),
        ("prefixed", "km"),
        ("derived", "kg*m/s^2"),
        ("hyphenated", "BTU-in/hr-ft^2-F"),
        ("nested", "((kg*m^2)/(s^3*A))^(1/2)"),
    ] {
        group.bench_with_input(BenchmarkId::new(name, unit), &unit, |b, input| {
            b.iter(|| parse_unit(black_box(input)));
        });
    }

    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    let mass = DimensionalVariable::new(10.0, "kg").unwrap();
    let accel = DimensionalVariable::new(9.81, "m/s^2").unwrap();
    let force = DimensionalVariable::new(1.0, "lbf").unwrap();

    group.bench_function("mul", |b| {
        b.iter(|| DimensionalVariable::mul(black_box(&mass), black_box(&accel)));
    });

    group.bench_function("checked_add", |b| {
        let f = (&mass * &accel).unwrap();
        b.iter(|| black_box(&f).try_add(black_box(&force)));
    });

    group.bench_function("value_in", |b| {
        b.iter(|| black_box(&force).value_in(black_box("N")));
    });

    group.finish();
}

fn bench_batch_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_construct");

    let units = ["m/s", "kWh", "psi", "W/m-K", "mi/hr"];
    group.bench_function("construct_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let unit = units[i % units.len()];
                black_box(DimensionalVariable::new(i as f64, black_box(unit)).ok());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_unit,
    bench_arithmetic,
    bench_batch_construct
);
criterion_main!(benches);
