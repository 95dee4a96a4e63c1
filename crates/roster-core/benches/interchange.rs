use criterion::{black_box, criterion_group, criterion_main, Criterion};

use roster_core::interchange::{parse_roster, render_roster, NumericPolicy, RecordLayout};
use roster_core::Student;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("interchange");

    let roster: Vec<Student> = (0..1_000)
        .map(|i| {
            let score = 60.0 + (i % 40) as f64;
            Student::new(format!("{i:04}"), format!("name-{i}"), "女", 20, score)
        })
        .collect();
    let clean = render_roster(&roster, RecordLayout::OnePerLine);

    let noisy = {
        let mut s = clean.clone();
        for i in 0..100 {
            s.push_str(&format!("{i},broken\n{i},x,男,twenty,50.00\n"));
        }
        s
    };

    group.bench_function("render_1k", |b| {
        b.iter(|| render_roster(black_box(&roster), RecordLayout::OnePerLine))
    });

    group.bench_function("parse_1k", |b| {
        b.iter(|| parse_roster(black_box(&clean), NumericPolicy::Skip))
    });

    group.bench_function("parse_noisy", |b| {
        b.iter(|| parse_roster(black_box(&noisy), NumericPolicy::Skip))
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
