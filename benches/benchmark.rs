use criterion::{criterion_group, criterion_main, Criterion};

use aoc2025::{default_input, ALL_SOLUTIONS, DAY12};

pub fn criterion_benchmark(c: &mut Criterion) {
    for (i, (part1, part2)) in ALL_SOLUTIONS.iter().enumerate() {
        let Ok(input) = default_input(i + 1) else {
            continue;
        };
        c.bench_function(&format!("day{} part1", i + 1), |b| b.iter(|| part1(&input)));
        c.bench_function(&format!("day{} part2", i + 1), |b| b.iter(|| part2(&input)));
    }
    if let Ok(input) = default_input(12) {
        let (part1, _) = DAY12;
        c.bench_function("day12 part1", |b| b.iter(|| part1(&input)));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
