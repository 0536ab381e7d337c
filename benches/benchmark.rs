use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chronal::dataset::TemporalDataset;
use chronal::interval::{DefaultIntervalComparator, IntervalTree};

fn xorshift(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

fn random_intervals(count: usize, seed: u64) -> Vec<(u64, i64, i64)> {
    let mut state = seed;
    (0..count as u64)
        .map(|key| {
            let inf = (xorshift(&mut state) % 1_000_000) as i64;
            let length = (xorshift(&mut state) % 5_000) as i64;
            (key, inf, inf + length)
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let entries = random_intervals(10_000, 0x5eed);
    let tree = IntervalTree::build(entries.clone(), &DefaultIntervalComparator);

    c.bench_function("interval tree build 10k", |b| {
        b.iter(|| IntervalTree::build(black_box(entries.clone()), &DefaultIntervalComparator))
    });

    c.bench_function("interval tree overlap query", |b| {
        let mut state = 0xfeed_f00d_u64;
        b.iter(|| {
            let inf = (xorshift(&mut state) % 1_000_000) as i64;
            let sup = inf + 10_000;
            black_box(tree.overlapping(black_box(inf), black_box(sup)))
        })
    });

    c.bench_function("brute force overlap scan", |b| {
        let mut state = 0xfeed_f00d_u64;
        b.iter(|| {
            let inf = (xorshift(&mut state) % 1_000_000) as i64;
            let sup = inf + 10_000;
            black_box(
                entries
                    .iter()
                    .filter(|(_, lo, hi)| *lo <= sup && *hi >= inf)
                    .map(|(key, _, _)| *key)
                    .collect::<Vec<_>>(),
            )
        })
    });

    c.bench_function("dataset insert 10k instants", |b| {
        b.iter(|| {
            let mut dataset = TemporalDataset::new();
            for i in 0..10_000_i64 {
                dataset
                    .add_instant(i * 1_000, i * 1_000 + 999, 4, -1)
                    .expect("insert");
            }
            black_box(dataset)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
