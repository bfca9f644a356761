//! Criterion benchmarks for the fork policies.
//!
//! Run with: cargo bench

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fork_join_sort::{ForkJoinSorter, SortConfig};

fn generate_random_data(size: usize) -> Vec<u32> {
    let mut rng = fastrand::Rng::with_seed(size as u64);
    (0..size).map(|_| rng.u32(..)).collect()
}

fn bench_fork_policies(c: &mut Criterion) {
    let policies = [
        ("default", SortConfig::default()),
        ("unbounded", SortConfig::unbounded()),
        ("sequential", SortConfig::default().with_fork_threshold(usize::MAX)),
    ];
    let mut group = c.benchmark_group("fork-join merge sort");

    for size_exp in [10, 14, 18] {
        let size = 1usize << size_exp;
        let data = generate_random_data(size);
        group.throughput(Throughput::Elements(size as u64));

        for (name, config) in policies {
            let Ok(sorter) = ForkJoinSorter::new(config) else {
                continue;
            };
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| sorter.sort(black_box(data)))
            });
        }

        group.bench_with_input(BenchmarkId::new("slice::sort", size), &data, |b, data| {
            b.iter_batched(
                || data.clone(),
                |mut copy| {
                    copy.sort();
                    copy
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fork_policies);
criterion_main!(benches);
