// Criterion cross-check of the built-in sampler's numbers.
// Run with: cargo bench

use a5bench::corpus;
use a5bench::crc32::Crc32;
use a5bench::hash::{a5hash, a5hash128, a5hash32};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn bench_hashing(c: &mut Criterion) {
    let sizes: [(usize, &str); 5] = [
        (4, "4B"),
        (64, "64B"),
        (1024, "1KB"),
        (64 * 1024, "64KB"),
        (1024 * 1024, "1MB"),
    ];

    let data = corpus::generate(1024 * 1024).expect("corpus allocation");
    let crc = Crc32::new();

    let mut group = c.benchmark_group("hash_throughput");

    for (size, label) in sizes {
        let input = &data[..size];

        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("a5hash", label), input, |b, input| {
            b.iter(|| a5hash(black_box(input), 0))
        });

        group.bench_with_input(BenchmarkId::new("a5hash32", label), input, |b, input| {
            b.iter(|| a5hash32(black_box(input), 0))
        });

        group.bench_with_input(BenchmarkId::new("a5hash128", label), input, |b, input| {
            b.iter(|| a5hash128(black_box(input), 0))
        });

        group.bench_with_input(BenchmarkId::new("crc32", label), input, |b, input| {
            b.iter(|| crc.checksum(black_box(input)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hashing);
criterion_main!(benches);
