//! SIMON/SPECK-128 Comprehensive Criterion Benchmark
//!
//! Throughput measurements across cipher, key size, and mode of operation,
//! run on whichever backend the dispatcher selects for this host.

#[path = "common/schedule.rs"]
mod schedule;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use schedule::{schedule_for, Cipher};
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::Flags;
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn random_key(words: usize, rng: &mut impl RngCore) -> Vec<u64> {
    (0..words).map(|_| rng.next_u64()).collect()
}

// =============================================================================
// BENCHMARK 1: ECB THROUGHPUT BY SIZE
// =============================================================================

fn bench_ecb_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-ECB-Throughput");
    let mut rng = rand::rng();

    let sizes = [(KB, "1KB"), (16 * KB, "16KB"), (64 * KB, "64KB"), (MB, "1MB"), (16 * MB, "16MB")];

    for (cipher, rounds, name) in [(Cipher::Speck, 32, "speck128-128"), (Cipher::Simon, 68, "simon128-128")] {
        let key = random_key(2, &mut rng);
        let round_keys = schedule_for(cipher, &key, rounds, KeyLayout::PreSplatted);

        for (size, size_name) in sizes {
            let mut input = vec![0u8; size];
            rng.fill(&mut input[..]);
            let mut output = vec![0u8; size];
            group.throughput(Throughput::Bytes(size as u64));

            group.bench_with_input(BenchmarkId::new(name, size_name), &input, |b, data| {
                b.iter(|| match cipher {
                    Cipher::Speck => simonspeck_simd::speck_encrypt(
                        &round_keys,
                        rounds,
                        black_box(data),
                        None,
                        &mut output,
                        Flags::ALLOW_PARALLEL,
                    ),
                    Cipher::Simon => simonspeck_simd::simon_encrypt(
                        &round_keys,
                        rounds,
                        black_box(data),
                        None,
                        &mut output,
                        Flags::ALLOW_PARALLEL,
                    ),
                });
            });
        }
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: KEY SIZE SCALING (SPECK's three published key sizes)
// =============================================================================

fn bench_key_size_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Key-Size-Scaling");
    let mut rng = rand::rng();
    let size = 64 * KB;

    for (words, rounds, name) in [(2, 32, "speck128-128"), (3, 33, "speck128-192"), (4, 34, "speck128-256")] {
        let key = random_key(words, &mut rng);
        let round_keys = schedule_for(Cipher::Speck, &key, rounds, KeyLayout::PreSplatted);
        let mut input = vec![0u8; size];
        rng.fill(&mut input[..]);
        let mut output = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(name, |b| {
            b.iter(|| {
                simonspeck_simd::speck_encrypt(&round_keys, rounds, black_box(&input), None, &mut output, Flags::ALLOW_PARALLEL)
            });
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: ECB VS CTR
// =============================================================================

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Modes");
    let mut rng = rand::rng();
    let size = 256 * KB;

    let key = random_key(2, &mut rng);
    let round_keys = schedule_for(Cipher::Speck, &key, 32, KeyLayout::PreSplatted);
    let mut input = vec![0u8; size];
    rng.fill(&mut input[..]);
    let mut output = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("ecb", |b| {
        b.iter(|| simonspeck_simd::speck_encrypt(&round_keys, 32, black_box(&input), None, &mut output, Flags::ALLOW_PARALLEL));
    });

    let counter = [0u8; 16];
    group.bench_function("ctr", |b| {
        b.iter(|| {
            simonspeck_simd::speck_encrypt(
                &round_keys,
                32,
                &counter,
                Some(black_box(&input)),
                &mut output,
                Flags::ALLOW_PARALLEL | Flags::IN_BLOCK_IS_COUNTER,
            )
        });
    });

    group.finish();
}

// =============================================================================
// BENCHMARK 4: STREAMING (FIXED-SIZE CHUNKS, SIMULATING A PIPE READER)
// =============================================================================

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Streaming-Chunks");
    let mut rng = rand::rng();
    let total = 4 * MB;
    let chunk_sizes = [4 * KB, 64 * KB, MB];

    let key = random_key(2, &mut rng);
    let round_keys = schedule_for(Cipher::Speck, &key, 32, KeyLayout::PreSplatted);
    let mut input = vec![0u8; total];
    rng.fill(&mut input[..]);
    let mut output = vec![0u8; total];

    for chunk_size in chunk_sizes {
        group.throughput(Throughput::Bytes(total as u64));
        group.bench_function(format!("{chunk_size}B-chunks"), |b| {
            b.iter(|| {
                for (in_chunk, out_chunk) in input.chunks(chunk_size).zip(output.chunks_mut(chunk_size)) {
                    simonspeck_simd::speck_encrypt(
                        &round_keys,
                        32,
                        black_box(in_chunk),
                        None,
                        out_chunk,
                        Flags::ALLOW_PARALLEL,
                    );
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ecb_throughput, bench_key_size_scaling, bench_modes, bench_streaming);
criterion_main!(benches);
