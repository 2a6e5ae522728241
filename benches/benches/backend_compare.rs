//! Backend Comparison Benchmark
//!
//! Compares the runtime dispatcher against the portable backend called
//! directly, and against an explicit accelerated backend when the build
//! target and host support one. Quantifies the speedup SIMD gives over the
//! scalar fallback on this host.

#![allow(missing_docs)]
#![allow(unsafe_code)]
#![allow(clippy::unwrap_used)]

#[path = "common/schedule.rs"]
mod schedule;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use schedule::{schedule_for, Cipher};
use simonspeck_simd::kernels::constants::SPECK128_128_ROUNDS;
use simonspeck_simd::kernels::portable::Portable;
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::{advanced_process_blocks, Flags, SpeckEncrypt};
use std::hint::black_box;

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("Backend Comparison");

    let key = vec![0x1234_5678_9abc_def0u64, 0x0fed_cba9_8765_4321u64];
    let rounds = SPECK128_128_ROUNDS;
    let round_keys = schedule_for(Cipher::Speck, &key, rounds, KeyLayout::PreSplatted);

    let sizes = [16, 1024, 256 * 1024];

    for size in sizes {
        let input = vec![0u8; size];
        let mut output = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        // 1. Dispatcher (production path): picks the fastest backend on this host.
        group.bench_function(format!("Dispatcher (Active) - {size} bytes"), |b| {
            b.iter(|| {
                simonspeck_simd::speck_encrypt(
                    &round_keys,
                    rounds,
                    black_box(&input),
                    None,
                    &mut output,
                    Flags::ALLOW_PARALLEL,
                )
            });
        });

        // 2. Portable - explicit scalar backend, bypassing the dispatcher.
        group.bench_function(format!("Portable (No SIMD) - {size} bytes"), |b| {
            b.iter(|| unsafe {
                advanced_process_blocks(
                    Portable,
                    SpeckEncrypt,
                    &round_keys,
                    rounds,
                    input.as_ptr(),
                    None,
                    output.as_mut_ptr(),
                    input.len(),
                    Flags::ALLOW_PARALLEL,
                )
            });
        });

        // 3. SSSE3 - explicit accelerated backend (bypasses dispatcher's CPUID check).
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        if is_x86_feature_detected!("ssse3") {
            group.bench_function(format!("SSSE3 Native - {size} bytes"), |b| {
                b.iter(|| unsafe {
                    advanced_process_blocks(
                        simonspeck_simd::kernels::ssse3::Ssse3,
                        SpeckEncrypt,
                        &round_keys,
                        rounds,
                        input.as_ptr(),
                        None,
                        output.as_mut_ptr(),
                        input.len(),
                        Flags::ALLOW_PARALLEL,
                    )
                });
            });
        }

        // 4. NEON - explicit accelerated backend on AArch64 hosts.
        #[cfg(target_arch = "aarch64")]
        if std::arch::is_aarch64_feature_detected!("neon") {
            group.bench_function(format!("NEON Native - {size} bytes"), |b| {
                b.iter(|| unsafe {
                    advanced_process_blocks(
                        simonspeck_simd::kernels::neon::Neon,
                        SpeckEncrypt,
                        &round_keys,
                        rounds,
                        input.as_ptr(),
                        None,
                        output.as_mut_ptr(),
                        input.len(),
                        Flags::ALLOW_PARALLEL,
                    )
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
