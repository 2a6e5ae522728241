//! Bytes-per-Cycle (bpC) Benchmark: SIMON/SPECK-128
//!
//! Measures algorithmic efficiency using the hardware cycle counter (RDTSC),
//! comparing the portable scalar backend against whichever accelerated
//! backend this host supports.

#![allow(unsafe_code)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unwrap_used)]

#[path = "common/schedule.rs"]
mod schedule;

use schedule::{schedule_for, Cipher};
use simonspeck_simd::kernels::constants::SPECK128_128_ROUNDS;
use simonspeck_simd::kernels::portable::Portable;
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::{advanced_process_blocks, Flags, SpeckEncrypt};
use std::arch::x86_64::_rdtsc;
use std::hint::black_box;

// =============================================================================
// UTILITIES
// =============================================================================

/// Measure RDTSC overhead to subtract from measurements.
fn measure_overhead(iterations: u64) -> f64 {
    let start = unsafe { _rdtsc() };
    for _ in 0..iterations {
        black_box(0);
    }
    let end = unsafe { _rdtsc() };
    (end - start) as f64 / iterations as f64
}

fn measure_dispatcher(round_keys: &[u64], rounds: usize, input: &[u8], out: &mut [u8], iterations: u64) -> f64 {
    let start = unsafe { _rdtsc() };
    for _ in 0..iterations {
        black_box(simonspeck_simd::speck_encrypt(round_keys, rounds, black_box(input), None, out, Flags::ALLOW_PARALLEL));
    }
    let end = unsafe { _rdtsc() };
    (end - start) as f64 / iterations as f64
}

fn measure_portable(round_keys: &[u64], rounds: usize, input: &[u8], out: &mut [u8], iterations: u64) -> f64 {
    let start = unsafe { _rdtsc() };
    for _ in 0..iterations {
        unsafe {
            black_box(advanced_process_blocks(
                Portable,
                SpeckEncrypt,
                round_keys,
                rounds,
                black_box(input).as_ptr(),
                None,
                out.as_mut_ptr(),
                input.len(),
                Flags::ALLOW_PARALLEL,
            ));
        }
    }
    let end = unsafe { _rdtsc() };
    (end - start) as f64 / iterations as f64
}

// =============================================================================
// MAIN BENCHMARK
// =============================================================================

fn main() {
    println!("BENCHMARK: Portable vs Dispatcher (speck128/128, ECB)");
    println!("=======================================================================");
    println!(
        "{:<10} | {:<16} | {:<16}",
        "Size", "Portable (bpC)", "Dispatcher (bpC)"
    );
    println!("{:-<10}-+-{:-<16}-+-{:-<16}", "", "", "");

    let overhead = measure_overhead(1_000_000);

    let key = vec![0x1234_5678_9abc_def0u64, 0x0fed_cba9_8765_4321u64];
    let rounds = SPECK128_128_ROUNDS;
    let round_keys = schedule_for(Cipher::Speck, &key, rounds, KeyLayout::PreSplatted);

    let sizes = [1024, 64 * 1024, 1024 * 1024, 10 * 1024 * 1024];

    for &size in &sizes {
        let input = vec![0u8; size];
        let mut output = vec![0u8; size];
        let iterations = if size < 4096 {
            200_000
        } else if size < 1024 * 1024 {
            10_000
        } else {
            200
        };

        let portable_bpc = size as f64 / (measure_portable(&round_keys, rounds, &input, &mut output, iterations) - overhead).max(1.0);
        let dispatcher_bpc = size as f64 / (measure_dispatcher(&round_keys, rounds, &input, &mut output, iterations) - overhead).max(1.0);

        println!("{:<10} | {:<16.2} | {:<16.2}", format!("{size} B"), portable_bpc, dispatcher_bpc);
    }
    println!("=======================================================================");
    println!("* Values in Bytes/Cycle (Higher is Better)");
    println!("* Dispatcher picks the fastest SIMD backend compiled in and available on this host.");
    println!("* Active backend: {}", simonspeck_simd::active_backend());
}
