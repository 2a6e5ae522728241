//! Cross-backend agreement checker.
//!
//! For a given cipher and buffer size, runs the portable scalar backend and
//! whichever accelerated SIMD backend this build target and host support,
//! and asserts the two outputs are byte-identical. The core crate's kernels
//! and driver are generic over `Backend` by construction, but that is a
//! static guarantee about *code*, not a runtime guarantee about the actual
//! bytes a given host produces — this binary is the runtime check.

#![allow(unsafe_code)]

mod schedule;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::prelude::*;
use schedule::{schedule_for, Cipher};
use simonspeck_simd::kernels::constants::{SIMON128_128_ROUNDS, SPECK128_128_ROUNDS};
use simonspeck_simd::kernels::portable::Portable;
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::{advanced_process_blocks, Backend, BackendSelectError, Flags, SimonEncrypt, SpeckEncrypt};

#[derive(Parser)]
#[command(name = "cross_backend_check")]
#[command(about = "Assert the compiled-in SIMD backend agrees with the portable backend")]
struct Args {
    /// Which cipher to exercise.
    #[arg(value_enum, default_value_t = Cipher::Speck)]
    cipher: Cipher,

    /// Buffer size in bytes. Large enough by default to exercise the
    /// six-block, two-block, and single-block tails of the driver.
    #[arg(long, default_value_t = 6 * 16 * 10 + 2 * 16 + 16)]
    size: usize,
}

fn run_on_backend<B: Backend>(
    backend: B,
    cipher: Cipher,
    round_keys: &[u64],
    rounds: usize,
    input: &[u8],
    out: &mut [u8],
) {
    // SAFETY: `backend`'s required CPU feature is validated by each caller
    // below before constructing the marker value; `input`/`out` are both
    // `args.size` bytes, matching the pointer/length contract.
    unsafe {
        match cipher {
            Cipher::Speck => {
                advanced_process_blocks(
                    backend,
                    SpeckEncrypt,
                    round_keys,
                    rounds,
                    input.as_ptr(),
                    None,
                    out.as_mut_ptr(),
                    input.len(),
                    Flags::ALLOW_PARALLEL,
                );
            }
            Cipher::Simon => {
                advanced_process_blocks(
                    backend,
                    SimonEncrypt,
                    round_keys,
                    rounds,
                    input.as_ptr(),
                    None,
                    out.as_mut_ptr(),
                    input.len(),
                    Flags::ALLOW_PARALLEL,
                );
            }
        }
    }
}

/// Run the accelerated backend compiled in for this target, if the host
/// actually supports it, and return its name alongside the output buffer.
#[allow(unreachable_code, unused_variables)]
fn run_accelerated(cipher: Cipher, round_keys: &[u64], rounds: usize, input: &[u8]) -> Result<(&'static str, Vec<u8>)> {
    let mut out = vec![0u8; input.len()];

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if is_x86_feature_detected!("ssse3") {
        run_on_backend(simonspeck_simd::kernels::ssse3::Ssse3, cipher, round_keys, rounds, input, &mut out);
        return Ok(("SSSE3", out));
    }

    #[cfg(target_arch = "aarch64")]
    if std::arch::is_aarch64_feature_detected!("neon") {
        run_on_backend(simonspeck_simd::kernels::neon::Neon, cipher, round_keys, rounds, input, &mut out);
        return Ok(("NEON", out));
    }

    #[cfg(all(target_arch = "powerpc64", feature = "nightly-altivec"))]
    if std::arch::is_powerpc64_feature_detected!("vsx") {
        run_on_backend(simonspeck_simd::kernels::altivec::Altivec, cipher, round_keys, rounds, input, &mut out);
        return Ok(("AltiVec/VSX", out));
    }

    Err(BackendSelectError::new("ssse3/neon/vsx").into())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.size % 16 != 0 {
        bail!("size must be a whole number of 16-byte blocks ({} given)", args.size);
    }

    let mut rng = rand::rng();
    let key: Vec<u64> = (0..2).map(|_| rng.random()).collect();
    let rounds = match args.cipher {
        Cipher::Speck => SPECK128_128_ROUNDS,
        Cipher::Simon => SIMON128_128_ROUNDS,
    };
    let round_keys = schedule_for(args.cipher, &key, rounds, KeyLayout::PreSplatted);

    let mut input = vec![0u8; args.size];
    rng.fill(&mut input[..]);

    let mut portable_out = vec![0u8; args.size];
    run_on_backend(Portable, args.cipher, &round_keys, rounds, &input, &mut portable_out);

    let (backend_name, accel_out) = run_accelerated(args.cipher, &round_keys, rounds, &input)
        .context("no accelerated backend available to cross-check against Portable on this host/target")?;

    if portable_out == accel_out {
        println!("OK: {backend_name} agrees with Portable over {} bytes ({:?})", args.size, args.cipher);
        Ok(())
    } else {
        let offset = portable_out.iter().zip(accel_out.iter()).position(|(a, b)| a != b);
        bail!(
            "MISMATCH: {backend_name} disagrees with Portable at byte offset {:?} (size {} bytes, {:?})",
            offset,
            args.size,
            args.cipher
        );
    }
}
