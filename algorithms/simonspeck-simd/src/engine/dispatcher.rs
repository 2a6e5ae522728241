//! Hardware Dispatcher (Ambient Convenience)
//!
//! Selects the fastest backend available on the current CPU and exposes a
//! safe, slice-based entry point per cipher direction. This module sits
//! outside the core's hard-part contract: the driver and kernels are generic
//! over `Backend` and never touch CPUID themselves. `cli`, `benches`, and
//! `verification` want "just run the fastest thing", so the feature-detection
//! and unsafe-call boundary lives here, keeping the CPUID guard and the
//! `unsafe` call it licenses directly adjacent in each `safe_*_wrapper`-style
//! dispatch function below.

use crate::backend::Backend;
use crate::driver::{advanced_process_blocks, Flags};
use crate::kernels::portable::Portable;
use crate::kernels::{CipherKernel, SimonDecrypt, SimonEncrypt, SpeckDecrypt, SpeckEncrypt};

/// Returns the name of the backend the dispatch functions below would pick
/// on this host.
#[must_use]
pub fn active_backend_name() -> &'static str {
    #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
    {
        if is_x86_feature_detected!("ssse3") {
            return "SSSE3";
        }
    }
    #[cfg(all(feature = "std", target_arch = "aarch64"))]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            return "NEON";
        }
    }
    #[cfg(all(
        not(feature = "std"),
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "ssse3"
    ))]
    {
        return "SSSE3";
    }
    #[cfg(all(not(feature = "std"), target_arch = "aarch64", target_feature = "neon"))]
    {
        return "NEON";
    }
    #[cfg(all(
        target_arch = "powerpc64",
        feature = "nightly-altivec",
        target_feature = "vsx"
    ))]
    {
        return "AltiVec/VSX";
    }
    "Portable"
}

#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
unsafe fn run<B: Backend, K: CipherKernel<B>>(
    backend: B,
    kernel: K,
    round_keys: &[u64],
    rounds: usize,
    in_blocks: &[u8],
    xor_blocks: Option<&[u8]>,
    out_blocks: &mut [u8],
    flags: Flags,
) -> usize {
    advanced_process_blocks(
        backend,
        kernel,
        round_keys,
        rounds,
        in_blocks.as_ptr(),
        xor_blocks.map(<[u8]>::as_ptr),
        out_blocks.as_mut_ptr(),
        in_blocks.len(),
        flags,
    )
}

// One dispatch function per (cipher, direction): each tries SSSE3 / NEON /
// AltiVec, falling back to the portable backend. The CPU-feature check and
// the chosen backend's call are kept adjacent on purpose so the safety
// argument for each `unsafe` block is visible right next to its guard.
macro_rules! dispatch_fn {
    ($name:ident, $kernel_value:expr) => {
        #[doc = concat!(
            "Run `",
            stringify!($name),
            "` on the fastest backend available on this host."
        )]
        #[allow(unused_variables, unused_mut)]
        #[allow(unsafe_code)]
        pub fn $name(
            round_keys: &[u64],
            rounds: usize,
            in_blocks: &[u8],
            xor_blocks: Option<&[u8]>,
            out_blocks: &mut [u8],
            flags: Flags,
        ) -> usize {
            #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
            if is_x86_feature_detected!("ssse3") {
                // SAFETY: ssse3 validated via CPUID immediately above.
                return unsafe {
                    run(
                        crate::kernels::ssse3::Ssse3,
                        $kernel_value,
                        round_keys,
                        rounds,
                        in_blocks,
                        xor_blocks,
                        out_blocks,
                        flags,
                    )
                };
            }
            #[cfg(all(feature = "std", target_arch = "aarch64"))]
            if std::arch::is_aarch64_feature_detected!("neon") {
                // SAFETY: neon validated via runtime feature detection immediately above.
                return unsafe {
                    run(
                        crate::kernels::neon::Neon,
                        $kernel_value,
                        round_keys,
                        rounds,
                        in_blocks,
                        xor_blocks,
                        out_blocks,
                        flags,
                    )
                };
            }
            #[cfg(all(
                not(feature = "std"),
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "ssse3"
            ))]
            {
                // SAFETY: ssse3 guaranteed by the compile-time target_feature cfg above.
                return unsafe {
                    run(
                        crate::kernels::ssse3::Ssse3,
                        $kernel_value,
                        round_keys,
                        rounds,
                        in_blocks,
                        xor_blocks,
                        out_blocks,
                        flags,
                    )
                };
            }
            #[cfg(all(not(feature = "std"), target_arch = "aarch64", target_feature = "neon"))]
            {
                // SAFETY: neon guaranteed by the compile-time target_feature cfg above.
                return unsafe {
                    run(
                        crate::kernels::neon::Neon,
                        $kernel_value,
                        round_keys,
                        rounds,
                        in_blocks,
                        xor_blocks,
                        out_blocks,
                        flags,
                    )
                };
            }
            #[cfg(all(
                target_arch = "powerpc64",
                feature = "nightly-altivec",
                target_feature = "vsx"
            ))]
            {
                // SAFETY: vsx guaranteed by the compile-time target_feature cfg above.
                return unsafe {
                    run(
                        crate::kernels::altivec::Altivec,
                        $kernel_value,
                        round_keys,
                        rounds,
                        in_blocks,
                        xor_blocks,
                        out_blocks,
                        flags,
                    )
                };
            }
            // SAFETY: the portable backend requires no CPU feature.
            #[allow(unreachable_code)]
            unsafe {
                run(
                    Portable,
                    $kernel_value,
                    round_keys,
                    rounds,
                    in_blocks,
                    xor_blocks,
                    out_blocks,
                    flags,
                )
            }
        }
    };
}

dispatch_fn!(speck_encrypt, SpeckEncrypt);
dispatch_fn!(speck_decrypt, SpeckDecrypt);
dispatch_fn!(simon_encrypt, SimonEncrypt);
dispatch_fn!(simon_decrypt, SimonDecrypt);
