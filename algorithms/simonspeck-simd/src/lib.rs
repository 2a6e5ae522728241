#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    all(target_arch = "powerpc64", feature = "nightly-altivec"),
    feature(stdarch_powerpc)
)]

//! # simonspeck-simd
//!
//! Vectorized bulk-encryption core for the SIMON-128 and SPECK-128 block
//! ciphers. Key scheduling is out of scope: every entry point here takes an
//! already-expanded round-key array and runs the cipher's round function
//! over blocks in place.
//!
//! Three accelerated backends are implemented against the same [`Backend`]
//! abstraction: x86/x86_64 SSSE3, AArch64 NEON, and (nightly-only) PowerPC
//! AltiVec/VSX, plus a portable scalar fallback used on every other target
//! and whenever a required CPU feature is absent. [`kernels::CipherKernel`]
//! pairs a cipher direction with a round-key layout and is written once per
//! cipher, generic over `Backend`; [`driver::advanced_process_blocks`] is the
//! single outer loop every combination of cipher, direction, and backend
//! runs through.
//!
//! # Usage
//! ```rust
//! use simonspeck_simd::kernels::portable::Portable;
//! use simonspeck_simd::kernels::{CipherKernel, SpeckEncrypt};
//!
//! // Caller-supplied, already-expanded SPECK-128/128 round keys
//! // (pre-splatted: each of the 32 round keys duplicated into two u64 slots).
//! let round_keys = [0u64; 64];
//! let mut blocks = [[0u8; 16]; 2];
//! unsafe {
//!     SpeckEncrypt::pair(Portable, &mut blocks, &round_keys, 32);
//! }
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod backend;
pub mod driver;
mod engine;
#[doc(hidden)]
pub mod kernels;
pub(crate) mod types;

pub use backend::Backend;
pub use driver::{advanced_process_blocks, Flags};
pub use engine::dispatcher::{simon_decrypt, simon_encrypt, speck_decrypt, speck_encrypt};
pub use kernels::{CipherKernel, KeyLayout, SimonDecrypt, SimonEncrypt, SpeckDecrypt, SpeckEncrypt};
pub use types::BackendSelectError;

/// Returns the name of the hardware backend [`speck_encrypt`] and friends
/// currently dispatch to.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::active_backend_name()
}
