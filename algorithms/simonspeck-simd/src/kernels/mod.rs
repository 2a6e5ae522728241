//! Cipher Kernels
//!
//! Contains the generic SIMON/SPECK round logic (`simon`, `speck`) and the
//! hardware-specific `Backend` implementations it runs over.

use cfg_if::cfg_if;

pub mod constants;
pub mod portable;

cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        pub mod ssse3;
    } else if #[cfg(target_arch = "aarch64")] {
        pub mod neon;
    } else if #[cfg(all(target_arch = "powerpc64", feature = "nightly-altivec"))] {
        pub mod altivec;
    }
}

mod simon;
mod speck;

use crate::backend::Backend;

/// Round-key schedule layout a kernel expects.
///
/// Pre-splatted: each round key duplicated into two adjacent `u64` slots
/// (`len == rounds * 2`), loaded with a single aligned 128-bit load.
/// Scalar: one `u64` per round (`len == rounds`), broadcast by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLayout {
    PreSplatted,
    Scalar,
}

/// A cipher direction instantiated for one backend: the unit the block driver
/// is generic over. Implemented by the four zero-sized marker types below.
///
/// # Safety
/// `encrypt_or_decrypt_pair` and `encrypt_or_decrypt_six` assume the backend's
/// required CPU feature is already enabled for the caller, exactly like the
/// individual `Backend` methods they call.
pub trait CipherKernel<B: Backend> {
    /// Layout `round_keys` must use for this kernel.
    const KEY_LAYOUT: KeyLayout;

    /// Run `rounds` rounds over two blocks in place.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn pair(b: B, blocks: &mut [[u8; 16]; 2], round_keys: &[u64], rounds: usize);

    /// Run `rounds` rounds over six blocks (three independent pairs) in place.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn six(b: B, blocks: &mut [[u8; 16]; 6], round_keys: &[u64], rounds: usize);
}

/// SPECK-128 encryption, pre-splatted round-key layout.
#[derive(Debug, Clone, Copy)]
pub struct SpeckEncrypt;
/// SPECK-128 decryption, scalar round-key layout.
#[derive(Debug, Clone, Copy)]
pub struct SpeckDecrypt;
/// SIMON-128 encryption, pre-splatted round-key layout.
#[derive(Debug, Clone, Copy)]
pub struct SimonEncrypt;
/// SIMON-128 decryption, scalar round-key layout.
#[derive(Debug, Clone, Copy)]
pub struct SimonDecrypt;

impl<B: Backend> CipherKernel<B> for SpeckEncrypt {
    const KEY_LAYOUT: KeyLayout = KeyLayout::PreSplatted;

    #[allow(unsafe_code)]
    unsafe fn pair(b: B, blocks: &mut [[u8; 16]; 2], round_keys: &[u64], rounds: usize) {
        speck::encrypt_pair(b, blocks, round_keys, rounds);
    }

    #[allow(unsafe_code)]
    unsafe fn six(b: B, blocks: &mut [[u8; 16]; 6], round_keys: &[u64], rounds: usize) {
        speck::encrypt_six(b, blocks, round_keys, rounds);
    }
}

impl<B: Backend> CipherKernel<B> for SpeckDecrypt {
    const KEY_LAYOUT: KeyLayout = KeyLayout::Scalar;

    #[allow(unsafe_code)]
    unsafe fn pair(b: B, blocks: &mut [[u8; 16]; 2], round_keys: &[u64], rounds: usize) {
        speck::decrypt_pair(b, blocks, round_keys, rounds);
    }

    #[allow(unsafe_code)]
    unsafe fn six(b: B, blocks: &mut [[u8; 16]; 6], round_keys: &[u64], rounds: usize) {
        speck::decrypt_six(b, blocks, round_keys, rounds);
    }
}

impl<B: Backend> CipherKernel<B> for SimonEncrypt {
    const KEY_LAYOUT: KeyLayout = KeyLayout::PreSplatted;

    #[allow(unsafe_code)]
    unsafe fn pair(b: B, blocks: &mut [[u8; 16]; 2], round_keys: &[u64], rounds: usize) {
        simon::encrypt_pair(b, blocks, round_keys, rounds);
    }

    #[allow(unsafe_code)]
    unsafe fn six(b: B, blocks: &mut [[u8; 16]; 6], round_keys: &[u64], rounds: usize) {
        simon::encrypt_six(b, blocks, round_keys, rounds);
    }
}

impl<B: Backend> CipherKernel<B> for SimonDecrypt {
    const KEY_LAYOUT: KeyLayout = KeyLayout::Scalar;

    #[allow(unsafe_code)]
    unsafe fn pair(b: B, blocks: &mut [[u8; 16]; 2], round_keys: &[u64], rounds: usize) {
        simon::decrypt_pair(b, blocks, round_keys, rounds);
    }

    #[allow(unsafe_code)]
    unsafe fn six(b: B, blocks: &mut [[u8; 16]; 6], round_keys: &[u64], rounds: usize) {
        simon::decrypt_six(b, blocks, round_keys, rounds);
    }
}

/// Transpose two blocks into `(Xv, Yv)` lane form: `Xv = (a.X, b.X)`, `Yv = (a.Y, b.Y)`.
///
/// # Safety
/// See `Backend`'s trait-level safety note.
#[inline]
#[allow(unsafe_code)]
unsafe fn transpose_pair<B: Backend>(
    _b: B,
    block0: &[u8; 16],
    block1: &[u8; 16],
) -> (B::Vector, B::Vector) {
    let v0 = B::load_unaligned128(block0.as_ptr());
    let v1 = B::load_unaligned128(block1.as_ptr());
    (B::unpack_hi64(v0, v1), B::unpack_lo64(v0, v1))
}

/// Inverse of [`transpose_pair`]: writes `(Xv, Yv)` back out as two blocks.
///
/// # Safety
/// See `Backend`'s trait-level safety note.
#[inline]
#[allow(unsafe_code)]
unsafe fn detranspose_pair<B: Backend>(
    _b: B,
    xv: B::Vector,
    yv: B::Vector,
    block0: &mut [u8; 16],
    block1: &mut [u8; 16],
) {
    let lo = B::unpack_lo64(yv, xv);
    let hi = B::unpack_hi64(yv, xv);
    B::store_unaligned128(block0.as_mut_ptr(), lo);
    B::store_unaligned128(block1.as_mut_ptr(), hi);
}
