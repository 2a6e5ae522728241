//! AltiVec/VSX Backend (64-bit PowerPC)
//!
//! Gated behind the `nightly-altivec` feature and `#![feature(stdarch_powerpc)]`
//! (set in `lib.rs`) since `core::arch::powerpc64` doubleword vector support is
//! not yet stabilized. 32-bit PowerPC is not supported; those targets fall
//! back to [`crate::kernels::portable::Portable`].
//!
//! POWER has a native doubleword rotate (`vec_rl`), so unlike the x86/ARM
//! backends there is no separate byte-permute specialization for `R == 8` —
//! `vec_rl` already covers it optimally.
//!
//! # Safety
//!
//! Every method requires the `vsx` target feature to be enabled for the
//! calling code, validated by the `engine::dispatcher` functions before
//! these functions are ever reached.

use core::arch::powerpc64::{
    vector_unsigned_char, vector_unsigned_long_long, vec_add, vec_and, vec_or, vec_perm, vec_rl,
    vec_splats, vec_sub, vec_xor,
};

use crate::backend::Backend;

/// The AltiVec/VSX backend marker. Zero-sized; implements [`Backend`] over
/// `vector_unsigned_long_long`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Altivec;

// `vec_perm`'s control vector selects, per output byte, one byte from the
// 32-byte concatenation of its two vector operands. The byte-index convention
// differs between big- and little-endian PowerPC builds (see spec §4.4).
#[cfg(target_endian = "little")]
const UNPACK_HI_MASK: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 16, 17, 18, 19, 20, 21, 22, 23];
#[cfg(target_endian = "little")]
const UNPACK_LO_MASK: [u8; 16] = [8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31];

#[cfg(target_endian = "big")]
const UNPACK_HI_MASK: [u8; 16] = [8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31];
#[cfg(target_endian = "big")]
const UNPACK_LO_MASK: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 16, 17, 18, 19, 20, 21, 22, 23];

impl Backend for Altivec {
    type Vector = vector_unsigned_long_long;

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn load_unaligned128(ptr: *const u8) -> Self::Vector {
        ptr.cast::<Self::Vector>().read_unaligned()
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn store_unaligned128(ptr: *mut u8, v: Self::Vector) {
        ptr.cast::<Self::Vector>().write_unaligned(v);
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn load_aligned128(ptr: *const u8) -> Self::Vector {
        ptr.cast::<Self::Vector>().read()
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn broadcast64(ptr: *const u64) -> Self::Vector {
        vec_splats(core::ptr::read_unaligned(ptr))
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn zero() -> Self::Vector {
        vec_splats(0u64)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn xor(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vec_xor(a, b)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vec_and(a, b)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vec_or(a, b)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn add64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vec_add(a, b)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn sub64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vec_sub(a, b)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn rotl64<const R: u32>(v: Self::Vector) -> Self::Vector {
        vec_rl(v, vec_splats(u64::from(R)))
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn rotr64<const R: u32>(v: Self::Vector) -> Self::Vector {
        vec_rl(v, vec_splats(u64::from(64 - R)))
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn unpack_hi64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        let mask: vector_unsigned_char = core::mem::transmute(UNPACK_HI_MASK);
        vec_perm(a, b, mask)
    }

    #[target_feature(enable = "vsx")]
    #[allow(unsafe_code)]
    unsafe fn unpack_lo64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        let mask: vector_unsigned_char = core::mem::transmute(UNPACK_LO_MASK);
        vec_perm(a, b, mask)
    }
}
