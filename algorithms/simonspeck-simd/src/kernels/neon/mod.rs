//! NEON Backend (AArch64)
//!
//! # Safety
//!
//! Every method requires the `neon` target feature to be enabled for the
//! calling code. On AArch64, NEON is part of the baseline ABI on almost every
//! real target, but the `engine::dispatcher` functions still validate it via
//! `is_aarch64_feature_detected!("neon")` for targets where it is optional.

use core::arch::aarch64::{
    uint64x2_t, vaddq_u64, vandq_u64, vcombine_u64, vdupq_n_s64, vdupq_n_u64, veorq_u64,
    vget_high_u64, vget_low_u64, vld1q_dup_u64, vld1q_u8, vld1q_u64, vorrq_u64, vqtbl1q_u8,
    vreinterpretq_u64_u8, vreinterpretq_u8_u64, vshlq_u64, vst1q_u8, vsubq_u64,
};

use crate::backend::Backend;

/// The NEON backend marker. Zero-sized; implements [`Backend`] over `uint64x2_t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neon;

/// Byte-permute table rotating each 8-byte lane left by one byte (rotl64::<8>).
const ROTL8_MASK: [u8; 16] = [7, 0, 1, 2, 3, 4, 5, 6, 15, 8, 9, 10, 11, 12, 13, 14];
/// Byte-permute table rotating each 8-byte lane right by one byte (rotr64::<8>).
const ROTR8_MASK: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 0, 9, 10, 11, 12, 13, 14, 15, 8];

impl Backend for Neon {
    type Vector = uint64x2_t;

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn load_unaligned128(ptr: *const u8) -> Self::Vector {
        vreinterpretq_u64_u8(vld1q_u8(ptr))
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn store_unaligned128(ptr: *mut u8, v: Self::Vector) {
        vst1q_u8(ptr, vreinterpretq_u8_u64(v));
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn load_aligned128(ptr: *const u8) -> Self::Vector {
        // NEON ld1/st1 never fault on misaligned addresses; no dedicated aligned load exists.
        vld1q_u64(ptr.cast())
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn broadcast64(ptr: *const u64) -> Self::Vector {
        vld1q_dup_u64(ptr)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn zero() -> Self::Vector {
        vdupq_n_u64(0)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn xor(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        veorq_u64(a, b)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vandq_u64(a, b)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vorrq_u64(a, b)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn add64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vaddq_u64(a, b)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn sub64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vsubq_u64(a, b)
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn rotl64<const R: u32>(v: Self::Vector) -> Self::Vector {
        if R == 8 {
            let idx = vld1q_u8(ROTL8_MASK.as_ptr());
            vreinterpretq_u64_u8(vqtbl1q_u8(vreinterpretq_u8_u64(v), idx))
        } else {
            // Variable-shift form: USHL treats a negative per-lane count as a right shift,
            // so the (R - 64) lane performs the complementary shift needed for a rotate.
            let left = vshlq_u64(v, vdupq_n_s64(i64::from(R)));
            let right = vshlq_u64(v, vdupq_n_s64(i64::from(R) - 64));
            vorrq_u64(left, right)
        }
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn rotr64<const R: u32>(v: Self::Vector) -> Self::Vector {
        if R == 8 {
            let idx = vld1q_u8(ROTR8_MASK.as_ptr());
            vreinterpretq_u64_u8(vqtbl1q_u8(vreinterpretq_u8_u64(v), idx))
        } else {
            let right = vshlq_u64(v, vdupq_n_s64(-i64::from(R)));
            let left = vshlq_u64(v, vdupq_n_s64(64 - i64::from(R)));
            vorrq_u64(right, left)
        }
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn unpack_hi64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vcombine_u64(vget_high_u64(a), vget_high_u64(b))
    }

    #[target_feature(enable = "neon")]
    #[allow(unsafe_code)]
    unsafe fn unpack_lo64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        vcombine_u64(vget_low_u64(a), vget_low_u64(b))
    }
}
