//! SSSE3 Backend (x86 / x86_64)
//!
//! # Safety
//!
//! Every method requires the `ssse3` target feature to be enabled for the
//! calling code. The `engine::dispatcher` functions (`speck_encrypt` and
//! friends) validate this via `is_x86_feature_detected!("ssse3")` before ever
//! reaching these functions; callers constructing a `Ssse3` value directly
//! are responsible for the same validation.

#![allow(clippy::cast_possible_wrap)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, _mm_add_epi64, _mm_and_si128, _mm_load_si128, _mm_loadu_si128, _mm_or_si128,
    _mm_set1_epi64x, _mm_setzero_si128, _mm_shuffle_epi8, _mm_slli_epi64, _mm_srli_epi64,
    _mm_storeu_si128, _mm_sub_epi64, _mm_unpackhi_epi64, _mm_unpacklo_epi64, _mm_xor_si128,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_add_epi64, _mm_and_si128, _mm_load_si128, _mm_loadu_si128, _mm_or_si128,
    _mm_set1_epi64x, _mm_setzero_si128, _mm_shuffle_epi8, _mm_slli_epi64, _mm_srli_epi64,
    _mm_storeu_si128, _mm_sub_epi64, _mm_unpackhi_epi64, _mm_unpacklo_epi64, _mm_xor_si128,
};

use crate::backend::Backend;

/// The SSSE3 backend marker. Zero-sized; implements [`Backend`] over `__m128i`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ssse3;

/// Byte-permute mask rotating each 8-byte lane left by one byte (rotl64::<8>).
/// `out[i] = in[(i - 1) mod 8]` within each lane.
const ROTL8_MASK: [i8; 16] = [7, 0, 1, 2, 3, 4, 5, 6, 15, 8, 9, 10, 11, 12, 13, 14];
/// Byte-permute mask rotating each 8-byte lane right by one byte (rotr64::<8>).
/// `out[i] = in[(i + 1) mod 8]` within each lane.
const ROTR8_MASK: [i8; 16] = [1, 2, 3, 4, 5, 6, 7, 0, 9, 10, 11, 12, 13, 14, 15, 8];

impl Backend for Ssse3 {
    type Vector = __m128i;

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn load_unaligned128(ptr: *const u8) -> Self::Vector {
        _mm_loadu_si128(ptr.cast())
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn store_unaligned128(ptr: *mut u8, v: Self::Vector) {
        _mm_storeu_si128(ptr.cast(), v);
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn load_aligned128(ptr: *const u8) -> Self::Vector {
        _mm_load_si128(ptr.cast())
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn broadcast64(ptr: *const u64) -> Self::Vector {
        _mm_set1_epi64x(core::ptr::read_unaligned(ptr) as i64)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn zero() -> Self::Vector {
        _mm_setzero_si128()
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn xor(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_xor_si128(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_and_si128(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_or_si128(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn add64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_add_epi64(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn sub64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_sub_epi64(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn rotl64<const R: u32>(v: Self::Vector) -> Self::Vector {
        if R == 8 {
            _mm_shuffle_epi8(v, _mm_loadu_si128(ROTL8_MASK.as_ptr().cast()))
        } else {
            _mm_or_si128(_mm_slli_epi64(v, R as i32), _mm_srli_epi64(v, (64 - R) as i32))
        }
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn rotr64<const R: u32>(v: Self::Vector) -> Self::Vector {
        if R == 8 {
            _mm_shuffle_epi8(v, _mm_loadu_si128(ROTR8_MASK.as_ptr().cast()))
        } else {
            _mm_or_si128(_mm_srli_epi64(v, R as i32), _mm_slli_epi64(v, (64 - R) as i32))
        }
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn unpack_hi64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_unpackhi_epi64(a, b)
    }

    #[target_feature(enable = "ssse3")]
    #[allow(unsafe_code)]
    unsafe fn unpack_lo64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        _mm_unpacklo_epi64(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ssse3, ROTL8_MASK, ROTR8_MASK};
    use crate::backend::Backend;

    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_mm_loadu_si128, _mm_or_si128, _mm_shuffle_epi8, _mm_slli_epi64, _mm_srli_epi64};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_mm_loadu_si128, _mm_or_si128, _mm_shuffle_epi8, _mm_slli_epi64, _mm_srli_epi64};

    #[test]
    fn rotl8_byte_permute_matches_generic_shift() {
        if !is_x86_feature_detected!("ssse3") {
            return;
        }
        let lanes: [u64; 2] = [0x0123_4567_89ab_cdef, 0x1122_3344_5566_7788];
        unsafe {
            let v = Ssse3::load_unaligned128(lanes.as_ptr().cast());
            let permuted = Ssse3::rotl64::<8>(v);
            let generic = _mm_or_si128(_mm_slli_epi64(v, 8), _mm_srli_epi64(v, 56));
            let permuted_bytes: [u8; 16] = core::mem::transmute(permuted);
            let generic_bytes: [u8; 16] = core::mem::transmute(generic);
            assert_eq!(permuted_bytes, generic_bytes);

            let permuted_r = Ssse3::rotr64::<8>(v);
            let generic_r = _mm_or_si128(_mm_srli_epi64(v, 8), _mm_slli_epi64(v, 56));
            let permuted_r_bytes: [u8; 16] = core::mem::transmute(permuted_r);
            let generic_r_bytes: [u8; 16] = core::mem::transmute(generic_r);
            assert_eq!(permuted_r_bytes, generic_r_bytes);

            // Sanity: the masks used above are exactly ROTL8_MASK/ROTR8_MASK.
            let via_table = _mm_shuffle_epi8(v, _mm_loadu_si128(ROTL8_MASK.as_ptr().cast()));
            let via_table_bytes: [u8; 16] = core::mem::transmute(via_table);
            assert_eq!(via_table_bytes, permuted_bytes);
            let via_table_r = _mm_shuffle_epi8(v, _mm_loadu_si128(ROTR8_MASK.as_ptr().cast()));
            let via_table_r_bytes: [u8; 16] = core::mem::transmute(via_table_r);
            assert_eq!(via_table_r_bytes, permuted_r_bytes);
        }
    }
}
