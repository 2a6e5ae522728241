//! Portable Reference Backend
//!
//! Pure safe Rust, no `target_feature` requirements, any target. Serves as the
//! universal fallback and as the cross-checkable reference the accelerated
//! backends are validated against (see the `cross_backend` integration test).
//!
//! A "vector" here is `[u64; 2]` with `[0]` the low 64-bit lane and `[1]` the
//! high lane, matching the host's native SIMD register convention closely
//! enough that the same round logic in `kernels::speck`/`kernels::simon`
//! produces byte-identical output on every backend.

use crate::backend::Backend;

/// The portable backend marker. Zero-sized; implements [`Backend`] with plain
/// integer arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Portable;

impl Backend for Portable {
    type Vector = [u64; 2];

    #[allow(unsafe_code)]
    unsafe fn load_unaligned128(ptr: *const u8) -> Self::Vector {
        let hi = u64::from_le(core::ptr::read_unaligned(ptr.cast::<u64>()));
        let lo = u64::from_le(core::ptr::read_unaligned(ptr.add(8).cast::<u64>()));
        [lo, hi]
    }

    #[allow(unsafe_code)]
    unsafe fn store_unaligned128(ptr: *mut u8, v: Self::Vector) {
        core::ptr::write_unaligned(ptr.cast::<u64>(), v[1].to_le());
        core::ptr::write_unaligned(ptr.add(8).cast::<u64>(), v[0].to_le());
    }

    #[allow(unsafe_code)]
    unsafe fn load_aligned128(ptr: *const u8) -> Self::Vector {
        // No alignment requirement on the portable backend; delegate.
        Self::load_unaligned128(ptr)
    }

    #[allow(unsafe_code)]
    unsafe fn broadcast64(ptr: *const u64) -> Self::Vector {
        let v = core::ptr::read_unaligned(ptr);
        [v, v]
    }

    #[allow(unsafe_code)]
    unsafe fn zero() -> Self::Vector {
        [0, 0]
    }

    #[allow(unsafe_code)]
    unsafe fn xor(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0] ^ b[0], a[1] ^ b[1]]
    }

    #[allow(unsafe_code)]
    unsafe fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0] & b[0], a[1] & b[1]]
    }

    #[allow(unsafe_code)]
    unsafe fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0] | b[0], a[1] | b[1]]
    }

    #[allow(unsafe_code)]
    unsafe fn add64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0].wrapping_add(b[0]), a[1].wrapping_add(b[1])]
    }

    #[allow(unsafe_code)]
    unsafe fn sub64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0].wrapping_sub(b[0]), a[1].wrapping_sub(b[1])]
    }

    #[allow(unsafe_code)]
    unsafe fn rotl64<const R: u32>(v: Self::Vector) -> Self::Vector {
        [v[0].rotate_left(R), v[1].rotate_left(R)]
    }

    #[allow(unsafe_code)]
    unsafe fn rotr64<const R: u32>(v: Self::Vector) -> Self::Vector {
        [v[0].rotate_right(R), v[1].rotate_right(R)]
    }

    #[allow(unsafe_code)]
    unsafe fn unpack_hi64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[1], b[1]]
    }

    #[allow(unsafe_code)]
    unsafe fn unpack_lo64(a: Self::Vector, b: Self::Vector) -> Self::Vector {
        [a[0], b[0]]
    }
}
