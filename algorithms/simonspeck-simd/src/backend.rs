//! Lane Primitive Abstraction
//!
//! `Backend` is the capability set every SIMD family below exposes: load/store,
//! bitwise ops, 64-bit modular add/sub, compile-time-parameterized rotate, and
//! the 64-bit unpack pair used to transpose two cipher blocks into sibling
//! lanes. Cipher kernels and the block driver are written once, generic over
//! `B: Backend`, and instantiated per hardware family in `kernels::{portable,
//! ssse3, neon, altivec}`.

/// A 128-bit vector viewed as two 64-bit lanes, plus the operations the SIMON
/// and SPECK round functions need on it.
///
/// # Safety
///
/// Every method on an accelerated implementation assumes the CPU feature that
/// backend requires is already enabled for the calling code (checked once by
/// the caller, e.g. `engine::dispatcher`, not per-call). Calling a method on a
/// backend whose required feature is absent from the host CPU is undefined
/// behavior. `kernels::portable::Portable` requires no feature and is safe to
/// call unconditionally.
pub trait Backend: Copy {
    /// The native 128-bit vector type for this backend.
    type Vector: Copy;

    /// Load 16 bytes, no alignment required.
    ///
    /// # Safety
    /// `ptr` must be valid for a 16-byte read. See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn load_unaligned128(ptr: *const u8) -> Self::Vector;

    /// Store 16 bytes, no alignment required.
    ///
    /// # Safety
    /// `ptr` must be valid for a 16-byte write. See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn store_unaligned128(ptr: *mut u8, v: Self::Vector);

    /// Load 16 aligned bytes (used only for the pre-splatted round-key layout).
    ///
    /// # Safety
    /// `ptr` must be 16-byte aligned and valid for a 16-byte read.
    #[allow(unsafe_code)]
    unsafe fn load_aligned128(ptr: *const u8) -> Self::Vector;

    /// Load one 64-bit word and duplicate it into both lanes.
    ///
    /// # Safety
    /// `ptr` must be valid for an 8-byte read.
    #[allow(unsafe_code)]
    unsafe fn broadcast64(ptr: *const u64) -> Self::Vector;

    /// The all-zero vector.
    ///
    /// # Safety
    /// Always safe; present to satisfy the trait's `unsafe fn` contract uniformly.
    #[allow(unsafe_code)]
    unsafe fn zero() -> Self::Vector;

    /// Lanewise XOR.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn xor(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise AND.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn and(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise OR.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn or(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise wrapping 64-bit addition.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn add64(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise wrapping 64-bit subtraction.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn sub64(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise rotate-left by a compile-time amount `R` in `1..64`.
    ///
    /// Implementations are expected to specialize `R == 8` to a single
    /// byte-permute; the specialization is selected at monomorphization
    /// time via the const generic, never at runtime.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn rotl64<const R: u32>(v: Self::Vector) -> Self::Vector;

    /// Lanewise rotate-right by a compile-time amount `R` in `1..64`.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn rotr64<const R: u32>(v: Self::Vector) -> Self::Vector;

    /// Pack the high 64-bit lane of `a` and of `b` into one vector: `(a.hi, b.hi)`.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn unpack_hi64(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Pack the low 64-bit lane of `a` and of `b` into one vector: `(a.lo, b.lo)`.
    ///
    /// # Safety
    /// See the trait-level safety note.
    #[allow(unsafe_code)]
    unsafe fn unpack_lo64(a: Self::Vector, b: Self::Vector) -> Self::Vector;
}
