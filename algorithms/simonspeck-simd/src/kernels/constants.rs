//! Cipher Constants
//!
//! Fixed rotate amounts and round counts for the six standard SIMON-128 /
//! SPECK-128 parameterizations. These are the published algorithm constants,
//! not implementation-chosen values.

use static_assertions::const_assert;

// =============================================================================
// SPECK-128 ROTATE AMOUNTS
// =============================================================================

/// SPECK right-rotate amount applied to the `x` half before the addition.
pub const SPECK_ALPHA: u32 = 8;
/// SPECK left-rotate amount applied to the `y` half after the XOR.
pub const SPECK_BETA: u32 = 3;

// =============================================================================
// SIMON-128 f-FUNCTION ROTATE AMOUNTS
// =============================================================================

/// SIMON `f(v) = rotl(v, J) ^ (rotl(v, A) & rotl(v, B))` rotate amounts.
pub const SIMON_A: u32 = 1;
pub const SIMON_B: u32 = 8;
pub const SIMON_J: u32 = 2;

// =============================================================================
// ROUND COUNTS
// =============================================================================

/// Round count for SPECK-128/128.
pub const SPECK128_128_ROUNDS: usize = 32;
/// Round count for SPECK-128/192.
pub const SPECK128_192_ROUNDS: usize = 33;
/// Round count for SPECK-128/256.
pub const SPECK128_256_ROUNDS: usize = 34;

/// Round count for SIMON-128/128.
pub const SIMON128_128_ROUNDS: usize = 68;
/// Round count for SIMON-128/192.
pub const SIMON128_192_ROUNDS: usize = 69;
/// Round count for SIMON-128/256.
pub const SIMON128_256_ROUNDS: usize = 72;

/// Bytes in one cipher block (X half + Y half).
pub const BLOCK_SIZE: usize = 16;
/// Blocks advanced per "parallel" driver iteration (three independent pairs).
pub const PARALLEL_BLOCKS: usize = 6;
/// Blocks advanced per pair-kernel driver iteration.
pub const PAIR_BLOCKS: usize = 2;

const_assert!(PARALLEL_BLOCKS % PAIR_BLOCKS == 0);
const_assert!(SPECK128_128_ROUNDS < SPECK128_192_ROUNDS);
const_assert!(SPECK128_192_ROUNDS < SPECK128_256_ROUNDS);
const_assert!(SIMON128_128_ROUNDS < SIMON128_192_ROUNDS);
const_assert!(SIMON128_192_ROUNDS < SIMON128_256_ROUNDS);
