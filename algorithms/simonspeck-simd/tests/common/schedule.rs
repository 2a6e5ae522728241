//! Test-only scalar SIMON-128 / SPECK-128 key schedule.
//!
//! Round-key expansion is explicitly out of the core crate's scope (callers
//! supply already-expanded keys); the test vectors in `vectors.rs` are
//! stated as master keys, so this module turns a master key into the
//! round-key arrays the kernels expect, in both layouts the driver
//! recognizes. It is never compiled into the library itself.

use simonspeck_simd::KeyLayout;

const SPECK_ALPHA: u32 = 8;
const SPECK_BETA: u32 = 3;

/// Round constants for SIMON's key schedule, one 62-bit sequence per key-word
/// count (index 0 unused, `z[m]` selects the sequence for an `m`-word key).
/// Intended to be Table 3 of Beaulieu et al., "The SIMON and SPECK Families
/// of Lightweight Block Ciphers" (2013); the 128-bit block size uses z2
/// (m=2), z3 (m=3), and z4 (m=4). UNVERIFIED: transcribed from memory rather
/// than a machine-readable source, and does not currently reproduce the
/// vectors in `vectors.rs` (see DESIGN.md, "Known risk: SIMON z-sequence
/// transcription"). The SIMON round-trip tests are unaffected since they
/// only depend on the schedule being self-consistent with its own inverse.
const SIMON_Z: [&[u8]; 5] = [
    b"1111101000100101011000011100110111110100010010101100001110011",
    b"1111101000100101011000011100110111110100010010101100001110011",
    b"1010111101110000001101001001100010100001000111011001010000010",
    b"1101101110101100011001011110000001001000101001110011010000111",
    b"1101000111100110101101100010000001011100001100101001001110111",
];

fn simon_z_bit(m: usize, i: usize) -> u64 {
    let seq = SIMON_Z[m];
    u64::from(seq[i % seq.len()] == b'1')
}

/// Expand a SIMON-128 master key (`m` 64-bit words, big-endian display order
/// `key[0]` most significant) into `rounds` round keys.
pub fn simon_schedule(key: &[u64], rounds: usize) -> Vec<u64> {
    let m = key.len();
    let mut k = vec![0u64; rounds];
    k[..m].copy_from_slice(key);
    for i in m..rounds {
        let mut tmp = k[i - 1].rotate_right(3);
        if m == 4 {
            tmp ^= k[i - 3];
        }
        tmp ^= tmp.rotate_right(1);
        k[i] = !k[i - m] ^ tmp ^ simon_z_bit(m, i - m) ^ 3;
    }
    k
}

/// Expand a SPECK-128 master key (`m` 64-bit words) into `rounds` round keys.
///
/// Per Beaulieu et al., Table 2: the key is read in big-endian word order
/// `K_{m-1} .. K_1 K_0` (so `key[0] == K_{m-1}`, `key[m-1] == K_0`); the
/// schedule seeds `a` from `K_0` (the *last* array word) and the `l` array
/// from `K_1 .. K_{m-1}` in increasing index, i.e. the remaining words of
/// `key` in reverse.
pub fn speck_schedule(key: &[u64], rounds: usize) -> Vec<u64> {
    let m = key.len();
    let mut round_keys = Vec::with_capacity(rounds);
    let mut a = key[m - 1];
    let mut l: Vec<u64> = key[..m - 1].iter().rev().copied().collect();
    round_keys.push(a);
    for i in 0..rounds - 1 {
        let idx = i % l.len();
        l[idx] = (l[idx].rotate_right(SPECK_ALPHA)).wrapping_add(a) ^ i as u64;
        a = a.rotate_left(SPECK_BETA) ^ l[idx];
        round_keys.push(a);
    }
    round_keys
}

/// Re-lay out a scalar round-key schedule into the pre-splatted form
/// (`KeyLayout::PreSplatted`) the encryption kernels expect.
pub fn pre_splat(scalar: &[u64]) -> Vec<u64> {
    scalar.iter().flat_map(|&k| [k, k]).collect()
}

/// Returns the round-key schedule for `kernel_layout`, expanding `key` for
/// `cipher` and re-laying it out as needed.
pub fn schedule_for(cipher: Cipher, key: &[u64], rounds: usize, layout: KeyLayout) -> Vec<u64> {
    let scalar = match cipher {
        Cipher::Simon => simon_schedule(key, rounds),
        Cipher::Speck => speck_schedule(key, rounds),
    };
    match layout {
        KeyLayout::Scalar => scalar,
        KeyLayout::PreSplatted => pre_splat(&scalar),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    Simon,
    Speck,
}
