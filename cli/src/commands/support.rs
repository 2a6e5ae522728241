//! Shared key-parsing and round-count helpers for the `encrypt`/`decrypt`
//! commands.

use anyhow::{bail, Context, Result};
use simonspeck_simd::kernels::constants::{
    SIMON128_128_ROUNDS, SIMON128_192_ROUNDS, SIMON128_256_ROUNDS, SPECK128_128_ROUNDS,
    SPECK128_192_ROUNDS, SPECK128_256_ROUNDS,
};

use super::CipherArg;
use crate::schedule::Cipher;

/// Decode a hex master key into 64-bit words (big-endian per word, read
/// left to right), and return the round count for `cipher` at that key size.
pub fn parse_key(cipher: CipherArg, hex_key: &str) -> Result<(Cipher, Vec<u64>, usize)> {
    let bytes = hex::decode(hex_key).context("key is not valid hex")?;
    if bytes.len() % 8 != 0 {
        bail!("key must be a whole number of 64-bit words ({} bytes given)", bytes.len());
    }
    let words: Vec<u64> = bytes
        .chunks_exact(8)
        .map(|c| {
            let mut word = [0u8; 8];
            word.copy_from_slice(c);
            u64::from_be_bytes(word)
        })
        .collect();

    let (cipher, rounds) = match (cipher, words.len()) {
        (CipherArg::Speck, 2) => (Cipher::Speck, SPECK128_128_ROUNDS),
        (CipherArg::Speck, 3) => (Cipher::Speck, SPECK128_192_ROUNDS),
        (CipherArg::Speck, 4) => (Cipher::Speck, SPECK128_256_ROUNDS),
        (CipherArg::Simon, 2) => (Cipher::Simon, SIMON128_128_ROUNDS),
        (CipherArg::Simon, 3) => (Cipher::Simon, SIMON128_192_ROUNDS),
        (CipherArg::Simon, 4) => (Cipher::Simon, SIMON128_256_ROUNDS),
        (_, n) => bail!("unsupported key size: {} words (expected 2, 3, or 4)", n),
    };

    Ok((cipher, words, rounds))
}

/// Decode a 16-byte hex IV/counter seed.
pub fn parse_iv(hex_iv: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_iv).context("IV is not valid hex")?;
    let iv: [u8; 16] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("IV must be 16 bytes, got {}", b.len()))?;
    Ok(iv)
}

/// ECB blocks are independent of one another, so large buffers are split
/// into chunks and handed to a Rayon thread pool; each chunk still goes
/// through the driver's own `ALLOW_PARALLEL` 6-block/2-block grouping.
#[cfg(feature = "multithread")]
const CHUNK_BLOCKS: usize = 4096; // 64 KiB per chunk

#[cfg(feature = "multithread")]
pub fn process_ecb(op: impl Fn(&[u8], &mut [u8]) + Sync, data: &[u8], out: &mut [u8]) {
    use rayon::prelude::*;

    let chunk_bytes = CHUNK_BLOCKS * 16;
    if data.len() <= chunk_bytes {
        op(data, out);
        return;
    }
    data.par_chunks(chunk_bytes)
        .zip(out.par_chunks_mut(chunk_bytes))
        .for_each(|(in_chunk, out_chunk)| op(in_chunk, out_chunk));
}

#[cfg(not(feature = "multithread"))]
pub fn process_ecb(op: impl Fn(&[u8], &mut [u8]), data: &[u8], out: &mut [u8]) {
    op(data, out);
}
