//! `decrypt` command: ECB, CTR (self-inverse, runs the encrypt direction
//! over the counter), and CBC-decrypt.

use anyhow::{bail, Context, Result};
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::Flags;

use super::support::{parse_iv, parse_key, process_ecb};
use super::{CryptArgs, ModeArg};
use crate::schedule::{schedule_for, Cipher};

const BLOCK: usize = 16;

pub fn run_decrypt(args: &CryptArgs) -> Result<()> {
    let (cipher, key_words, rounds) = parse_key(args.cipher, &args.key)?;
    let data = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let output = match args.mode {
        ModeArg::Ecb => {
            if data.len() % BLOCK != 0 {
                bail!("ECB input must be a whole number of 16-byte blocks ({} bytes given)", data.len());
            }
            let round_keys = schedule_for(cipher, &key_words, rounds, KeyLayout::Scalar);
            let mut out = vec![0u8; data.len()];
            process_ecb(
                |in_chunk, out_chunk| {
                    dispatch_decrypt(cipher, &round_keys, rounds, in_chunk, None, out_chunk, Flags::ALLOW_PARALLEL);
                },
                &data,
                &mut out,
            );
            out
        }
        ModeArg::Ctr => {
            let iv = args
                .iv
                .as_deref()
                .map(parse_iv)
                .context("--iv is required for ctr mode")??;
            if data.len() % BLOCK != 0 {
                bail!("CTR input must be a whole number of 16-byte blocks ({} bytes given)", data.len());
            }
            // CTR decrypts by running the same keystream-generating encrypt
            // direction over the counter and XORing it against the data,
            // same as `encrypt`'s CTR branch.
            let round_keys = schedule_for(cipher, &key_words, rounds, KeyLayout::PreSplatted);
            let mut out = vec![0u8; data.len()];
            let flags = Flags::ALLOW_PARALLEL | Flags::IN_BLOCK_IS_COUNTER;
            match cipher {
                Cipher::Speck => {
                    simonspeck_simd::speck_encrypt(&round_keys, rounds, &iv, Some(&data), &mut out, flags);
                }
                Cipher::Simon => {
                    simonspeck_simd::simon_encrypt(&round_keys, rounds, &iv, Some(&data), &mut out, flags);
                }
            }
            out
        }
        ModeArg::CbcDecrypt => {
            let iv = args
                .iv
                .as_deref()
                .map(parse_iv)
                .context("--iv is required for cbc-decrypt mode")??;
            if data.len() % BLOCK != 0 {
                bail!("CBC input must be a whole number of 16-byte blocks ({} bytes given)", data.len());
            }
            // Ciphertext-chaining buffer: IV followed by the ciphertext, so
            // block i's XOR source (the previous ciphertext block) is always
            // 16 bytes behind the block currently being decrypted — including
            // block 0, whose "previous ciphertext" is the IV.
            let mut chained = Vec::with_capacity(BLOCK + data.len());
            chained.extend_from_slice(&iv);
            chained.extend_from_slice(&data);

            let round_keys = schedule_for(cipher, &key_words, rounds, KeyLayout::Scalar);
            let mut out = vec![0u8; data.len()];
            let in_blocks = &chained[BLOCK..];
            let xor_blocks = &chained[..data.len()];
            dispatch_decrypt(cipher, &round_keys, rounds, in_blocks, Some(xor_blocks), &mut out, Flags::ALLOW_PARALLEL);
            out
        }
    };

    std::fs::write(&args.output, output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

/// Run the inverse (decrypt) direction on the fastest backend available on
/// this host, for whichever cipher the caller picked.
fn dispatch_decrypt(
    cipher: Cipher,
    round_keys: &[u64],
    rounds: usize,
    in_blocks: &[u8],
    xor_blocks: Option<&[u8]>,
    out_blocks: &mut [u8],
    flags: Flags,
) -> usize {
    match cipher {
        Cipher::Speck => simonspeck_simd::speck_decrypt(round_keys, rounds, in_blocks, xor_blocks, out_blocks, flags),
        Cipher::Simon => simonspeck_simd::simon_decrypt(round_keys, rounds, in_blocks, xor_blocks, out_blocks, flags),
    }
}
