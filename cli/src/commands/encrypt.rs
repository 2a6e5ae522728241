//! `encrypt` command: ECB and CTR modes run in the forward (encrypt)
//! direction. CBC-decrypt has no encrypt counterpart here — see
//! [`super::ModeArg::CbcDecrypt`].

use anyhow::{bail, Context, Result};
use simonspeck_simd::kernels::KeyLayout;
use simonspeck_simd::Flags;

use super::support::{parse_iv, parse_key, process_ecb};
use super::{CryptArgs, ModeArg};
use crate::schedule::{schedule_for, Cipher};

const BLOCK: usize = 16;

pub fn run_encrypt(args: &CryptArgs) -> Result<()> {
    let (cipher, key_words, rounds) = parse_key(args.cipher, &args.key)?;
    let data = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let output = match args.mode {
        ModeArg::Ecb => {
            if data.len() % BLOCK != 0 {
                bail!("ECB input must be a whole number of 16-byte blocks ({} bytes given)", data.len());
            }
            let round_keys = schedule_for(cipher, &key_words, rounds, KeyLayout::PreSplatted);
            let mut out = vec![0u8; data.len()];
            process_ecb(
                |in_chunk, out_chunk| {
                    dispatch_encrypt(cipher, &round_keys, rounds, in_chunk, None, out_chunk, Flags::ALLOW_PARALLEL);
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
            let round_keys = schedule_for(cipher, &key_words, rounds, KeyLayout::PreSplatted);
            let mut out = vec![0u8; data.len()];
            dispatch_encrypt(
                cipher,
                &round_keys,
                rounds,
                &iv,
                Some(&data),
                &mut out,
                Flags::ALLOW_PARALLEL | Flags::IN_BLOCK_IS_COUNTER,
            );
            out
        }
        ModeArg::CbcDecrypt => {
            bail!("cbc-decrypt is a decrypt-direction-only mode; chaining an encryption on the not-yet-computed previous ciphertext block isn't expressible over this driver's upfront-buffer model");
        }
    };

    std::fs::write(&args.output, output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

/// Run the forward (encrypt) direction on the fastest backend available on
/// this host, for whichever cipher the caller picked.
fn dispatch_encrypt(
    cipher: Cipher,
    round_keys: &[u64],
    rounds: usize,
    in_blocks: &[u8],
    xor_blocks: Option<&[u8]>,
    out_blocks: &mut [u8],
    flags: Flags,
) -> usize {
    match cipher {
        Cipher::Speck => simonspeck_simd::speck_encrypt(round_keys, rounds, in_blocks, xor_blocks, out_blocks, flags),
        Cipher::Simon => simonspeck_simd::simon_encrypt(round_keys, rounds, in_blocks, xor_blocks, out_blocks, flags),
    }
}
