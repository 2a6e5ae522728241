//! CLI Commands
//!
//! Commands organized as separate modules, one per cipher direction.

mod decrypt;
mod encrypt;
mod support;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub use decrypt::run_decrypt;
pub use encrypt::run_encrypt;

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CipherArg {
    Speck,
    Simon,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum ModeArg {
    /// Electronic codebook: each block encrypted/decrypted independently.
    Ecb,
    /// Counter mode: the cipher's encrypt direction run over an incrementing
    /// counter, XORed with the data stream. Symmetric — encrypt and decrypt
    /// perform the same operation.
    Ctr,
    /// Cipher block chaining, decrypt direction only. CBC encryption chains
    /// each block's input on the previous block's *output*, which the block
    /// driver here (built around an upfront, fully available buffer) cannot
    /// express; decryption only chains on the previous *input* block, which
    /// is already fully available, so it runs the same as any other mode.
    CbcDecrypt,
}

#[derive(Args, Debug)]
pub struct CryptArgs {
    /// Input file.
    pub input: PathBuf,
    /// Output file.
    pub output: PathBuf,
    /// Cipher to use.
    #[arg(long, value_enum, default_value_t = CipherArg::Speck)]
    pub cipher: CipherArg,
    /// Mode of operation.
    #[arg(long, value_enum, default_value_t = ModeArg::Ecb)]
    pub mode: ModeArg,
    /// Master key, hex-encoded (16/24/32 bytes for a 128/192/256-bit key).
    #[arg(long)]
    pub key: String,
    /// Initialization vector / counter seed, hex-encoded (16 bytes). Required
    /// for `ctr` and `cbc-decrypt`, ignored for `ecb`.
    #[arg(long)]
    pub iv: Option<String>,
}
