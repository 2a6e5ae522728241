//! SIMON/SPECK-128 CLI
//!
//! Demo command-line tool for the block-cipher core: ECB, CTR, and
//! CBC-decrypt over a file.

mod commands;
mod schedule;

use anyhow::Result;
use clap::Parser;
use commands::{run_decrypt, run_encrypt, CryptArgs};

#[derive(Parser)]
#[command(name = "simonspeck")]
#[command(about = "Vectorized SIMON-128 / SPECK-128 block cipher demo", long_about = None)]
#[command(version)]
enum Cli {
    /// Encrypt a file.
    Encrypt(CryptArgs),
    /// Decrypt a file.
    Decrypt(CryptArgs),
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Encrypt(args) => run_encrypt(&args),
        Cli::Decrypt(args) => run_decrypt(&args),
    }
}
