//! Implements the "inspect" subcommand.
//!
//! Inspection is purely structural. It needs no key store and performs no
//! signature check, so nothing it prints says the blob is authentic.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use keywrap::blob::{decode_key_path, CekBlob};
use sha2::{Digest, Sha256};

pub const NAME: &str = "inspect";

pub fn command() -> Command {
    Command::new(NAME)
        .about("Decodes the fields of a wrapped key blob without any cryptography")
        .arg(
            Arg::new("BLOB_FILE")
                .help("File holding the wrapped key blob")
                .required(true)
                .num_args(1),
        )
}

pub fn execute(blob_file: &Path) -> Result<()> {
    let bytes = fs::read(blob_file)
        .with_context(|| format!("failed to read blob from {}", blob_file.display()))?;
    let blob = CekBlob::decode(&bytes)?;

    println!("file:        {} ({} bytes)", blob_file.display(), bytes.len());
    println!("version:     {}", blob.version);
    println!(
        "key path:    '{}' ({} bytes)",
        decode_key_path(blob.key_path),
        blob.key_path.len()
    );
    println!("ciphertext:  {} bytes", blob.ciphertext.len());
    println!("signature:   {} bytes", blob.signature.len());
    println!("sha256:      {}", hex::encode(Sha256::digest(&bytes)));

    Ok(())
}
