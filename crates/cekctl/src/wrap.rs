//! Implements the "wrap" subcommand.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use common::KEY_WRAP_ALGORITHM;
use keystore::local::LocalKeyStore;
use keywrap::KeyStoreRegistry;

pub const NAME: &str = "wrap";

pub fn command() -> Command {
    Command::new(NAME)
        .about("Wraps a plaintext column encryption key into a self-describing blob")
        .arg(
            Arg::new("KEYSTORE")
                .long("keystore")
                .short('k')
                .help("Root directory of the local key store")
                .env("CEKCTL_KEYSTORE")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("MASTER_KEY")
                .long("master-key")
                .short('m')
                .help("Master key path in <key store>/<key name> form")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("ALGORITHM")
                .long("algorithm")
                .help("Key wrap algorithm identifier")
                .required(false)
                .num_args(1)
                .default_value(KEY_WRAP_ALGORITHM),
        )
        .arg(
            Arg::new("KEY_FILE")
                .help("File holding the plaintext key to wrap")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("OUT")
                .long("out")
                .short('o')
                .help("Where to write the wrapped key blob")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("RECORD")
                .long("record")
                .help("Also write a JSON record carrying the unwrap metadata")
                .required(false)
                .num_args(1),
        )
}

pub fn execute(
    keystore_root: &Path,
    master_key_path: &str,
    algorithm: &str,
    key_file: &Path,
    out_file: &Path,
    record_file: Option<&Path>,
) -> Result<()> {
    let cek = fs::read(key_file)
        .with_context(|| format!("failed to read key file {}", key_file.display()))?;

    let registry = KeyStoreRegistry::new()
        .with_provider(Arc::new(LocalKeyStore::new(keystore_root)));
    let record =
        registry.wrap_cek(LocalKeyStore::PROVIDER_NAME, master_key_path, algorithm, &cek)?;

    fs::write(out_file, &record.encrypted_value)
        .with_context(|| format!("failed to write blob to {}", out_file.display()))?;
    println!(
        "wrapped {} key bytes under '{}' into {} ({} bytes)",
        cek.len(),
        master_key_path,
        out_file.display(),
        record.encrypted_value.len()
    );

    if let Some(record_file) = record_file {
        let json = serde_json::to_string_pretty(&record)
            .context("failed to serialise the key record")?;
        fs::write(record_file, json)
            .with_context(|| format!("failed to write record to {}", record_file.display()))?;
        println!("wrote key record to {}", record_file.display());
    }

    Ok(())
}
