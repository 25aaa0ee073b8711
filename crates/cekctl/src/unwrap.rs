//! Implements the "unwrap" subcommand.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use common::{CekRecord, KEY_WRAP_ALGORITHM};
use keystore::local::LocalKeyStore;
use keywrap::{unwrap_cek, KeyStoreRegistry};

pub const NAME: &str = "unwrap";

pub fn command() -> Command {
    Command::new(NAME)
        .about("Recovers the plaintext column encryption key from a wrapped blob")
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
                .required_unless_present("RECORD")
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
            Arg::new("BLOB_FILE")
                .help("File holding the wrapped key blob")
                .required_unless_present("RECORD")
                .num_args(1),
        )
        .arg(
            Arg::new("RECORD")
                .long("record")
                .help("JSON key record to unwrap instead of a raw blob")
                .conflicts_with_all(["MASTER_KEY", "BLOB_FILE"])
                .num_args(1),
        )
        .arg(
            Arg::new("OUT")
                .long("out")
                .short('o')
                .help("Where to write the recovered plaintext key")
                .required(true)
                .num_args(1),
        )
}

pub fn execute(
    keystore_root: &Path,
    master_key_path: Option<&str>,
    algorithm: &str,
    blob_file: Option<&Path>,
    record_file: Option<&Path>,
    out_file: &Path,
) -> Result<()> {
    let store = LocalKeyStore::new(keystore_root);

    let cek = match record_file {
        Some(record_file) => {
            let json = fs::read_to_string(record_file).with_context(|| {
                format!("failed to read record from {}", record_file.display())
            })?;
            let record: CekRecord = serde_json::from_str(&json).with_context(|| {
                format!("failed to parse record from {}", record_file.display())
            })?;
            let registry = KeyStoreRegistry::new().with_provider(Arc::new(store));
            registry.unwrap_record(&record)?
        }
        None => {
            let blob_file =
                blob_file.context("a blob file is required unless --record is given")?;
            let master_key_path =
                master_key_path.context("--master-key is required unless --record is given")?;
            let blob = fs::read(blob_file)
                .with_context(|| format!("failed to read blob from {}", blob_file.display()))?;
            unwrap_cek(&store, master_key_path, algorithm, &blob)?
        }
    };

    fs::write(out_file, cek.as_bytes())
        .with_context(|| format!("failed to write plaintext key to {}", out_file.display()))?;
    println!("unwrapped {} key bytes into {}", cek.len(), out_file.display());

    Ok(())
}
