//! `cekctl`: command-line tools around the wrapped column encryption key
//! format.
//!
//! Startup sequence:
//!
//! 1. Parse the command line.
//! 2. Initialise tracing at the requested level.
//! 3. Dispatch to the selected subcommand.

mod inspect;
mod telemetry;
mod unwrap;
mod wrap;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{crate_version, Arg, Command};

const APP_NAME: &str = "cekctl";

fn cli() -> Command {
    Command::new(APP_NAME)
        .version(crate_version!())
        .about("Wraps, unwraps and inspects column encryption key blobs")
        .arg(
            Arg::new("LOG_LEVEL")
                .long("log-level")
                .short('l')
                .help("Sets the log level")
                .global(true)
                .num_args(1)
                .default_value("warn"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(vec![wrap::command(), unwrap::command(), inspect::command()])
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    // ------------------------------------------------------------------
    // 1. Telemetry
    // ------------------------------------------------------------------
    let log_level = matches
        .get_one::<String>("LOG_LEVEL")
        .map(String::as_str)
        .unwrap_or("warn");
    telemetry::init(log_level)?;

    // ------------------------------------------------------------------
    // 2. Dispatch
    // ------------------------------------------------------------------
    match matches.subcommand() {
        Some((wrap::NAME, sub_matches)) => {
            let keystore = sub_matches
                .get_one::<String>("KEYSTORE")
                .cloned()
                .unwrap_or_default();
            let master_key = sub_matches
                .get_one::<String>("MASTER_KEY")
                .cloned()
                .unwrap_or_default();
            let algorithm = sub_matches
                .get_one::<String>("ALGORITHM")
                .cloned()
                .unwrap_or_default();
            let key_file = sub_matches
                .get_one::<String>("KEY_FILE")
                .cloned()
                .unwrap_or_default();
            let out_file = sub_matches
                .get_one::<String>("OUT")
                .cloned()
                .unwrap_or_default();
            let record_file = sub_matches.get_one::<String>("RECORD").map(PathBuf::from);

            wrap::execute(
                Path::new(&keystore),
                &master_key,
                &algorithm,
                Path::new(&key_file),
                Path::new(&out_file),
                record_file.as_deref(),
            )
        }
        Some((unwrap::NAME, sub_matches)) => {
            let keystore = sub_matches
                .get_one::<String>("KEYSTORE")
                .cloned()
                .unwrap_or_default();
            let master_key = sub_matches.get_one::<String>("MASTER_KEY").cloned();
            let algorithm = sub_matches
                .get_one::<String>("ALGORITHM")
                .cloned()
                .unwrap_or_default();
            let blob_file = sub_matches.get_one::<String>("BLOB_FILE").map(PathBuf::from);
            let record_file = sub_matches.get_one::<String>("RECORD").map(PathBuf::from);
            let out_file = sub_matches
                .get_one::<String>("OUT")
                .cloned()
                .unwrap_or_default();

            unwrap::execute(
                Path::new(&keystore),
                master_key.as_deref(),
                &algorithm,
                blob_file.as_deref(),
                record_file.as_deref(),
                Path::new(&out_file),
            )
        }
        Some((inspect::NAME, sub_matches)) => {
            let blob_file = sub_matches
                .get_one::<String>("BLOB_FILE")
                .cloned()
                .unwrap_or_default();
            inspect::execute(Path::new(&blob_file))
        }
        _ => unreachable!("a subcommand is required"),
    }
}
