//! Common types and errors shared across the `cekwrap` crates.

pub mod algorithm;
pub mod error;
pub mod key_path;
pub mod record;

pub use algorithm::{validate_key_wrap_algorithm, KEY_WRAP_ALGORITHM};
pub use error::KeyProtectionError;
pub use key_path::MasterKeyPath;
pub use record::CekRecord;
