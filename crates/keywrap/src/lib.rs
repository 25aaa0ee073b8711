//! Column encryption key wrap/unwrap: blob format, orchestrators, and the
//! master key capability seam.
//!
//! A symmetric column encryption key (CEK) is protected at rest by wrapping
//! it under an asymmetric master key held in an external key store:
//!
//! ```text
//! master key (RSA, in a key store)
//!   └── wraps ──> CEK (symmetric)
//!                   └── encrypts ──> column data (outside this crate)
//! ```
//!
//! [`wrap_cek`] produces a self-describing signed blob and [`unwrap_cek`]
//! validates and opens one, failing closed on the first violated invariant.
//! Backends plug in through [`MasterKeyStore`] / [`MasterKey`];
//! [`KeyStoreRegistry`] routes stored [`CekRecord`]s to the right backend
//! by provider name.

pub mod blob;
pub mod cek;
pub mod keystore;
pub mod registry;
pub mod unwrap;
pub mod wrap;

#[cfg(test)]
mod testsupport;

pub use blob::{CekBlob, BLOB_HEADER_LEN, BLOB_VERSION};
pub use cek::PlaintextCek;
pub use keystore::{MasterKey, MasterKeyStore};
pub use registry::KeyStoreRegistry;
pub use unwrap::unwrap_cek;
pub use wrap::wrap_cek;

pub use common::{
    validate_key_wrap_algorithm, CekRecord, KeyProtectionError, MasterKeyPath,
    KEY_WRAP_ALGORITHM,
};
