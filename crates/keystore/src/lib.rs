//! Key store adapters for the master key capability.
//!
//! Two reference backends implement [`keywrap::MasterKeyStore`]:
//! [`LocalKeyStore`] reads PKCS#8 PEM files laid out
//! `<root>/<key-store>/<key-name>.pem`, and [`MemoryKeyStore`] holds keys
//! in a map for tests and embedding. Both hand out [`RsaMasterKey`]
//! handles backed by the `rsa` crate.

pub mod local;
pub mod memory;
pub mod rsa_key;

#[cfg(test)]
pub(crate) mod testkeys;

pub use local::LocalKeyStore;
pub use memory::MemoryKeyStore;
pub use rsa_key::RsaMasterKey;
