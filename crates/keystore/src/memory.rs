//! [`MemoryKeyStore`]: in-memory key store provider for tests and embedding.

use std::collections::HashMap;

use rsa::RsaPrivateKey;

use common::{KeyProtectionError, MasterKeyPath};
use keywrap::{MasterKey, MasterKeyStore};

use crate::rsa_key::RsaMasterKey;

/// Key store provider holding RSA private keys in a map, keyed by the full
/// master key path. Lookup is an exact, case-sensitive match.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<String, RsaPrivateKey>,
}

impl MemoryKeyStore {
    /// Name this provider registers under.
    pub const PROVIDER_NAME: &'static str = "MEMORY_KEYSTORE";

    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a key under the given `<store>/<key>` path.
    pub fn insert(&mut self, key_path: &str, key: RsaPrivateKey) {
        self.keys.insert(key_path.to_owned(), key);
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl MasterKeyStore for MemoryKeyStore {
    fn provider_name(&self) -> &str {
        Self::PROVIDER_NAME
    }

    fn resolve(&self, key_path: &MasterKeyPath) -> Result<Box<dyn MasterKey>, KeyProtectionError> {
        let key = self
            .keys
            .get(key_path.as_str())
            .ok_or_else(|| KeyProtectionError::KeyNotFound {
                key_path: key_path.as_str().to_owned(),
            })?;
        Ok(Box::new(RsaMasterKey::new(key.clone())))
    }
}
