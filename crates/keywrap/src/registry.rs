//! Name-indexed registry of key store providers.
//!
//! Stored [`CekRecord`]s name the provider that produced them; the registry
//! routes record-level wrap and unwrap calls to the matching
//! [`MasterKeyStore`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use common::{CekRecord, KeyProtectionError};

use crate::cek::PlaintextCek;
use crate::keystore::MasterKeyStore;
use crate::{unwrap, wrap};

/// Registered key store providers, keyed by provider name.
#[derive(Default)]
pub struct KeyStoreRegistry {
    providers: HashMap<String, Arc<dyn MasterKeyStore>>,
}

impl KeyStoreRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own name. A later registration under
    /// the same name replaces the earlier one.
    pub fn register(&mut self, provider: Arc<dyn MasterKeyStore>) {
        let name = provider.provider_name().to_owned();
        debug!(provider = %name, "registering key store provider");
        self.providers.insert(name, provider);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_provider(mut self, provider: Arc<dyn MasterKeyStore>) -> Self {
        self.register(provider);
        self
    }

    /// Looks up a provider by name.
    ///
    /// # Errors
    ///
    /// [`KeyProtectionError::UnknownProvider`] if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn MasterKeyStore, KeyProtectionError> {
        self.providers
            .get(name)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| KeyProtectionError::UnknownProvider {
                name: name.to_owned(),
            })
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` if no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Wraps `cek` through the named provider and returns the stored-form
    /// record carrying the blob and its unwrap metadata.
    pub fn wrap_cek(
        &self,
        provider_name: &str,
        master_key_path: &str,
        algorithm: &str,
        cek: &[u8],
    ) -> Result<CekRecord, KeyProtectionError> {
        let provider = self.get(provider_name)?;
        let blob = wrap::wrap_cek(provider, master_key_path, algorithm, cek)?;
        Ok(CekRecord::new(
            provider_name,
            master_key_path,
            algorithm,
            blob,
        ))
    }

    /// Unwraps a stored record through the provider named inside it.
    pub fn unwrap_record(&self, record: &CekRecord) -> Result<PlaintextCek, KeyProtectionError> {
        let provider = self.get(&record.provider_name)?;
        unwrap::unwrap_cek(
            provider,
            &record.master_key_path,
            &record.algorithm,
            &record.encrypted_value,
        )
    }
}

impl fmt::Debug for KeyStoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
