//! [`LocalKeyStore`]: file-backed key store provider.
//!
//! Keys live under a root directory as PKCS#8 PEM files, one per master
//! key, laid out `<root>/<key-store>/<key-name>.pem`. The provider is
//! read-only; provisioning keys into the directory is deployment tooling's
//! job.

use std::fs;
use std::io;
use std::path::PathBuf;

use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use tracing::debug;

use common::{KeyProtectionError, MasterKeyPath};
use keywrap::{MasterKey, MasterKeyStore};

use crate::rsa_key::RsaMasterKey;

/// Key store provider reading RSA private keys from a directory tree.
#[derive(Debug, Clone)]
pub struct LocalKeyStore {
    root: PathBuf,
}

impl LocalKeyStore {
    /// Name this provider registers under.
    pub const PROVIDER_NAME: &'static str = "LOCAL_KEYSTORE";

    /// Creates a store rooted at `root`. The directory does not need to
    /// exist yet; a missing tree simply means no key resolves.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a key path onto its backing file, refusing segments that could
    /// escape the root directory.
    fn key_file(&self, key_path: &MasterKeyPath) -> Result<PathBuf, KeyProtectionError> {
        for segment in [key_path.store(), key_path.key()] {
            if segment == "." || segment == ".." || segment.contains('\\') {
                return Err(KeyProtectionError::InvalidMasterKeyPath {
                    key_path: key_path.as_str().to_owned(),
                    reason: "segments must not contain '\\' or be '.' or '..'",
                });
            }
        }
        Ok(self
            .root
            .join(key_path.store())
            .join(format!("{}.pem", key_path.key())))
    }
}

impl MasterKeyStore for LocalKeyStore {
    fn provider_name(&self) -> &str {
        Self::PROVIDER_NAME
    }

    fn resolve(&self, key_path: &MasterKeyPath) -> Result<Box<dyn MasterKey>, KeyProtectionError> {
        let file = self.key_file(key_path)?;
        let pem = match fs::read_to_string(&file) {
            Ok(pem) => pem,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(KeyProtectionError::KeyNotFound {
                    key_path: key_path.as_str().to_owned(),
                })
            }
            Err(e) => {
                return Err(KeyProtectionError::KeyStoreFailure {
                    key_path: key_path.as_str().to_owned(),
                    source: e,
                })
            }
        };

        let private = RsaPrivateKey::from_pkcs8_pem(&pem).map_err(|e| {
            debug!(
                key_path = %key_path,
                error = %e,
                "key file does not parse as a PKCS#8 RSA private key"
            );
            KeyProtectionError::UnsupportedKeyType {
                key_path: key_path.as_str().to_owned(),
            }
        })?;

        debug!(key_path = %key_path, "resolved master key from file");
        Ok(Box::new(RsaMasterKey::new(private)))
    }
}
