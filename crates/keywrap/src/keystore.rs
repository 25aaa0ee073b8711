//! Capability traits for master key stores and resolved key handles.
//!
//! The wrap and unwrap orchestrators consume asymmetric-key backends through
//! these two traits: a [`MasterKeyStore`] resolves a validated master key
//! path into a [`MasterKey`] handle scoped to one call, and the handle
//! exposes the primitives the blob format needs. Adapters own their handle
//! lifetime and map backend failures into [`KeyProtectionError`].

use common::{KeyProtectionError, MasterKeyPath};

/// A named backend that resolves master key paths into key handles.
#[cfg_attr(test, mockall::automock)]
pub trait MasterKeyStore: Send + Sync {
    /// Registry name of this provider.
    fn provider_name(&self) -> &str;

    /// Resolves a validated master key path into a handle.
    ///
    /// The handle is borrowed for one wrap or unwrap call; callers never
    /// retain it, so adapters are free to tie real resources to its drop.
    ///
    /// # Errors
    ///
    /// [`KeyProtectionError::KeyNotFound`] if no key exists at the path;
    /// [`KeyProtectionError::UnsupportedKeyType`] if the stored key is not
    /// RSA-family.
    fn resolve(&self, key_path: &MasterKeyPath) -> Result<Box<dyn MasterKey>, KeyProtectionError>;

    /// Signs master-key metadata for stores that participate in enclave
    /// attestation. Not offered by the providers in this workspace.
    fn sign_master_key_metadata(
        &self,
        _key_path: &MasterKeyPath,
        _allow_enclave_computations: bool,
    ) -> Result<Vec<u8>, KeyProtectionError> {
        Err(KeyProtectionError::UnsupportedOperation(
            "sign master key metadata",
        ))
    }

    /// Verifies a master-key metadata signature. Not offered by the
    /// providers in this workspace.
    fn verify_master_key_metadata(
        &self,
        _key_path: &MasterKeyPath,
        _allow_enclave_computations: bool,
        _signature: &[u8],
    ) -> Result<bool, KeyProtectionError> {
        Err(KeyProtectionError::UnsupportedOperation(
            "verify master key metadata",
        ))
    }
}

/// A resolved asymmetric key, borrowed for the duration of one wrap or
/// unwrap call.
#[cfg_attr(test, mockall::automock)]
pub trait MasterKey {
    /// Modulus size in bytes. Ciphertext and signature in a blob must both
    /// be exactly this long.
    fn key_size_bytes(&self) -> usize;

    /// Encrypts with the public component using OAEP padding.
    fn encrypt_oaep(&self, plaintext: &[u8]) -> Result<Vec<u8>, KeyProtectionError>;

    /// Decrypts with the private component using OAEP padding.
    fn decrypt_oaep(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KeyProtectionError>;

    /// Signs a SHA-256 digest with PKCS#1 v1.5.
    fn sign_hash(&self, hash: &[u8]) -> Result<Vec<u8>, KeyProtectionError>;

    /// Verifies a PKCS#1 v1.5 signature over a SHA-256 digest.
    ///
    /// Returns `Ok(false)` on mismatch. `Err` is reserved for backend
    /// failures, never for a verification outcome.
    fn verify_signature(&self, hash: &[u8], signature: &[u8])
        -> Result<bool, KeyProtectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::FakeKeyStore;

    #[test]
    fn metadata_signing_is_unsupported_by_default() {
        let store = FakeKeyStore::new(0xAA);
        let path = MasterKeyPath::parse("container1/key1").unwrap();

        let err = store.sign_master_key_metadata(&path, false).unwrap_err();
        assert!(matches!(err, KeyProtectionError::UnsupportedOperation(_)));

        let err = store
            .verify_master_key_metadata(&path, false, b"sig")
            .unwrap_err();
        assert!(matches!(err, KeyProtectionError::UnsupportedOperation(_)));
    }
}
