//! Wrap path: produce a wrapped-key blob from a plaintext CEK.

use sha2::{Digest, Sha256};
use tracing::debug;

use common::{validate_key_wrap_algorithm, KeyProtectionError, MasterKeyPath};

use crate::blob::{encode_key_path, CekBlob, BLOB_VERSION};
use crate::keystore::MasterKeyStore;

/// Wraps a plaintext column encryption key under the master key at
/// `master_key_path`, producing a self-describing signed blob.
///
/// The blob embeds the lowercased key path in UTF-16LE for diagnostics, and
/// carries a PKCS#1 v1.5 / SHA-256 signature over every byte before the
/// signature field. [`unwrap_cek`](crate::unwrap::unwrap_cek) of the result
/// with the same master key and algorithm returns the CEK byte for byte.
///
/// # Errors
///
/// Fails before any cryptography on an invalid path, an unsupported
/// algorithm identifier, or an empty key; afterwards on key-store and
/// primitive failures. No partial blob is ever returned.
pub fn wrap_cek(
    store: &dyn MasterKeyStore,
    master_key_path: &str,
    algorithm: &str,
    cek: &[u8],
) -> Result<Vec<u8>, KeyProtectionError> {
    let path = MasterKeyPath::parse(master_key_path)?;
    validate_key_wrap_algorithm(algorithm)?;
    if cek.is_empty() {
        return Err(KeyProtectionError::EmptyKeyMaterial(
            "column encryption key",
        ));
    }

    let key = store.resolve(&path)?;
    let key_size = key.key_size_bytes();

    // The embedded copy of the path is lowercased, diagnostic only, and
    // never validated on unwrap.
    let key_path_bytes = encode_key_path(&path.as_str().to_lowercase());
    if key_path_bytes.len() > u16::MAX as usize {
        return Err(KeyProtectionError::InvalidMasterKeyPath {
            key_path: path.as_str().to_owned(),
            reason: "path too long to embed in the blob header",
        });
    }

    debug!(
        master_key_path = %path,
        key_size_bytes = key_size,
        cek_len = cek.len(),
        "wrapping column encryption key"
    );

    let ciphertext = key.encrypt_oaep(cek)?;
    debug_assert_eq!(ciphertext.len(), key_size);

    let mut hasher = Sha256::new();
    hasher.update([BLOB_VERSION]);
    hasher.update((key_path_bytes.len() as u16).to_le_bytes());
    hasher.update((ciphertext.len() as u16).to_le_bytes());
    hasher.update(&key_path_bytes);
    hasher.update(&ciphertext);
    let hash = hasher.finalize();

    let signature = key.sign_hash(&hash)?;
    debug_assert_eq!(signature.len(), key_size);

    let blob = CekBlob {
        version: BLOB_VERSION,
        key_path: &key_path_bytes,
        ciphertext: &ciphertext,
        signature: &signature,
    }
    .encode();

    debug!(blob_len = blob.len(), "column encryption key wrapped");
    Ok(blob)
}
