//! Unwrap path: parse, validate, and decrypt a wrapped-key blob.
//!
//! This is the security-critical half of the codec. The blob is treated as
//! attacker-influenced input; checks run in a fixed order and the first
//! failure aborts the call:
//!
//! 1. master key path, then algorithm identifier
//! 2. non-empty blob
//! 3. key resolution and key size
//! 4. structural decode (fails only on truncation)
//! 5. version byte
//! 6. ciphertext length against the key size
//! 7. signature length against the key size
//! 8. signature verification over every byte before the signature
//! 9. OAEP decryption
//!
//! Signature verification is the sole integrity gate and always precedes
//! decryption, so error kinds and timing never act as a decryption oracle.
//! The embedded key path is decoded for diagnostics but never compared
//! against the caller's path; blobs stay unwrappable under a renamed or
//! aliased locator.

use sha2::{Digest, Sha256};
use tracing::{debug, trace, warn};

use common::{validate_key_wrap_algorithm, KeyProtectionError, MasterKeyPath};

use crate::blob::{decode_key_path, CekBlob, BLOB_VERSION};
use crate::cek::PlaintextCek;
use crate::keystore::MasterKeyStore;

/// Unwraps a blob produced by [`wrap_cek`](crate::wrap::wrap_cek),
/// returning the plaintext key only if every structural and cryptographic
/// check passes.
///
/// # Errors
///
/// Each failed check maps to its own [`KeyProtectionError`] kind, in the
/// order listed in the module docs. [`SignatureVerificationFailed`] is
/// logged as a security event and deliberately does not say which portion
/// of the blob disagreed.
///
/// [`SignatureVerificationFailed`]: KeyProtectionError::SignatureVerificationFailed
pub fn unwrap_cek(
    store: &dyn MasterKeyStore,
    master_key_path: &str,
    algorithm: &str,
    blob: &[u8],
) -> Result<PlaintextCek, KeyProtectionError> {
    let path = MasterKeyPath::parse(master_key_path)?;
    validate_key_wrap_algorithm(algorithm)?;
    if blob.is_empty() {
        return Err(KeyProtectionError::EmptyKeyMaterial(
            "encrypted column encryption key",
        ));
    }

    let key = store.resolve(&path)?;
    let key_size = key.key_size_bytes();

    let decoded = CekBlob::decode(blob)?;

    if decoded.version != BLOB_VERSION {
        return Err(KeyProtectionError::InvalidBlobVersion {
            found: decoded.version,
            expected: BLOB_VERSION,
        });
    }

    // Diagnostic only; deliberately not compared to `path`.
    trace!(
        embedded_key_path = %decode_key_path(decoded.key_path),
        "decoded embedded key path"
    );

    if decoded.ciphertext.len() != key_size {
        return Err(KeyProtectionError::CiphertextLengthMismatch {
            found: decoded.ciphertext.len(),
            expected: key_size,
            key_path: path.as_str().to_owned(),
        });
    }
    if decoded.signature.len() != key_size {
        return Err(KeyProtectionError::SignatureLengthMismatch {
            found: decoded.signature.len(),
            expected: key_size,
            key_path: path.as_str().to_owned(),
        });
    }

    let hash = Sha256::digest(&blob[..decoded.signed_len()]);
    if !key.verify_signature(&hash, decoded.signature)? {
        warn!(
            master_key_path = %path,
            blob_len = blob.len(),
            "encrypted key signature verification failed"
        );
        return Err(KeyProtectionError::SignatureVerificationFailed {
            key_path: path.as_str().to_owned(),
        });
    }

    let plaintext = key.decrypt_oaep(decoded.ciphertext)?;
    debug!(
        master_key_path = %path,
        cek_len = plaintext.len(),
        "column encryption key unwrapped"
    );
    Ok(PlaintextCek::new(plaintext))
}
