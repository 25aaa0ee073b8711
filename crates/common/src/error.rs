//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type for key wrap and unwrap operations.
///
/// Every failure path in the blob codec, the orchestrators, and the key-store
/// adapters maps onto one of these kinds. Operations abort on the first
/// failure; no partial result is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum KeyProtectionError {
    /// The master key path is empty, has no separator, or has an empty segment.
    #[error("invalid master key path '{key_path}': {reason}")]
    InvalidMasterKeyPath {
        key_path: String,
        reason: &'static str,
    },

    /// The requested key-wrap algorithm is not the supported identifier.
    #[error("unsupported key encryption algorithm '{requested}': only '{supported}' is supported")]
    UnsupportedAlgorithm {
        requested: String,
        supported: &'static str,
    },

    /// Empty input key material: the plaintext key on wrap, the encrypted
    /// blob on unwrap.
    #[error("{0} must not be empty")]
    EmptyKeyMaterial(&'static str),

    /// The master key path does not resolve to a key in the backing store.
    #[error("no master key found at '{key_path}'")]
    KeyNotFound { key_path: String },

    /// The resolved key is not an RSA private key.
    #[error("master key at '{key_path}' is not an RSA private key")]
    UnsupportedKeyType { key_path: String },

    /// No key store provider is registered under the given name.
    #[error("no key store provider registered under '{name}'")]
    UnknownProvider { name: String },

    /// The blob's format version byte is not the supported version.
    #[error("unsupported encrypted key format version {found}, expected {expected}")]
    InvalidBlobVersion { found: u8, expected: u8 },

    /// The blob's ciphertext length does not match the master key size.
    #[error("ciphertext length {found} does not match the size {expected} of master key '{key_path}'")]
    CiphertextLengthMismatch {
        found: usize,
        expected: usize,
        key_path: String,
    },

    /// The blob's signature length does not match the master key size.
    #[error("signature length {found} does not match the size {expected} of master key '{key_path}'")]
    SignatureLengthMismatch {
        found: usize,
        expected: usize,
        key_path: String,
    },

    /// The blob's signature does not verify against the master key.
    ///
    /// Carries no detail about which portion of the blob failed to match;
    /// the blob as a whole is treated as forged.
    #[error("encrypted key signature does not verify against master key '{key_path}'")]
    SignatureVerificationFailed { key_path: String },

    /// The blob is shorter than its declared length fields claim.
    #[error("encrypted key blob is truncated: expected at least {declared} bytes, got {available}")]
    Truncated { declared: usize, available: usize },

    /// The asymmetric encrypt primitive failed.
    #[error("master key encryption failed: {message}")]
    EncryptionFailed { message: String },

    /// The asymmetric decrypt primitive failed.
    #[error("master key decryption failed: {message}")]
    DecryptionFailed { message: String },

    /// The signing primitive failed.
    #[error("master key signing failed: {message}")]
    SigningFailed { message: String },

    /// An I/O or backend failure in the key store, other than a missing key.
    #[error("key store failure for '{key_path}': {source}")]
    KeyStoreFailure {
        key_path: String,
        #[source]
        source: std::io::Error,
    },

    /// The operation is declared by the capability interface but not offered
    /// by this provider.
    #[error("operation not supported by this key store provider: {0}")]
    UnsupportedOperation(&'static str),
}
