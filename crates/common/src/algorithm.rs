//! Key-wrap algorithm identifier.

use crate::error::KeyProtectionError;

/// The single supported key-wrap algorithm: RSA encryption with OAEP padding.
pub const KEY_WRAP_ALGORITHM: &str = "RSA_OAEP";

/// Validates a requested algorithm identifier against the supported one,
/// case-insensitively. An empty identifier fails like any other mismatch.
pub fn validate_key_wrap_algorithm(algorithm: &str) -> Result<(), KeyProtectionError> {
    if !algorithm.eq_ignore_ascii_case(KEY_WRAP_ALGORITHM) {
        return Err(KeyProtectionError::UnsupportedAlgorithm {
            requested: algorithm.to_owned(),
            supported: KEY_WRAP_ALGORITHM,
        });
    }
    Ok(())
}
