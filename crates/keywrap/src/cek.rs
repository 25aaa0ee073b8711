//! [`PlaintextCek`]: short-lived buffer for an unwrapped column encryption key.

use std::fmt;

/// Plaintext column encryption key returned by a successful unwrap.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which plaintext key material lives in RAM.
/// `Debug` never prints the bytes.
#[derive(Clone)]
pub struct PlaintextCek(Vec<u8>);

impl PlaintextCek {
    /// Wraps already-decrypted key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for PlaintextCek {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for PlaintextCek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.write_str("PlaintextCek([REDACTED])")
    }
}
