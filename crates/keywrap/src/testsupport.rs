//! Deterministic in-memory fakes for orchestrator tests.
//!
//! [`FakeMasterKey`] applies reversible toy transforms with correctly sized
//! outputs, so wrap/unwrap logic (hash ranges, length checks, ordering) can
//! be exercised without real RSA cost. Not secure; test builds only.

use common::{KeyProtectionError, MasterKeyPath};

use crate::keystore::{MasterKey, MasterKeyStore};

/// Modulus size reported by every [`FakeMasterKey`].
pub const FAKE_KEY_SIZE: usize = 64;

/// Toy master key. Two fakes agree on transforms only when built with the
/// same mask byte, which is enough to model "same key" and "different key".
pub struct FakeMasterKey {
    mask: u8,
}

impl FakeMasterKey {
    pub fn new(mask: u8) -> Self {
        Self { mask }
    }
}

impl MasterKey for FakeMasterKey {
    fn key_size_bytes(&self) -> usize {
        FAKE_KEY_SIZE
    }

    fn encrypt_oaep(&self, plaintext: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        assert!(
            plaintext.len() + 2 <= FAKE_KEY_SIZE,
            "plaintext too long for the fake key"
        );
        let mut out = vec![self.mask; FAKE_KEY_SIZE];
        out[..2].copy_from_slice(&(plaintext.len() as u16).to_le_bytes());
        for (dst, src) in out[2..].iter_mut().zip(plaintext) {
            *dst = src ^ self.mask;
        }
        Ok(out)
    }

    fn decrypt_oaep(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        if ciphertext.len() != FAKE_KEY_SIZE {
            return Err(KeyProtectionError::DecryptionFailed {
                message: "fake ciphertext has the wrong length".into(),
            });
        }
        let len = u16::from_le_bytes([ciphertext[0], ciphertext[1]]) as usize;
        if len + 2 > FAKE_KEY_SIZE {
            return Err(KeyProtectionError::DecryptionFailed {
                message: "fake ciphertext header is corrupt".into(),
            });
        }
        Ok(ciphertext[2..2 + len].iter().map(|b| b ^ self.mask).collect())
    }

    fn sign_hash(&self, hash: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        let mut out = vec![0u8; FAKE_KEY_SIZE];
        out[..hash.len()].copy_from_slice(hash);
        for b in &mut out {
            *b ^= self.mask;
        }
        Ok(out)
    }

    fn verify_signature(
        &self,
        hash: &[u8],
        signature: &[u8],
    ) -> Result<bool, KeyProtectionError> {
        Ok(self.sign_hash(hash)? == signature)
    }
}

/// Store handing out a [`FakeMasterKey`] for every path, or a fixed
/// not-found error when `missing` is set.
pub struct FakeKeyStore {
    mask: u8,
    missing: bool,
}

impl FakeKeyStore {
    pub fn new(mask: u8) -> Self {
        Self {
            mask,
            missing: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            mask: 0,
            missing: true,
        }
    }
}

impl MasterKeyStore for FakeKeyStore {
    fn provider_name(&self) -> &str {
        "FAKE_KEYSTORE"
    }

    fn resolve(&self, key_path: &MasterKeyPath) -> Result<Box<dyn MasterKey>, KeyProtectionError> {
        if self.missing {
            return Err(KeyProtectionError::KeyNotFound {
                key_path: key_path.as_str().to_owned(),
            });
        }
        Ok(Box::new(FakeMasterKey::new(self.mask)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_transforms_are_reversible() {
        let key = FakeMasterKey::new(0x5A);
        let ciphertext = key.encrypt_oaep(b"a 32 byte column encryption key!").unwrap();
        assert_eq!(ciphertext.len(), FAKE_KEY_SIZE);
        let plaintext = key.decrypt_oaep(&ciphertext).unwrap();
        assert_eq!(plaintext, b"a 32 byte column encryption key!");
    }

    #[test]
    fn fakes_with_different_masks_disagree_on_signatures() {
        let a = FakeMasterKey::new(0x11);
        let b = FakeMasterKey::new(0x22);
        let sig = a.sign_hash(&[9u8; 32]).unwrap();
        assert!(a.verify_signature(&[9u8; 32], &sig).unwrap());
        assert!(!b.verify_signature(&[9u8; 32], &sig).unwrap());
    }
}
