//! [`RsaMasterKey`]: concrete master key handle over an RSA private key.

use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;

use common::KeyProtectionError;
use keywrap::MasterKey;

/// An RSA private key resolved from a key store, scoped to one wrap or
/// unwrap call.
pub struct RsaMasterKey {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl RsaMasterKey {
    /// Builds a handle around a private key.
    pub fn new(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self { private, public }
    }
}

impl From<RsaPrivateKey> for RsaMasterKey {
    fn from(private: RsaPrivateKey) -> Self {
        Self::new(private)
    }
}

impl MasterKey for RsaMasterKey {
    fn key_size_bytes(&self) -> usize {
        self.public.size()
    }

    fn encrypt_oaep(&self, plaintext: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        // OAEP with a SHA-1 digest, the padding used by the originating
        // key-wrap format.
        self.public
            .encrypt(&mut rand::thread_rng(), Oaep::new::<Sha1>(), plaintext)
            .map_err(|e| KeyProtectionError::EncryptionFailed {
                message: e.to_string(),
            })
    }

    fn decrypt_oaep(&self, ciphertext: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        self.private
            .decrypt(Oaep::new::<Sha1>(), ciphertext)
            .map_err(|e| KeyProtectionError::DecryptionFailed {
                message: e.to_string(),
            })
    }

    fn sign_hash(&self, hash: &[u8]) -> Result<Vec<u8>, KeyProtectionError> {
        self.private
            .sign_with_rng(&mut rand::thread_rng(), Pkcs1v15Sign::new::<Sha256>(), hash)
            .map_err(|e| KeyProtectionError::SigningFailed {
                message: e.to_string(),
            })
    }

    fn verify_signature(
        &self,
        hash: &[u8],
        signature: &[u8],
    ) -> Result<bool, KeyProtectionError> {
        Ok(self
            .public
            .verify(Pkcs1v15Sign::new::<Sha256>(), hash, signature)
            .is_ok())
    }
}
