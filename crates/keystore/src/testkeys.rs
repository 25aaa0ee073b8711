//! Shared RSA keys for tests. Generation is slow, so each key is created
//! once per process and cloned into the tests that need it.

use std::sync::OnceLock;

use rsa::RsaPrivateKey;

pub fn test_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(generate).clone()
}

pub fn other_test_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(generate).clone()
}

fn generate() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("rsa key generation")
}
