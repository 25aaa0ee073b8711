//! Stored form of a wrapped column encryption key.
//!
//! A [`CekRecord`] is the artifact a caller persists next to its table or
//! column metadata: the wrapped key blob plus everything needed to route an
//! unwrap later (provider name, master key path, algorithm identifier).

use serde::{Deserialize, Serialize};

/// A wrapped column encryption key and its unwrap metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CekRecord {
    /// Name of the key store provider that produced this record.
    pub provider_name: String,
    /// Master key path the key was wrapped under.
    pub master_key_path: String,
    /// Key-wrap algorithm identifier.
    pub algorithm: String,
    /// The wrapped key blob; base64 in serialised form.
    #[serde(with = "base64_bytes")]
    pub encrypted_value: Vec<u8>,
}

impl CekRecord {
    /// Constructs a record from its parts.
    pub fn new(
        provider_name: impl Into<String>,
        master_key_path: impl Into<String>,
        algorithm: impl Into<String>,
        encrypted_value: Vec<u8>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            master_key_path: master_key_path.into(),
            algorithm: algorithm.into(),
            encrypted_value,
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
