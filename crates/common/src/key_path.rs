//! Master key path parsing.

use std::fmt;

use crate::error::KeyProtectionError;

/// Separator between the key store segment and the key name segment.
pub const KEY_PATH_SEPARATOR: char = '/';

/// A validated master key path of the form `<key-store>/<key-name>`.
///
/// Exactly one separator is required and both segments must be non-empty.
/// The original string is kept verbatim: lowercasing for blob embedding is a
/// wrap-time concern, not a parse-time one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterKeyPath {
    raw: String,
    store: String,
    key: String,
}

impl MasterKeyPath {
    /// Parses and validates a master key path.
    pub fn parse(path: &str) -> Result<Self, KeyProtectionError> {
        let invalid = |reason: &'static str| KeyProtectionError::InvalidMasterKeyPath {
            key_path: path.to_owned(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(invalid("path is empty or whitespace"));
        }
        let (store, key) = path
            .split_once(KEY_PATH_SEPARATOR)
            .ok_or_else(|| invalid("missing '/' between key store and key name"))?;
        if key.contains(KEY_PATH_SEPARATOR) {
            return Err(invalid("expected exactly one '/' separator"));
        }
        if store.is_empty() {
            return Err(invalid("key store segment is empty"));
        }
        if key.is_empty() {
            return Err(invalid("key name segment is empty"));
        }

        Ok(Self {
            raw: path.to_owned(),
            store: store.to_owned(),
            key: key.to_owned(),
        })
    }

    /// The key store segment (before the separator).
    pub fn store(&self) -> &str {
        &self.store
    }

    /// The key name segment (after the separator).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The full path as originally supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for MasterKeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
