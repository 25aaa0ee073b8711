//! Structural codec for the wrapped-key blob.
//!
//! Layout, in order, with no terminators:
//!
//! ```text
//! version:1 | keyPathLength:2 LE | cipherTextLength:2 LE
//!     | keyPath:keyPathLength | cipherText:cipherTextLength | signature:rest
//! ```
//!
//! The two length fields are little-endian and authoritative for parsing;
//! the signature length is whatever remains once the key path and ciphertext
//! are consumed. This module performs no semantic validation. Version and
//! size checks belong to the unwrap path, which also owns the signature over
//! every byte before the `signature` field.

use bytes::Buf;
use thiserror::Error;

use common::KeyProtectionError;

/// The single defined blob format version.
pub const BLOB_VERSION: u8 = 1;

/// Byte length of the fixed header: version byte plus the two length fields.
pub const BLOB_HEADER_LEN: usize = 5;

/// Errors produced by structural decoding.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The input is shorter than its header and declared lengths require.
    #[error("blob is truncated: expected at least {declared} bytes, got {available}")]
    Truncated { declared: usize, available: usize },
}

impl From<BlobError> for KeyProtectionError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::Truncated {
                declared,
                available,
            } => KeyProtectionError::Truncated {
                declared,
                available,
            },
        }
    }
}

/// The logical fields of a wrapped-key blob, borrowed from the raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CekBlob<'a> {
    /// Format version byte.
    pub version: u8,
    /// UTF-16LE master key path, embedded for diagnostics only.
    pub key_path: &'a [u8],
    /// OAEP-wrapped key material.
    pub ciphertext: &'a [u8],
    /// PKCS#1 v1.5 signature over everything before this field.
    pub signature: &'a [u8],
}

impl<'a> CekBlob<'a> {
    /// Splits a byte sequence into its fields using the declared lengths.
    ///
    /// No semantic validation happens here; the only failure mode is
    /// truncation. An empty signature is legal at this layer, the unwrap
    /// path rejects it against the key size.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::Truncated`] if the input is shorter than the
    /// header plus its declared key path and ciphertext lengths.
    pub fn decode(blob: &'a [u8]) -> Result<Self, BlobError> {
        let mut src = blob;
        if src.remaining() < BLOB_HEADER_LEN {
            return Err(BlobError::Truncated {
                declared: BLOB_HEADER_LEN,
                available: blob.len(),
            });
        }
        let version = src.get_u8();
        let key_path_len = src.get_u16_le() as usize;
        let ciphertext_len = src.get_u16_le() as usize;

        if src.remaining() < key_path_len + ciphertext_len {
            return Err(BlobError::Truncated {
                declared: BLOB_HEADER_LEN + key_path_len + ciphertext_len,
                available: blob.len(),
            });
        }
        let (key_path, rest) = src.split_at(key_path_len);
        let (ciphertext, signature) = rest.split_at(ciphertext_len);

        Ok(Self {
            version,
            key_path,
            ciphertext,
            signature,
        })
    }

    /// Concatenates the fields in wire order.
    ///
    /// The key path and ciphertext lengths must each fit in 16 bits; the
    /// wrap path guarantees this before calling.
    pub fn encode(&self) -> Vec<u8> {
        debug_assert!(self.key_path.len() <= u16::MAX as usize);
        debug_assert!(self.ciphertext.len() <= u16::MAX as usize);

        let mut out = Vec::with_capacity(
            BLOB_HEADER_LEN + self.key_path.len() + self.ciphertext.len() + self.signature.len(),
        );
        out.push(self.version);
        out.extend_from_slice(&(self.key_path.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.ciphertext.len() as u16).to_le_bytes());
        out.extend_from_slice(self.key_path);
        out.extend_from_slice(self.ciphertext);
        out.extend_from_slice(self.signature);
        out
    }

    /// Length of the signed prefix: every byte before the signature field.
    pub fn signed_len(&self) -> usize {
        BLOB_HEADER_LEN + self.key_path.len() + self.ciphertext.len()
    }
}

/// Encodes a master key path string into the UTF-16LE bytes embedded in a
/// blob.
pub fn encode_key_path(path: &str) -> Vec<u8> {
    path.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Decodes embedded key path bytes back to text, for diagnostics.
///
/// A trailing odd byte is dropped and invalid code units are replaced
/// rather than rejected; this field is informational and never validated.
pub fn decode_key_path(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let key_path = encode_key_path("container1/key1");
        let ciphertext = vec![0xAB; 64];
        let signature = vec![0xCD; 64];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &key_path,
            ciphertext: &ciphertext,
            signature: &signature,
        };

        let bytes = blob.encode();
        assert_eq!(bytes.len(), BLOB_HEADER_LEN + key_path.len() + 128);

        let decoded = CekBlob::decode(&bytes).unwrap();
        assert_eq!(decoded, blob);
    }

    #[test]
    fn length_fields_are_little_endian() {
        let key_path = vec![0x6B, 0x00]; // "k"
        let ciphertext = vec![0u8; 0x0201];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &key_path,
            ciphertext: &ciphertext,
            signature: &[],
        };
        let bytes = blob.encode();
        assert_eq!(&bytes[1..3], &[0x02, 0x00]);
        assert_eq!(&bytes[3..5], &[0x01, 0x02]);
    }

    #[test]
    fn empty_key_path_and_signature_are_structurally_legal() {
        let ciphertext = vec![1, 2, 3];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &[],
            ciphertext: &ciphertext,
            signature: &[],
        };
        let decoded_bytes = blob.encode();
        let decoded = CekBlob::decode(&decoded_bytes).unwrap();
        assert!(decoded.key_path.is_empty());
        assert!(decoded.signature.is_empty());
        assert_eq!(decoded.ciphertext, &[1, 2, 3][..]);
    }

    #[test]
    fn signature_is_whatever_remains() {
        let ciphertext = vec![9u8; 4];
        let signature = vec![7u8; 11];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &[],
            ciphertext: &ciphertext,
            signature: &signature,
        };
        let mut bytes = blob.encode();
        bytes.extend_from_slice(&[0xEE; 3]);

        let decoded = CekBlob::decode(&bytes).unwrap();
        assert_eq!(decoded.signature.len(), 14);
    }

    #[test]
    fn decode_rejects_short_header() {
        for len in 0..BLOB_HEADER_LEN {
            let bytes = vec![0u8; len];
            let err = CekBlob::decode(&bytes).unwrap_err();
            let BlobError::Truncated {
                declared,
                available,
            } = err;
            assert_eq!(declared, BLOB_HEADER_LEN);
            assert_eq!(available, len);
        }
    }

    #[test]
    fn decode_rejects_declared_lengths_past_the_end() {
        // Header declares a 16-byte key path and 16-byte ciphertext but only
        // three payload bytes follow.
        let mut bytes = vec![BLOB_VERSION, 16, 0, 16, 0];
        bytes.extend_from_slice(&[0; 3]);
        let err = CekBlob::decode(&bytes).unwrap_err();
        let BlobError::Truncated {
            declared,
            available,
        } = err;
        assert_eq!(declared, BLOB_HEADER_LEN + 32);
        assert_eq!(available, 8);
    }

    #[test]
    fn decode_does_not_validate_version() {
        let bytes = CekBlob {
            version: 9,
            key_path: &[],
            ciphertext: &[],
            signature: &[],
        }
        .encode();
        assert_eq!(CekBlob::decode(&bytes).unwrap().version, 9);
    }

    #[test]
    fn round_trips_maximum_length_fields() {
        let key_path = vec![0x11; u16::MAX as usize];
        let ciphertext = vec![0x22; u16::MAX as usize];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &key_path,
            ciphertext: &ciphertext,
            signature: &[0x33],
        };
        let bytes = blob.encode();
        let decoded = CekBlob::decode(&bytes).unwrap();
        assert_eq!(decoded.key_path.len(), u16::MAX as usize);
        assert_eq!(decoded.ciphertext.len(), u16::MAX as usize);
        assert_eq!(decoded.signature, &[0x33][..]);
    }

    #[test]
    fn signed_len_excludes_the_signature() {
        let key_path = vec![0u8; 30];
        let ciphertext = vec![0u8; 64];
        let signature = vec![0u8; 64];
        let blob = CekBlob {
            version: BLOB_VERSION,
            key_path: &key_path,
            ciphertext: &ciphertext,
            signature: &signature,
        };
        assert_eq!(blob.signed_len(), 5 + 30 + 64);
        assert_eq!(blob.signed_len() + signature.len(), blob.encode().len());
    }

    #[test]
    fn truncation_converts_into_the_shared_taxonomy() {
        let err: KeyProtectionError = BlobError::Truncated {
            declared: 100,
            available: 7,
        }
        .into();
        assert!(matches!(
            err,
            KeyProtectionError::Truncated {
                declared: 100,
                available: 7
            }
        ));
    }

    #[test]
    fn key_path_text_round_trip() {
        let encoded = encode_key_path("container1/key1");
        assert_eq!(encoded.len(), "container1/key1".len() * 2);
        assert_eq!(decode_key_path(&encoded), "container1/key1");
    }

    #[test]
    fn decode_key_path_tolerates_odd_length() {
        let mut encoded = encode_key_path("ab");
        encoded.push(0x61);
        assert_eq!(decode_key_path(&encoded), "ab");
    }
}
