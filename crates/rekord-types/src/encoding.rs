//! Type-safe encoding wrappers
//!
//! This module provides newtype wrappers around encoded data to prevent
//! encoding confusion and provide compile-time safety.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a piece of key material was stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingClass {
    /// ASCII armor (`-----BEGIN ...-----` framed base64)
    Armored,
    /// Raw binary (DER or raw signature bytes)
    Binary,
}

impl EncodingClass {
    /// Whether this is the armored class
    pub fn is_armored(self) -> bool {
        matches!(self, EncodingClass::Armored)
    }
}

impl std::fmt::Display for EncodingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingClass::Armored => write!(f, "armored"),
            EncodingClass::Binary => write!(f, "binary"),
        }
    }
}

/// A payload tagged with the encoding it was classified as.
///
/// The tag is assigned once, when the material is loaded, and consumers
/// match on it instead of probing the bytes again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded<T = Vec<u8>> {
    /// ASCII-armored payload
    Armored(T),
    /// Binary payload
    Binary(T),
}

impl<T> Encoded<T> {
    /// Tag a payload with the given class
    pub fn new(class: EncodingClass, payload: T) -> Self {
        match class {
            EncodingClass::Armored => Encoded::Armored(payload),
            EncodingClass::Binary => Encoded::Binary(payload),
        }
    }

    /// Get the encoding class of this payload
    pub fn class(&self) -> EncodingClass {
        match self {
            Encoded::Armored(_) => EncodingClass::Armored,
            Encoded::Binary(_) => EncodingClass::Binary,
        }
    }

    /// Get the payload regardless of class
    pub fn payload(&self) -> &T {
        match self {
            Encoded::Armored(p) | Encoded::Binary(p) => p,
        }
    }
}

impl<T: AsRef<[u8]>> Encoded<T> {
    /// Get the payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.payload().as_ref()
    }
}

/// Base64-encoded data
///
/// This type represents data that is base64-encoded (standard alphabet).
/// It provides safe conversion to/from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Base64(String);

impl Base64 {
    /// Create a new Base64 wrapper from a string
    ///
    /// Note: This does not validate the base64 encoding.
    /// Use `decode()` to validate and extract bytes.
    pub fn new(s: String) -> Self {
        Base64(s)
    }

    /// Create a Base64 wrapper from raw bytes
    pub fn encode(bytes: &[u8]) -> Self {
        Base64(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Decode the base64 string to bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.0)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64: {}", e)))
    }
}

impl std::fmt::Display for Base64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 hash digest (32 bytes)
///
/// Serialized as a lowercase hex string, which is how artifact digests
/// appear in log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash([u8; 32]);

impl Sha256Hash {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Sha256Hash(bytes)
    }

    /// Try to create from a byte slice
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidEncoding(format!(
                "SHA-256 hash must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Sha256Hash(arr))
    }

    /// Parse from hex-encoded string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))?;
        Self::try_from_slice(&bytes)
    }

    /// Encode as hex string (lowercase)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Sha256Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sha256Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Sha256Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_keeps_class() {
        let sig = Encoded::new(EncodingClass::Armored, b"abc".to_vec());
        assert_eq!(sig.class(), EncodingClass::Armored);
        assert_eq!(sig.as_bytes(), b"abc");

        let key = Encoded::new(EncodingClass::Binary, vec![0x30, 0x2a]);
        assert_eq!(key, Encoded::Binary(vec![0x30, 0x2a]));
        assert!(!key.class().is_armored());
    }

    #[test]
    fn test_base64_decode_invalid() {
        let b = Base64::new("not base64!".to_string());
        assert!(b.decode().is_err());
    }

    #[test]
    fn test_sha256_hex() {
        let hash_hex = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        let hash = Sha256Hash::from_hex(hash_hex).unwrap();
        assert_eq!(hash.to_hex(), hash_hex);
        assert_eq!(hash.to_string(), hash_hex);
    }

    #[test]
    fn test_sha256_wrong_length() {
        assert!(Sha256Hash::from_hex("abcd").is_err());
    }

    #[test]
    fn test_sha256_serializes_as_hex_string() {
        let hash = Sha256Hash::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));

        let back: Sha256Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
