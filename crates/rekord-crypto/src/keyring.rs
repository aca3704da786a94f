//! Keyring for managing multiple verification keys
//!
//! A keyring holds every public key identity found in a key file and can
//! verify signatures against any of them. Identities are indexed by the
//! SHA-256 of their DER-encoded SubjectPublicKeyInfo.

use crate::armor::{self, PUBLIC_KEY_LABEL};
use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::verification::VerificationKey;
use der::{Decode, Encode, Reader, SliceReader};
use rekord_types::Encoded;
use spki::SubjectPublicKeyInfoOwned;
use std::collections::HashMap;

/// A keyring containing multiple verification keys
#[derive(Default)]
pub struct Keyring {
    /// Keys indexed by key ID
    keys: HashMap<Vec<u8>, VerificationKey>,
}

impl Keyring {
    /// Create a new empty keyring
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Build a keyring from key material, using the decode path its tag names
    pub fn from_material<T: AsRef<[u8]>>(material: &Encoded<T>) -> Result<Self> {
        match material {
            Encoded::Armored(text) => Self::from_armored(text.as_ref()),
            Encoded::Binary(der) => Self::from_der(der.as_ref()),
        }
    }

    /// Build a keyring from one or more armored `PUBLIC KEY` blocks
    ///
    /// Blocks with other labels are skipped.
    pub fn from_armored(text: &[u8]) -> Result<Self> {
        let mut keyring = Self::new();
        for block in armor::decode_all(text)? {
            if block.tag() != PUBLIC_KEY_LABEL {
                tracing::warn!(label = block.tag(), "skipping non public key armor block");
                continue;
            }
            keyring.add_spki_der(block.contents())?;
        }
        keyring.ensure_not_empty()
    }

    /// Build a keyring from one or more concatenated DER SubjectPublicKeyInfo structures
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let mut keyring = Self::new();
        let mut reader = SliceReader::new(der)?;
        while !reader.is_finished() {
            let spki = SubjectPublicKeyInfoOwned::decode(&mut reader)
                .map_err(|e| Error::InvalidKey(format!("failed to parse SPKI: {}", e)))?;
            keyring.add_spki(&spki)?;
        }
        keyring.ensure_not_empty()
    }

    /// Parse a single DER SubjectPublicKeyInfo and add it, returning its key ID
    pub fn add_spki_der(&mut self, der: &[u8]) -> Result<Vec<u8>> {
        let spki = SubjectPublicKeyInfoOwned::from_der(der)
            .map_err(|e| Error::InvalidKey(format!("failed to parse SPKI: {}", e)))?;
        self.add_spki(&spki)
    }

    fn add_spki(&mut self, spki: &SubjectPublicKeyInfoOwned) -> Result<Vec<u8>> {
        let key = VerificationKey::from_spki(spki)?;
        let key_id = sha256(&spki.to_der()?).to_vec();
        tracing::debug!(scheme = key.scheme.name(), "loaded public key identity");
        self.add_key(key_id.clone(), key);
        Ok(key_id)
    }

    fn ensure_not_empty(self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::InvalidKey("no public key found".to_string()));
        }
        Ok(self)
    }

    /// Add a key to the keyring
    pub fn add_key(&mut self, key_id: Vec<u8>, key: VerificationKey) {
        self.keys.insert(key_id, key);
    }

    /// Get a key by ID
    pub fn get_key(&self, key_id: &[u8]) -> Option<&VerificationKey> {
        self.keys.get(key_id)
    }

    /// Try to verify a signature with any key in the keyring
    pub fn verify_any(&self, data: &[u8], signature: &[u8]) -> Result<Vec<u8>> {
        for (key_id, key) in &self.keys {
            if key.verify(data, signature).is_ok() {
                return Ok(key_id.clone());
            }
        }
        Err(Error::Verification(
            "no key in keyring verified the signature".to_string(),
        ))
    }

    /// Get the number of keys in the keyring
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the keyring is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
