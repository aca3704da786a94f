//! Rekor log entry types

use crate::error::{Error, Result};
use rekord_crypto::armor::{self, PUBLIC_KEY_LABEL, SIGNATURE_LABEL};
use rekord_types::{Base64, Encoded, Sha256Hash};
use serde::{Deserialize, Serialize};

/// Entry carrying signature and public key as binary (base64 on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Hex SHA-256 of the (decompressed) artifact
    #[serde(rename = "SHA")]
    pub sha: Sha256Hash,
    /// Where the artifact was fetched from
    #[serde(rename = "URL", default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Detached signature bytes
    #[serde(rename = "Signature")]
    pub signature: Base64,
    /// Public key bytes
    #[serde(rename = "PublicKey")]
    pub public_key: Base64,
}

/// Entry carrying signature and public key as armored text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmoredEntry {
    /// Hex SHA-256 of the (decompressed) artifact
    #[serde(rename = "SHA")]
    pub sha: Sha256Hash,
    /// Where the artifact was fetched from
    #[serde(rename = "URL", default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Armored detached signature
    #[serde(rename = "Signature")]
    pub signature: String,
    /// Armored public key
    #[serde(rename = "PublicKey")]
    pub public_key: String,
}

/// The record submitted to the log
///
/// Both shapes share the same field names; only the representation of the
/// signature and key differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogEntry {
    /// Binary signature and key
    Raw(RawEntry),
    /// Armored signature and key
    Armored(ArmoredEntry),
}

impl LogEntry {
    /// Build the entry for a verified artifact
    ///
    /// The armored shape is chosen when either the signature or the key was
    /// armored. In that case a binary counterpart is re-encoded as armor so
    /// the text fields never carry raw bytes.
    pub fn build(
        url: &str,
        sha: Sha256Hash,
        signature: &Encoded,
        public_key: &Encoded,
    ) -> Result<Self> {
        if !signature.class().is_armored() && !public_key.class().is_armored() {
            return Ok(LogEntry::Raw(RawEntry {
                sha,
                url: url.to_string(),
                signature: Base64::encode(signature.as_bytes()),
                public_key: Base64::encode(public_key.as_bytes()),
            }));
        }

        if signature.class() != public_key.class() {
            tracing::warn!(
                signature = %signature.class(),
                public_key = %public_key.class(),
                "mixed signature and key encodings, re-encoding the binary one as armor"
            );
        }

        Ok(LogEntry::Armored(ArmoredEntry {
            sha,
            url: url.to_string(),
            signature: armored_text(signature, SIGNATURE_LABEL)?,
            public_key: armored_text(public_key, PUBLIC_KEY_LABEL)?,
        }))
    }

    /// Whether this is the armored shape
    pub fn is_armored(&self) -> bool {
        matches!(self, LogEntry::Armored(_))
    }

    /// Digest of the artifact this entry records
    pub fn sha(&self) -> &Sha256Hash {
        match self {
            LogEntry::Raw(e) => &e.sha,
            LogEntry::Armored(e) => &e.sha,
        }
    }

    /// Serialize to the JSON body sent to the log
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Encode(e.to_string()))
    }
}

fn armored_text(material: &Encoded, label: &str) -> Result<String> {
    match material {
        Encoded::Armored(bytes) => String::from_utf8(bytes.clone()).map_err(|e| {
            Error::Encode(format!("armored {} is not valid UTF-8: {}", label, e))
        }),
        Encoded::Binary(bytes) => Ok(armor::encode(label, bytes)),
    }
}

/// Status block of an add response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    /// The spelling matches what deployed servers send
    #[serde(rename = "file_recieved")]
    pub file_received: String,
}

/// Parsed acknowledgment of an add request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Status reported by the log
    #[serde(rename = "Status")]
    pub status: SubmissionStatus,
    /// Leaf data returned by the log, if any
    #[serde(rename = "Leaf", default)]
    pub leaf: Option<serde_json::Value>,
    /// Key returned by the log, if any
    #[serde(rename = "Key", default)]
    pub key: Option<Base64>,
}
