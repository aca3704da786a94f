//! ASCII armor detection and decoding
//!
//! Armored material is RFC 7468 textual framing: base64 content between
//! `-----BEGIN <LABEL>-----` and `-----END <LABEL>-----` lines. Everything
//! that does not decode as such a block is treated as binary.

use crate::error::{Error, Result};
use rekord_types::EncodingClass;
use std::io::{Read, Seek, SeekFrom};

/// Armor label used when re-encoding a binary detached signature
pub const SIGNATURE_LABEL: &str = "SIGNATURE";

/// Armor label of a SubjectPublicKeyInfo block
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Classify bytes by attempting to decode the first armor block
pub fn classify(bytes: &[u8]) -> EncodingClass {
    match pem::parse(bytes) {
        Ok(_) => EncodingClass::Armored,
        Err(_) => EncodingClass::Binary,
    }
}

/// Classify a seekable source, leaving its position where it was found
///
/// The source is read in full for the probe and then rewound, so the caller
/// can read the same bytes again.
pub fn probe<R: Read + Seek>(source: &mut R) -> std::io::Result<EncodingClass> {
    let start = source.stream_position()?;
    let mut buf = Vec::new();
    let read = source.read_to_end(&mut buf);
    source.seek(SeekFrom::Start(start))?;
    read?;
    Ok(classify(&buf))
}

/// Decode the first armor block
pub fn decode(bytes: &[u8]) -> Result<pem::Pem> {
    pem::parse(bytes).map_err(|e| Error::Armor(e.to_string()))
}

/// Decode every armor block in the input
///
/// Fails if the input holds no block at all.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<pem::Pem>> {
    let blocks = pem::parse_many(bytes).map_err(|e| Error::Armor(e.to_string()))?;
    if blocks.is_empty() {
        return Err(Error::Armor("no armor block found".to_string()));
    }
    Ok(blocks)
}

/// Wrap binary content in an armor block with LF line endings
pub fn encode(label: &str, contents: &[u8]) -> String {
    let block = pem::Pem::new(label, contents.to_vec());
    let config = pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF);
    pem::encode_config(&block, config)
}
