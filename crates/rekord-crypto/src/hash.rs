//! Hashing utilities using aws-lc-rs

use crate::error::{Error, Result};
use aws_lc_rs::digest::{self, Context, SHA256};
use flate2::read::MultiGzDecoder;
use rekord_types::Sha256Hash;

/// Hash data using SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = digest::digest(&SHA256, data);
    let mut result = [0u8; 32];
    result.copy_from_slice(digest.as_ref());
    result
}

/// Incremental SHA-256 hasher
pub struct Sha256Hasher {
    context: Context,
}

impl Sha256Hasher {
    /// Create a new SHA-256 hasher
    pub fn new() -> Self {
        Self {
            context: Context::new(&SHA256),
        }
    }

    /// Update the hasher with data
    pub fn update(&mut self, data: &[u8]) {
        self.context.update(data);
    }

    /// Finalize and get the digest
    pub fn finalize(self) -> [u8; 32] {
        let digest = self.context.finish();
        let mut result = [0u8; 32];
        result.copy_from_slice(digest.as_ref());
        result
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for Sha256Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Whether a source name points at gzip-compressed content
///
/// Only the path counts: a query string or fragment after it is ignored.
pub fn is_gzip_source(source_name: &str) -> bool {
    let path = source_name
        .split(['?', '#'])
        .next()
        .unwrap_or(source_name);
    path.ends_with(".gz")
}

/// Compute the content digest of an artifact
///
/// Gzip sources are decompressed on the fly and the digest covers the
/// decompressed stream, so `a.gz` and `a` hash the same. A stream that fails
/// to decompress is an error, never a digest over partial data.
pub fn content_digest(source_name: &str, data: &[u8]) -> Result<Sha256Hash> {
    let mut hasher = Sha256Hasher::new();

    if is_gzip_source(source_name) {
        tracing::info!(source = source_name, "gzipped content detected");
        let mut decoder = MultiGzDecoder::new(data);
        let written = std::io::copy(&mut decoder, &mut hasher)
            .map_err(|e| Error::Decompress(format!("{}: {}", source_name, e)))?;
        tracing::debug!(
            compressed = data.len(),
            decompressed = written,
            "decompressed artifact"
        );
    } else {
        hasher.update(data);
    }

    Ok(Sha256Hash::from_bytes(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const HELLO_DIGEST: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_sha256() {
        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(&hash[..], &expected[..]);
    }

    #[test]
    fn test_sha256_incremental() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hel");
        hasher.update(b"lo");
        assert_eq!(hasher.finalize(), sha256(b"hello"));
    }

    #[test]
    fn test_content_digest_plain() {
        let digest = content_digest("https://example.com/hello.txt", b"hello\n").unwrap();
        assert_eq!(digest.to_hex(), HELLO_DIGEST);
    }

    #[test]
    fn test_content_digest_deterministic() {
        let data = b"some release tarball contents";
        let a = content_digest("release.tar", data).unwrap();
        let b = content_digest("release.tar", data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_digest_gzip_matches_plain() {
        let compressed = gzip(b"hello\n");
        let digest = content_digest("https://example.com/hello.txt.gz", &compressed).unwrap();
        assert_eq!(digest.to_hex(), HELLO_DIGEST);
        assert_eq!(digest, content_digest("hello.txt", b"hello\n").unwrap());
    }

    #[test]
    fn test_content_digest_gzip_multi_member() {
        let mut compressed = gzip(b"hel");
        compressed.extend(gzip(b"lo\n"));
        let digest = content_digest("hello.gz", &compressed).unwrap();
        assert_eq!(digest.to_hex(), HELLO_DIGEST);
    }

    #[test]
    fn test_content_digest_bad_gzip() {
        let result = content_digest("broken.gz", b"definitely not gzip");
        assert!(matches!(result, Err(Error::Decompress(_))));
    }

    #[test]
    fn test_is_gzip_source() {
        assert!(!is_gzip_source("https://example.com/a.gz.sig"));
        assert!(is_gzip_source("https://example.com/a.tar.gz?token=abc"));
        assert!(is_gzip_source("https://example.com/a.gz#frag"));
        assert!(!is_gzip_source("https://example.com/a.GZ"));
    }
}
