//! Signature verification using aws-lc-rs

use crate::armor;
use crate::error::{Error, Result};
use crate::keyring::Keyring;
use aws_lc_rs::signature::{
    UnparsedPublicKey, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1, ED25519,
    RSA_PKCS1_2048_8192_SHA256,
};
use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1};
use const_oid::db::rfc8410::ID_ED_25519;
use const_oid::ObjectIdentifier;
use rekord_types::Encoded;
use spki::SubjectPublicKeyInfoOwned;
use std::borrow::Cow;

/// Supported verification schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    /// ECDSA P-256 with SHA-256
    EcdsaP256Sha256,
    /// ECDSA P-384 with SHA-384
    EcdsaP384Sha384,
    /// Ed25519
    Ed25519,
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
}

impl SigningScheme {
    /// Get the name of this scheme
    pub fn name(&self) -> &'static str {
        match self {
            SigningScheme::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SigningScheme::EcdsaP384Sha384 => "ECDSA_P384_SHA384",
            SigningScheme::Ed25519 => "ED25519",
            SigningScheme::RsaPkcs1Sha256 => "RSA_PKCS1_SHA256",
        }
    }

    /// Determine the scheme from a SubjectPublicKeyInfo algorithm identifier
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let alg_oid = spki.algorithm.oid;

        if alg_oid == ID_EC_PUBLIC_KEY {
            let params = spki.algorithm.parameters.as_ref().ok_or_else(|| {
                Error::InvalidKey("EC key is missing its curve parameter".to_string())
            })?;
            // params.value() is the raw OID content, without tag and length
            let curve_oid = ObjectIdentifier::from_bytes(params.value())
                .map_err(|e| Error::InvalidKey(format!("failed to parse EC curve OID: {}", e)))?;

            if curve_oid == SECP_256_R_1 {
                Ok(SigningScheme::EcdsaP256Sha256)
            } else if curve_oid == SECP_384_R_1 {
                Ok(SigningScheme::EcdsaP384Sha384)
            } else {
                Err(Error::UnsupportedAlgorithm(format!(
                    "EC curve {}",
                    curve_oid
                )))
            }
        } else if alg_oid == ID_ED_25519 {
            Ok(SigningScheme::Ed25519)
        } else if alg_oid == RSA_ENCRYPTION {
            Ok(SigningScheme::RsaPkcs1Sha256)
        } else {
            Err(Error::UnsupportedAlgorithm(format!(
                "public key algorithm {}",
                alg_oid
            )))
        }
    }
}

/// A public key for verification
pub struct VerificationKey {
    /// Raw public key bytes (the SPKI bit string contents)
    pub bytes: Vec<u8>,
    /// The scheme to use for verification
    pub scheme: SigningScheme,
}

impl VerificationKey {
    /// Create a new verification key
    pub fn new(bytes: Vec<u8>, scheme: SigningScheme) -> Self {
        Self { bytes, scheme }
    }

    /// Create a verification key from a parsed SubjectPublicKeyInfo
    pub fn from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let scheme = SigningScheme::from_spki(spki)?;
        Ok(Self::new(spki.subject_public_key.raw_bytes().to_vec(), scheme))
    }

    /// Verify a signature over data
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        match self.scheme {
            SigningScheme::EcdsaP256Sha256 => {
                let key = UnparsedPublicKey::new(&ECDSA_P256_SHA256_ASN1, &self.bytes);
                key.verify(data, signature)
                    .map_err(|_| Error::Verification("ECDSA P-256 signature invalid".to_string()))
            }
            SigningScheme::EcdsaP384Sha384 => {
                let key = UnparsedPublicKey::new(&ECDSA_P384_SHA384_ASN1, &self.bytes);
                key.verify(data, signature)
                    .map_err(|_| Error::Verification("ECDSA P-384 signature invalid".to_string()))
            }
            SigningScheme::Ed25519 => {
                let key = UnparsedPublicKey::new(&ED25519, &self.bytes);
                key.verify(data, signature)
                    .map_err(|_| Error::Verification("Ed25519 signature invalid".to_string()))
            }
            SigningScheme::RsaPkcs1Sha256 => {
                let key = UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &self.bytes);
                key.verify(data, signature).map_err(|_| {
                    Error::Verification("RSA PKCS#1 SHA-256 signature invalid".to_string())
                })
            }
        }
    }
}

/// Check a detached signature over `data` against every key in the keyring
///
/// The signature's tag selects the decode path: an armored signature is
/// unwrapped from its armor block first, a binary one is used as is. The
/// keyring's own source encoding plays no part here. Returns the id of the
/// key that verified.
pub fn verify_detached(keyring: &Keyring, data: &[u8], signature: &Encoded) -> Result<Vec<u8>> {
    let raw: Cow<'_, [u8]> = match signature {
        Encoded::Armored(text) => {
            let block = armor::decode(text)?;
            tracing::debug!(label = block.tag(), "checking armored detached signature");
            Cow::Owned(block.into_contents())
        }
        Encoded::Binary(bytes) => {
            tracing::debug!("checking binary detached signature");
            Cow::Borrowed(bytes.as_slice())
        }
    };

    if raw.is_empty() {
        return Err(Error::Verification("signature is empty".to_string()));
    }

    keyring.verify_any(data, &raw)
}
