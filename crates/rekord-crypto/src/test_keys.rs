//! Freshly generated key pairs wrapped as DER SubjectPublicKeyInfo

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::rsa::KeySize;
use aws_lc_rs::signature::{
    EcdsaKeyPair, Ed25519KeyPair, KeyPair as _, RsaKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING,
    ECDSA_P384_SHA384_ASN1_SIGNING, RSA_PKCS1_SHA256,
};
use const_oid::db::rfc5912::RSA_ENCRYPTION;
use der::asn1::{BitString, Null};
use der::Encode;
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

// SPKI headers for fixed-size keys; the raw key follows directly
const ED25519_SPKI_PREFIX: &str = "302a300506032b6570032100";
const P256_SPKI_PREFIX: &str = "3059301306072a8648ce3d020106082a8648ce3d030107034200";
const P384_SPKI_PREFIX: &str = "3076301006072a8648ce3d020106052b81040022036200";
const SECP256K1_SPKI_PREFIX: &str = "3056301006072a8648ce3d020106052b8104000a034200";
const X25519_SPKI_PREFIX: &str = "302a300506032b656e032100";

fn spki(prefix: &str, raw: &[u8]) -> Vec<u8> {
    let mut der = hex::decode(prefix).unwrap();
    der.extend_from_slice(raw);
    der
}

pub(crate) fn ed25519() -> (Ed25519KeyPair, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng).unwrap();
    let kp = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref()).unwrap();
    let der = spki(ED25519_SPKI_PREFIX, kp.public_key().as_ref());
    (kp, der)
}

pub(crate) fn p256() -> (EcdsaKeyPair, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let kp = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref()).unwrap();
    let der = spki(P256_SPKI_PREFIX, kp.public_key().as_ref());
    (kp, der)
}

pub(crate) fn p384() -> (EcdsaKeyPair, Vec<u8>) {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P384_SHA384_ASN1_SIGNING, &rng).unwrap();
    let kp = EcdsaKeyPair::from_pkcs8(&ECDSA_P384_SHA384_ASN1_SIGNING, pkcs8.as_ref()).unwrap();
    let der = spki(P384_SPKI_PREFIX, kp.public_key().as_ref());
    (kp, der)
}

pub(crate) fn sign_ecdsa(kp: &EcdsaKeyPair, data: &[u8]) -> Vec<u8> {
    let rng = SystemRandom::new();
    kp.sign(&rng, data).unwrap().as_ref().to_vec()
}

/// RSA key pair; the SPKI wraps the PKCS#1 RSAPublicKey with a NULL parameter
pub(crate) fn rsa() -> (RsaKeyPair, Vec<u8>) {
    let kp = RsaKeyPair::generate(KeySize::Rsa2048).unwrap();
    let info = SubjectPublicKeyInfoOwned {
        algorithm: AlgorithmIdentifierOwned {
            oid: RSA_ENCRYPTION,
            parameters: Some(Null.into()),
        },
        subject_public_key: BitString::from_bytes(kp.public_key().as_ref()).unwrap(),
    };
    let der = info.to_der().unwrap();
    (kp, der)
}

pub(crate) fn sign_rsa(kp: &RsaKeyPair, data: &[u8]) -> Vec<u8> {
    let rng = SystemRandom::new();
    let mut sig = vec![0u8; kp.public_modulus_len()];
    kp.sign(&RSA_PKCS1_SHA256, &rng, data, &mut sig).unwrap();
    sig
}

/// Well-formed EC key on a curve nothing here verifies with
pub(crate) fn secp256k1_spki() -> Vec<u8> {
    let mut point = vec![0x04];
    point.extend_from_slice(&[0x11; 64]);
    spki(SECP256K1_SPKI_PREFIX, &point)
}

/// Well-formed key-agreement key that cannot verify signatures
pub(crate) fn x25519_spki() -> Vec<u8> {
    spki(X25519_SPKI_PREFIX, &[0x22; 32])
}
