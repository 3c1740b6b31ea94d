// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Typed public key handle over a SubjectPublicKeyInfo.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::{asn1::BitString, Any, Decode};
use ring::digest;
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::crypto_backend::{CryptoBackend, KeyFamily, RingBackend, SignatureAlgorithm};
use crate::error::{EncodingError, Error, KeyError, Result, SignatureError};
use crate::x509::oids::{self, ALGORITHMS};
use crate::x509::validator::KeyIdMethod;

pub const PUBLIC_KEY_PEM_LABEL: &str = "PUBLIC KEY";

/// Key family, as far as signature verification is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Rsa,
    Ec { curve: ObjectIdentifier },
    Ed25519,
    /// Parsed but not usable for verification
    Unsupported,
}

/// A subject public key.
///
/// Keys of algorithms the crate cannot verify with still load, so that a
/// certificate carrying one can be inspected; verification then reports
/// an unsupported algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    algorithm: AlgorithmIdentifier<Any>,
    kind: KeyKind,
    key_bytes: Vec<u8>,
    spki_der: Vec<u8>,
}

impl PublicKey {
    /// Parse a DER SubjectPublicKeyInfo.
    pub fn from_spki_der(spki_der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfo::<Any, BitString>::from_der(spki_der)
            .map_err(|e| Error::KeyError(KeyError::InvalidEncoding(alloc::format!("{}", e))))?;
        Self::from_spki(spki_der.to_vec(), &spki)
    }

    /// Parse a `PUBLIC KEY` PEM block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PUBLIC_KEY_PEM_LABEL {
            return Err(Error::EncodingError(EncodingError::InvalidPemLabel {
                expected: PUBLIC_KEY_PEM_LABEL.into(),
                found: label.into(),
            }));
        }
        Self::from_spki_der(&der)
    }

    pub(crate) fn from_spki(
        spki_der: Vec<u8>,
        spki: &SubjectPublicKeyInfo<Any, BitString>,
    ) -> Result<Self> {
        let key_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| {
                Error::KeyError(KeyError::InvalidEncoding(
                    "subjectPublicKey has unused bits".into(),
                ))
            })?
            .to_vec();

        let kind = match spki.algorithm.oid {
            oids::RSA => KeyKind::Rsa,
            oids::ED25519 => KeyKind::Ed25519,
            oids::ECPUBLICKEY => {
                // Only namedCurve parameters are supported.
                let curve = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .and_then(|p| p.decode_as::<ObjectIdentifier>().ok())
                    .ok_or(Error::KeyError(KeyError::MissingParameters))?;
                KeyKind::Ec { curve }
            }
            other => {
                log::debug!("public key algorithm {} is not verifiable", other);
                KeyKind::Unsupported
            }
        };

        Ok(Self {
            algorithm: spki.algorithm.clone(),
            kind,
            key_bytes,
            spki_der,
        })
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier<Any> {
        &self.algorithm
    }

    pub fn algorithm_oid(&self) -> ObjectIdentifier {
        self.algorithm.oid
    }

    /// Registry name of the key algorithm, e.g. `rsaEncryption`.
    pub fn algorithm_name(&self) -> &'static str {
        ALGORITHMS.long_name(&self.algorithm.oid)
    }

    pub fn curve(&self) -> Option<ObjectIdentifier> {
        match self.kind {
            KeyKind::Ec { curve } => Some(curve),
            _ => None,
        }
    }

    /// Registry name of the curve, e.g. `prime256v1`.
    pub fn curve_name(&self) -> Option<&'static str> {
        self.curve().map(|curve| ALGORITHMS.long_name(&curve))
    }

    /// Contents of the subjectPublicKey BIT STRING.
    pub fn key_bytes(&self) -> &[u8] {
        &self.key_bytes
    }

    /// The SubjectPublicKeyInfo exactly as encoded.
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    pub fn to_pem(&self) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            PUBLIC_KEY_PEM_LABEL,
            pem_rfc7468::LineEnding::LF,
            &self.spki_der,
        )?)
    }

    /// Resolve the signature algorithm this key would verify under
    /// `sig_alg`, rejecting key/algorithm family mismatches.
    pub fn signature_algorithm(
        &self,
        sig_alg: &AlgorithmIdentifier<Any>,
    ) -> core::result::Result<SignatureAlgorithm, SignatureError> {
        let algorithm = SignatureAlgorithm::from_oid_with_params(
            &sig_alg.oid,
            self.curve().as_ref(),
            sig_alg.parameters.as_ref(),
        )?;

        let matches = match algorithm.key_family() {
            KeyFamily::Ec => matches!(self.kind, KeyKind::Ec { .. }),
            KeyFamily::Ed25519 => self.kind == KeyKind::Ed25519,
            KeyFamily::Rsa => self.kind == KeyKind::Rsa,
        };
        if !matches {
            return Err(SignatureError::InvalidPublicKey(alloc::format!(
                "{} key cannot verify {:?}",
                self.algorithm_name(),
                algorithm
            )));
        }
        Ok(algorithm)
    }

    /// Verify `signature` over `message` with the default backend.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        sig_alg: &AlgorithmIdentifier<Any>,
    ) -> core::result::Result<(), SignatureError> {
        self.verify_with_backend(&RingBackend, message, signature, sig_alg)
    }

    pub fn verify_with_backend<B: CryptoBackend>(
        &self,
        backend: &B,
        message: &[u8],
        signature: &[u8],
        sig_alg: &AlgorithmIdentifier<Any>,
    ) -> core::result::Result<(), SignatureError> {
        let algorithm = self.signature_algorithm(sig_alg)?;
        log::trace!(
            "verify: {:?}, message {} bytes, signature {} bytes",
            algorithm,
            message.len(),
            signature.len()
        );
        backend.verify_signature(algorithm, message, signature, &self.key_bytes)
    }

    /// Derive a key identifier from this key.
    pub fn key_identifier(&self, method: KeyIdMethod) -> Vec<u8> {
        let key = self.key_bytes.as_slice();
        match method {
            KeyIdMethod::Sha1 => digest_of(&digest::SHA1_FOR_LEGACY_USE_ONLY, key),
            KeyIdMethod::Sha1Short => {
                // 0100 followed by the low 60 bits of the SHA-1 hash.
                let hash = digest_of(&digest::SHA1_FOR_LEGACY_USE_ONLY, key);
                let mut id = hash[hash.len() - 8..].to_vec();
                id[0] = 0x40 | (id[0] & 0x0F);
                id
            }
            KeyIdMethod::Sha256Truncated => truncated(&digest::SHA256, key),
            KeyIdMethod::Sha384Truncated => truncated(&digest::SHA384, key),
            KeyIdMethod::Sha512Truncated => truncated(&digest::SHA512, key),
            KeyIdMethod::Sha256 => digest_of(&digest::SHA256, key),
        }
    }
}

fn digest_of(algorithm: &'static digest::Algorithm, data: &[u8]) -> Vec<u8> {
    digest::digest(algorithm, data).as_ref().to_vec()
}

// Leftmost 160 bits.
fn truncated(algorithm: &'static digest::Algorithm, data: &[u8]) -> Vec<u8> {
    let mut id = digest_of(algorithm, data);
    id.truncate(20);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF_PUB: &str = include_str!("../../../test_key/ecp256/leaf.pub.pem");

    #[test]
    fn test_ec_key_from_pem() {
        let key = PublicKey::from_pem(LEAF_PUB).unwrap();
        assert_eq!(
            key.kind(),
            KeyKind::Ec {
                curve: oids::ECDSA_P256
            }
        );
        assert_eq!(key.algorithm_name(), "id-ecPublicKey");
        assert_eq!(key.curve_name(), Some("prime256v1"));
        assert_eq!(key.key_bytes().len(), 65);
        assert_eq!(key.key_bytes()[0], 0x04);
    }

    #[test]
    fn test_pem_round_trip() {
        let key = PublicKey::from_pem(LEAF_PUB).unwrap();
        let again = PublicKey::from_pem(&key.to_pem().unwrap()).unwrap();
        assert_eq!(key, again);
    }

    #[test]
    fn test_wrong_label_rejected() {
        let pem = include_str!("../../../test_key/ecp256/bare.cert.pem");
        let err = PublicKey::from_pem(pem).unwrap_err();
        assert!(matches!(
            err,
            Error::EncodingError(EncodingError::InvalidPemLabel { .. })
        ));
    }

    #[test]
    fn test_key_identifier_methods() {
        let key = PublicKey::from_pem(LEAF_PUB).unwrap();
        assert_eq!(
            hex::encode(key.key_identifier(KeyIdMethod::Sha1)),
            "8a4d138188d25e1096d561c8d9a51637e0cc39fd"
        );
        assert_eq!(
            hex::encode(key.key_identifier(KeyIdMethod::Sha1Short)),
            "49a51637e0cc39fd"
        );
        assert_eq!(key.key_identifier(KeyIdMethod::Sha256Truncated).len(), 20);
        assert_eq!(key.key_identifier(KeyIdMethod::Sha512Truncated).len(), 20);
        assert_eq!(key.key_identifier(KeyIdMethod::Sha256).len(), 32);
        assert_eq!(
            key.key_identifier(KeyIdMethod::Sha256Truncated),
            key.key_identifier(KeyIdMethod::Sha256)[..20]
        );
    }

    #[test]
    fn test_family_mismatch_rejected() {
        let key = PublicKey::from_pem(LEAF_PUB).unwrap();
        let rsa_sig = AlgorithmIdentifier::<Any> {
            oid: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11"),
            parameters: None,
        };
        assert!(matches!(
            key.signature_algorithm(&rsa_sig),
            Err(SignatureError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            key.verify(b"msg", &[0u8; 8], &rsa_sig),
            Err(SignatureError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_garbage_spki_rejected() {
        assert!(matches!(
            PublicKey::from_spki_der(&[0x30, 0x03, 0x02, 0x01, 0x00]),
            Err(Error::KeyError(KeyError::InvalidEncoding(_)))
        ));
    }
}
