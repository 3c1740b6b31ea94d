// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Signature verification providers.
//!
//! Decoding never touches key material. Only `check_signature` and the CSR
//! self-signature check reach a [`CryptoBackend`]; [`RingBackend`] is used
//! unless a caller passes its own to a `*_with_backend` method.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::error::SignatureError;
use crate::x509::oids;
use const_oid::ObjectIdentifier;

mod ring;
pub use self::ring::*;

type SigResult<T> = core::result::Result<T, SignatureError>;

/// Key family a signature algorithm needs from the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Rsa,
    Ec,
    Ed25519,
}

/// A concrete verification scheme: key family, curve and digest resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    EcdsaP256Sha256,
    EcdsaP256Sha384,
    EcdsaP384Sha256,
    EcdsaP384Sha384,
    /// Accepted for legacy certificates only
    RsaPkcs1Sha1,
    RsaPkcs1Sha256,
    RsaPkcs1Sha384,
    RsaPkcs1Sha512,
    RsaPssSha256,
    RsaPssSha384,
    RsaPssSha512,
    Ed25519,
}

#[derive(Clone, Copy)]
enum Digest {
    Sha256,
    Sha384,
}

impl SignatureAlgorithm {
    /// Resolve a signature AlgorithmIdentifier.
    ///
    /// ECDSA OIDs only name the digest, so the curve has to come from the
    /// signer's key (`curve_oid`). RSASSA-PSS reads its digest from `params`.
    pub fn from_oid_with_params(
        sig_oid: &ObjectIdentifier,
        curve_oid: Option<&ObjectIdentifier>,
        params: Option<&der::Any>,
    ) -> SigResult<Self> {
        match *sig_oid {
            oids::ECDSA_WITH_SHA256 => Self::ecdsa(Digest::Sha256, curve_oid),
            oids::ECDSA_WITH_SHA384 => Self::ecdsa(Digest::Sha384, curve_oid),
            oids::SHA1_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha1),
            oids::SHA256_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
            oids::SHA384_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha384),
            oids::SHA512_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha512),
            oids::RSA_PSS => Self::rsa_pss(params),
            oids::ED25519 => Ok(SignatureAlgorithm::Ed25519),
            _ => match oids::ALGORITHMS.long_name(sig_oid) {
                "" => Err(unsupported(format!("OID {}", sig_oid))),
                name => Err(unsupported(format!("{} ({})", name, sig_oid))),
            },
        }
    }

    /// Like [`from_oid_with_params`](Self::from_oid_with_params) with no key
    /// or parameter context; ECDSA and RSA-PSS therefore fail.
    pub fn from_oid(oid: &ObjectIdentifier) -> SigResult<Self> {
        Self::from_oid_with_params(oid, None, None)
    }

    pub fn key_family(&self) -> KeyFamily {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256
            | SignatureAlgorithm::EcdsaP256Sha384
            | SignatureAlgorithm::EcdsaP384Sha256
            | SignatureAlgorithm::EcdsaP384Sha384 => KeyFamily::Ec,
            SignatureAlgorithm::Ed25519 => KeyFamily::Ed25519,
            _ => KeyFamily::Rsa,
        }
    }

    fn ecdsa(digest: Digest, curve_oid: Option<&ObjectIdentifier>) -> SigResult<Self> {
        let curve = curve_oid.ok_or_else(|| unsupported("ECDSA signer key has no named curve"))?;
        match (*curve, digest) {
            (oids::ECDSA_P256, Digest::Sha256) => Ok(SignatureAlgorithm::EcdsaP256Sha256),
            (oids::ECDSA_P256, Digest::Sha384) => Ok(SignatureAlgorithm::EcdsaP256Sha384),
            (oids::ECDSA_P384, Digest::Sha256) => Ok(SignatureAlgorithm::EcdsaP384Sha256),
            (oids::ECDSA_P384, Digest::Sha384) => Ok(SignatureAlgorithm::EcdsaP384Sha384),
            (other, _) => Err(unsupported(format!("ECDSA over curve {}", other))),
        }
    }

    /// RSASSA-PSS-params as the verifier supports them: MGF1 over the same
    /// digest as `hashAlgorithm`, and a salt as long as the digest.
    fn rsa_pss(params: Option<&der::Any>) -> SigResult<Self> {
        use der::{Reader, SliceReader, TagMode, TagNumber};
        use spki::AlgorithmIdentifier;

        // Absent or empty parameters mean SHA-1, which has no PSS verifier.
        let params = params.ok_or_else(|| unsupported("RSA-PSS with SHA-1 defaults"))?;
        let malformed = |e: der::Error| unsupported(format!("RSA-PSS parameters ({})", e));

        let mut reader = SliceReader::new(params.value()).map_err(malformed)?;
        let hash = reader
            .context_specific::<AlgorithmIdentifier<der::Any>>(TagNumber::N0, TagMode::Explicit)
            .map_err(malformed)?
            .map(|ai| ai.oid);
        let mask_gen = reader
            .context_specific::<AlgorithmIdentifier<der::Any>>(TagNumber::N1, TagMode::Explicit)
            .map_err(malformed)?;
        let salt_len = reader
            .context_specific::<u32>(TagNumber::N2, TagMode::Explicit)
            .map_err(malformed)?
            .unwrap_or(20);

        let (algorithm, hash_oid, digest_len) = match hash {
            Some(oids::SHA256) => (SignatureAlgorithm::RsaPssSha256, oids::SHA256, 32),
            Some(oids::SHA384) => (SignatureAlgorithm::RsaPssSha384, oids::SHA384, 48),
            Some(oids::SHA512) => (SignatureAlgorithm::RsaPssSha512, oids::SHA512, 64),
            Some(oid) => return Err(unsupported(format!("RSA-PSS with digest {}", oid))),
            None => return Err(unsupported("RSA-PSS with SHA-1 defaults")),
        };

        let mgf_hash = mask_gen
            .filter(|mgf| mgf.oid == oids::MGF1)
            .and_then(|mgf| mgf.parameters)
            .and_then(|p| p.decode_as::<AlgorithmIdentifier<der::Any>>().ok())
            .map(|ai| ai.oid);
        if mgf_hash != Some(hash_oid) {
            return Err(unsupported("RSA-PSS with MGF1 digest other than the hash"));
        }

        if salt_len != digest_len {
            return Err(unsupported(format!(
                "RSA-PSS salt length {} (expected {})",
                salt_len, digest_len
            )));
        }

        Ok(algorithm)
    }
}

fn unsupported<S: Into<String>>(msg: S) -> SignatureError {
    SignatureError::UnsupportedSignatureAlgorithm(msg.into())
}

/// Verifies one signature.
///
/// `public_key` holds the contents of the signer's subjectPublicKey BIT
/// STRING: a PKCS#1 RSAPublicKey, an uncompressed EC point or a raw Ed25519
/// key. Any failure is reported as [`SignatureError`].
pub trait CryptoBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> SigResult<()>;
}
