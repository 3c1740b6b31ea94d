// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! [`CryptoBackend`] over `ring::signature`.

use super::{CryptoBackend, SignatureAlgorithm};
use crate::error::SignatureError;
use ring::signature::{self, UnparsedPublicKey};

/// Default verifier. RSA keys must be 2048 to 8192 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBackend;

impl RingBackend {
    fn verification_algorithm(
        algorithm: SignatureAlgorithm,
    ) -> &'static dyn signature::VerificationAlgorithm {
        match algorithm {
            SignatureAlgorithm::EcdsaP256Sha256 => &signature::ECDSA_P256_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP256Sha384 => &signature::ECDSA_P256_SHA384_ASN1,
            SignatureAlgorithm::EcdsaP384Sha256 => &signature::ECDSA_P384_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP384Sha384 => &signature::ECDSA_P384_SHA384_ASN1,
            SignatureAlgorithm::RsaPkcs1Sha1 => {
                &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY
            }
            SignatureAlgorithm::RsaPkcs1Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            SignatureAlgorithm::RsaPkcs1Sha384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            SignatureAlgorithm::RsaPkcs1Sha512 => &signature::RSA_PKCS1_2048_8192_SHA512,
            SignatureAlgorithm::RsaPssSha256 => &signature::RSA_PSS_2048_8192_SHA256,
            SignatureAlgorithm::RsaPssSha384 => &signature::RSA_PSS_2048_8192_SHA384,
            SignatureAlgorithm::RsaPssSha512 => &signature::RSA_PSS_2048_8192_SHA512,
            SignatureAlgorithm::Ed25519 => &signature::ED25519,
        }
    }
}

impl CryptoBackend for RingBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignatureError> {
        UnparsedPublicKey::new(Self::verification_algorithm(algorithm), public_key)
            .verify(tbs_data, signature)
            .map_err(|_| {
                // A mismatch is an ordinary answer for issuer probing.
                log::debug!("ring rejected {:?} signature", algorithm);
                SignatureError::VerificationFailed
            })
    }
}
