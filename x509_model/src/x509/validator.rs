// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Validation primitives.
//!
//! This module provides the building blocks a chain builder needs:
//! - issuer matching by distinguished name hash
//! - signature verification of a child against a presumed issuer key
//! - subject key identifier self-checks
//!
//! None of these look at validity dates, revocation, name constraints or
//! path length. Signature failures are returned as values since a mismatch
//! is a routine outcome when probing candidate issuers.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use der::{Any, Encode};
use spki::AlgorithmIdentifier;

use crate::certificate::X509Fields;
use crate::crypto_backend::CryptoBackend;
use crate::error::SignatureError;
use crate::x509::public_key::PublicKey;

// ============================================================================
// Key identifier derivation
// ============================================================================

/// A way of deriving a key identifier from a public key.
///
/// All methods hash the contents of the subjectPublicKey BIT STRING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyIdMethod {
    /// SHA-1, RFC 5280 Section 4.2.1.2 method (1)
    Sha1,
    /// Type field `0100` plus the low 60 bits of SHA-1, RFC 5280 method (2)
    Sha1Short,
    /// Leftmost 160 bits of SHA-256, RFC 7093 method (1)
    Sha256Truncated,
    /// Leftmost 160 bits of SHA-384, RFC 7093 method (2)
    Sha384Truncated,
    /// Leftmost 160 bits of SHA-512, RFC 7093 method (3)
    Sha512Truncated,
    /// Full SHA-256
    Sha256,
}

impl KeyIdMethod {
    pub const ALL: [KeyIdMethod; 6] = [
        KeyIdMethod::Sha1,
        KeyIdMethod::Sha1Short,
        KeyIdMethod::Sha256Truncated,
        KeyIdMethod::Sha384Truncated,
        KeyIdMethod::Sha512Truncated,
        KeyIdMethod::Sha256,
    ];
}

/// Outcome of a subject key identifier self-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIdCheck {
    /// The declared identifier matches the key under this method
    Verified(KeyIdMethod),
    /// The certificate has no subjectKeyIdentifier extension
    Absent,
    /// The declared identifier matches none of the configured methods
    Unverified,
}

impl KeyIdCheck {
    pub fn is_verified(&self) -> bool {
        matches!(self, KeyIdCheck::Verified(_))
    }
}

// ============================================================================
// Validation Options
// ============================================================================

/// Options for the validation primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Key identifier derivations tried, in order
    pub key_id_methods: Vec<KeyIdMethod>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            key_id_methods: KeyIdMethod::ALL.to_vec(),
        }
    }
}

impl ValidationOptions {
    /// Create a new ValidationOptions accepting every key identifier method
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only the given key identifier methods.
    pub fn with_key_id_methods(mut self, methods: &[KeyIdMethod]) -> Self {
        self.key_id_methods = methods.to_vec();
        self
    }

    /// Accept one more key identifier method.
    pub fn add_key_id_method(mut self, method: KeyIdMethod) -> Self {
        if !self.key_id_methods.contains(&method) {
            self.key_id_methods.push(method);
        }
        self
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Whether `child` names `parent` as its issuer.
///
/// Compares the issuer DN hash of `child` with the subject DN hash of
/// `parent`. Attribute order and string types must match exactly.
pub fn is_issuer(child: &X509Fields, parent: &X509Fields) -> bool {
    child.issuer_hash() == parent.subject_hash()
}

/// Verify the signature on `child` with `issuer_key`.
///
/// The signed bytes are the TBS portion exactly as received. When the child
/// carries an inner signature AlgorithmIdentifier (certificates do) it must
/// be identical to the outer one, parameters included (RFC 5280 4.1.1.2).
pub fn check_signature<B: CryptoBackend>(
    backend: &B,
    issuer_key: &PublicKey,
    child: &X509Fields,
) -> Result<(), SignatureError> {
    log::trace!("check_signature: issuer key {}", issuer_key.algorithm_name());
    log::trace!("check_signature: child subject {}", child.subject());

    if let Some(inner) = child.tbs_signature_algorithm() {
        check_algorithm_match(child.signature_algorithm(), inner)?;
    }

    let signature = child.signature().as_bytes().ok_or_else(|| {
        SignatureError::InvalidSignatureFormat("signature BIT STRING has unused bits".into())
    })?;
    log::trace!(
        "check_signature: tbs {} bytes, signature {} bytes",
        child.tbs_der().len(),
        signature.len()
    );

    match issuer_key.verify_with_backend(
        backend,
        child.tbs_der(),
        signature,
        child.signature_algorithm(),
    ) {
        Ok(()) => {
            log::trace!("check_signature: SUCCESS");
            Ok(())
        }
        Err(e) => {
            log::debug!("check_signature: FAILED: {}", e);
            Err(e)
        }
    }
}

fn check_algorithm_match(
    outer: &AlgorithmIdentifier<Any>,
    inner: &AlgorithmIdentifier<Any>,
) -> Result<(), SignatureError> {
    if outer.oid != inner.oid {
        return Err(SignatureError::AlgorithmMismatch {
            cert_algo: outer.oid.to_string(),
            tbs_algo: inner.oid.to_string(),
        });
    }
    // Parameters matter for RSA-PSS, where one OID carries different hashes.
    let outer_params = outer.parameters.as_ref().and_then(|p| p.to_der().ok());
    let inner_params = inner.parameters.as_ref().and_then(|p| p.to_der().ok());
    if outer_params != inner_params {
        return Err(SignatureError::AlgorithmMismatch {
            cert_algo: alloc::format!("{} (with params)", outer.oid),
            tbs_algo: alloc::format!("{} (with params)", inner.oid),
        });
    }
    Ok(())
}

/// Compare a declared subject key identifier against `key`.
pub fn check_subject_key_identifier(
    key: &PublicKey,
    declared: Option<&[u8]>,
    options: &ValidationOptions,
) -> KeyIdCheck {
    let declared = match declared {
        Some(id) => id,
        None => return KeyIdCheck::Absent,
    };

    for method in &options.key_id_methods {
        if key.key_identifier(*method) == declared {
            log::trace!("subject key identifier matches {:?}", method);
            return KeyIdCheck::Verified(*method);
        }
    }

    log::debug!(
        "subject key identifier {} matches none of {:?}",
        hex::encode(declared),
        options.key_id_methods
    );
    KeyIdCheck::Unverified
}

#[cfg(test)]
mod tests {
    use super::*;
    use const_oid::ObjectIdentifier;

    fn ecdsa_sha256() -> AlgorithmIdentifier<Any> {
        AlgorithmIdentifier {
            oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2"),
            parameters: None,
        }
    }

    #[test]
    fn test_default_options_accept_all_methods() {
        let options = ValidationOptions::default();
        assert_eq!(options.key_id_methods.len(), KeyIdMethod::ALL.len());
        assert_eq!(options.key_id_methods[0], KeyIdMethod::Sha1);
    }

    #[test]
    fn test_options_builder() {
        let options = ValidationOptions::new()
            .with_key_id_methods(&[KeyIdMethod::Sha256Truncated])
            .add_key_id_method(KeyIdMethod::Sha1)
            .add_key_id_method(KeyIdMethod::Sha1);
        assert_eq!(
            options.key_id_methods,
            [KeyIdMethod::Sha256Truncated, KeyIdMethod::Sha1]
        );
    }

    #[test]
    fn test_algorithm_match() {
        assert!(check_algorithm_match(&ecdsa_sha256(), &ecdsa_sha256()).is_ok());

        let other = AlgorithmIdentifier {
            oid: ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3"),
            parameters: None,
        };
        assert!(matches!(
            check_algorithm_match(&ecdsa_sha256(), &other),
            Err(SignatureError::AlgorithmMismatch { .. })
        ));

        let empty: &[u8] = &[];
        let with_null = AlgorithmIdentifier {
            oid: ecdsa_sha256().oid,
            parameters: Some(Any::new(der::Tag::Null, empty).unwrap()),
        };
        assert!(check_algorithm_match(&ecdsa_sha256(), &with_null).is_err());
    }

    #[test]
    fn test_key_id_check() {
        let key =
            PublicKey::from_pem(include_str!("../../../test_key/ecp256/leaf.pub.pem")).unwrap();
        let options = ValidationOptions::default();

        let sha1 = key.key_identifier(KeyIdMethod::Sha1);
        assert_eq!(
            check_subject_key_identifier(&key, Some(&sha1), &options),
            KeyIdCheck::Verified(KeyIdMethod::Sha1)
        );

        let truncated = key.key_identifier(KeyIdMethod::Sha256Truncated);
        assert_eq!(
            check_subject_key_identifier(&key, Some(&truncated), &options),
            KeyIdCheck::Verified(KeyIdMethod::Sha256Truncated)
        );

        let sha1_only = ValidationOptions::new().with_key_id_methods(&[KeyIdMethod::Sha1]);
        assert_eq!(
            check_subject_key_identifier(&key, Some(&truncated), &sha1_only),
            KeyIdCheck::Unverified
        );

        assert_eq!(
            check_subject_key_identifier(&key, None, &options),
            KeyIdCheck::Absent
        );
        assert!(!KeyIdCheck::Absent.is_verified());
    }
}
