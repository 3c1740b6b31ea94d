// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate and CSR decoding.
//!
//! Construction of a [`Certificate`](crate::Certificate) or
//! [`CertificateSigningRequest`](crate::CertificateSigningRequest) reports
//! malformed input through [`Error`]. The validation primitives return a
//! [`SignatureError`] value directly, since a mismatching signature is an
//! expected outcome rather than a failure of the caller.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Why a certificate or request could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Outer DER structure rejected
    ParseError(ParseError),

    /// Raised from `check_signature` and CSR self-signature checks
    SignatureError(SignatureError),

    /// A recognised extension carried a bad payload
    ExtensionError(ExtensionError),

    /// PEM armour problems
    EncodingError(EncodingError),

    /// SubjectPublicKeyInfo could not be read
    KeyError(KeyError),

    /// A name attribute value is not a readable string
    NameError(NameError),

    /// Version field outside v1..=v3, or a CSR that is not v1
    InvalidVersion(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Rejected by the DER reader
    Der(String),

    /// DER is well formed but the structure is not a certificate or request
    Malformed(String),

    /// Input exceeds [`DecodeOptions::max_der_len`](crate::DecodeOptions)
    InputTooLarge { limit: usize, found: usize },
}

/// Outcome of a failed signature check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Signature did not verify under the issuer key
    VerificationFailed,

    /// The outer signatureAlgorithm differs from the one inside the TBS
    AlgorithmMismatch { cert_algo: String, tbs_algo: String },

    /// Signature bits could not be recovered
    InvalidSignatureFormat(String),

    /// Issuer key cannot be used with the signature algorithm
    InvalidPublicKey(String),

    /// No backend support for the algorithm OID
    UnsupportedSignatureAlgorithm(String),
}

/// One variant per decoded extension family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    DuplicateExtension(String),
    BasicConstraints(String),
    KeyUsage(String),
    ExtendedKeyUsage(String),
    /// Subject or issuer alternative name
    AltName(String),
    /// Subject or authority key identifier
    KeyIdentifier(String),
    AuthorityInfoAccess(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Armour, base64 or line structure broken
    InvalidPem(String),

    /// Block label not accepted by the caller
    InvalidPemLabel { expected: String, found: String },

    /// Input held no CERTIFICATE block
    NoCertificateFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    InvalidEncoding(String),

    /// EC key without a named curve
    MissingParameters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    InvalidAttribute(String),
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "parse: {}", e),
            Error::SignatureError(e) => write!(f, "signature: {}", e),
            Error::ExtensionError(e) => write!(f, "extension: {}", e),
            Error::EncodingError(e) => write!(f, "pem: {}", e),
            Error::KeyError(e) => write!(f, "public key: {}", e),
            Error::NameError(e) => write!(f, "name: {}", e),
            Error::InvalidVersion(v) => write!(f, "unsupported version value {}", v),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Der(msg) => write!(f, "bad DER ({})", msg),
            ParseError::Malformed(msg) => f.write_str(msg),
            ParseError::InputTooLarge { limit, found } => {
                write!(f, "{} bytes of input, limit is {}", found, limit)
            }
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::VerificationFailed => f.write_str("verification failed"),
            SignatureError::AlgorithmMismatch {
                cert_algo,
                tbs_algo,
            } => write!(
                f,
                "signatureAlgorithm {} does not match tbs signature {}",
                cert_algo, tbs_algo
            ),
            SignatureError::InvalidSignatureFormat(msg) => {
                write!(f, "unreadable signature value ({})", msg)
            }
            SignatureError::InvalidPublicKey(msg) => write!(f, "unusable issuer key ({})", msg),
            SignatureError::UnsupportedSignatureAlgorithm(algo) => {
                write!(f, "no verifier for {}", algo)
            }
        }
    }
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (what, detail) = match self {
            ExtensionError::DuplicateExtension(oid) => {
                return write!(f, "{} present more than once", oid)
            }
            ExtensionError::BasicConstraints(m) => ("basicConstraints", m),
            ExtensionError::KeyUsage(m) => ("keyUsage", m),
            ExtensionError::ExtendedKeyUsage(m) => ("extKeyUsage", m),
            ExtensionError::AltName(m) => ("alternative name", m),
            ExtensionError::KeyIdentifier(m) => ("key identifier", m),
            ExtensionError::AuthorityInfoAccess(m) => ("authorityInfoAccess", m),
        };
        write!(f, "malformed {} ({})", what, detail)
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "invalid armour ({})", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(f, "label '{}' where '{}' was expected", found, expected)
            }
            EncodingError::NoCertificateFound => f.write_str("no certificate in input"),
        }
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidEncoding(msg) => write!(f, "bad encoding ({})", msg),
            KeyError::MissingParameters => f.write_str("curve parameters missing"),
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::InvalidAttribute(attr) => write!(f, "bad attribute value {}", attr),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for SignatureError {}

// ============================================================================
// Conversions
// ============================================================================

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::ParseError(ParseError::Der(err.to_string()))
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

impl From<pem::PemError> for Error {
    fn from(err: pem::PemError) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

impl From<SignatureError> for Error {
    fn from(err: SignatureError) -> Self {
        Error::SignatureError(err)
    }
}

impl From<ExtensionError> for Error {
    fn from(err: ExtensionError) -> Self {
        Error::ExtensionError(err)
    }
}

impl Error {
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::ParseError(ParseError::Malformed(msg.into()))
    }

    pub fn no_certificate() -> Self {
        Error::EncodingError(EncodingError::NoCertificateFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case0_display() {
        let err: Error = SignatureError::VerificationFailed.into();
        assert_eq!(err.to_string(), "signature: verification failed");

        assert_eq!(
            Error::no_certificate().to_string(),
            "pem: no certificate in input"
        );

        let err = Error::ParseError(ParseError::InputTooLarge {
            limit: 16,
            found: 32,
        });
        assert_eq!(err.to_string(), "parse: 32 bytes of input, limit is 16");

        let err: Error = ExtensionError::KeyUsage("empty bit string".into()).into();
        assert_eq!(
            err.to_string(),
            "extension: malformed keyUsage (empty bit string)"
        );
    }

    #[test]
    fn test_case0_conversions() {
        let der_err = der::Error::new(der::ErrorKind::Failed, der::Length::ZERO);
        let err: Error = der_err.into();
        assert!(matches!(err, Error::ParseError(ParseError::Der(_))));

        let err: Error = ExtensionError::DuplicateExtension("2.5.29.15".into()).into();
        assert_eq!(
            err.to_string(),
            "extension: 2.5.29.15 present more than once"
        );

        let err = Error::malformed("attribute 1.2.3 has no values");
        assert!(matches!(err, Error::ParseError(ParseError::Malformed(_))));
    }
}
