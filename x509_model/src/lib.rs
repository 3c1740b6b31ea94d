// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Typed X.509 Certificate Model
//!
//! A no_std-compatible decoder for X.509 v3 certificates and PKCS#10
//! certification requests, built on `der` for ASN.1 parsing and `ring` for
//! signature checks.
//!
//! # Features
//! - Decode certificates and CSRs from DER or PEM, including PEM bundles
//! - Distinguished names with canonical hashes for issuer matching
//! - Decoders for the common RFC 5280 extensions
//! - Chain-building primitives: issuer matching, signature verification,
//!   subject key identifier checks
//!
//! # Example
//! ```no_run
//! use x509_model::Certificate;
//!
//! # fn example(chain_pem: &str) -> x509_model::Result<()> {
//! let certs = Certificate::from_pems(chain_pem)?;
//! for pair in certs.windows(2) {
//!     let (child, parent) = (&pair[0], &pair[1]);
//!     if child.is_issuer(parent) {
//!         parent.check_signature(child)?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod crypto_backend;
pub mod error;
pub mod time;
pub mod x509;

pub use certificate::{
    Attribute, Certificate, CertificateSigningRequest, DecodeOptions, DistinguishedName,
    GeneralName, GeneralNames, Version, X509Fields,
};
pub use crypto_backend::{CryptoBackend, KeyFamily, RingBackend, SignatureAlgorithm};
pub use error::{Error, Result, SignatureError};
pub use time::{Time, Validity};
pub use x509::extensions::{
    BasicConstraints, ExtendedKeyUsage, Extension, ExtensionKind, FieldValue, KeyUsage,
};
pub use x509::{KeyIdCheck, KeyIdMethod, PublicKey, ValidationOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::x509::{KeyIdCheck, ValidationOptions};
    pub use crate::{Certificate, CertificateSigningRequest, Error, Result, X509Fields};
}
