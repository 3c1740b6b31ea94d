// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Typed X.509 certificate and PKCS#10 certification request model.
//!
//! This module provides:
//! - [`X509Fields`], the read-only projection shared by both object kinds
//! - [`Certificate`], which adds the validity window and subject public key
//! - [`CertificateSigningRequest`], which adds the request attributes and key
//! - DER and PEM entry points bounded by [`DecodeOptions`]
//!
//! Convenience fields (DNS names, CA flag, key usage, ...) are folded out of
//! the extensions once, at construction.
//!
//! # Examples
//!
//! ```no_run
//! use x509_model::Certificate;
//!
//! # fn example(ca_pem: &str, leaf_pem: &str) -> x509_model::Result<()> {
//! let ca = Certificate::from_pem(ca_pem)?;
//! let leaf = Certificate::from_pem(leaf_pem)?;
//!
//! if leaf.is_issuer(&ca) && ca.check_signature(&leaf).is_ok() {
//!     println!("{} issued {}", ca.subject(), leaf.subject());
//! }
//! # Ok(())
//! # }
//! ```

pub mod name;
pub mod pem;
pub mod raw;

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use const_oid::ObjectIdentifier;
use der::{asn1::BitString, Any, Decode};
use spki::AlgorithmIdentifier;

use crate::crypto_backend::{CryptoBackend, RingBackend};
use crate::error::{EncodingError, Error, ParseError, Result, SignatureError};
use crate::time::{Time, Validity};
use crate::x509::extensions::{decode_extensions, Extension, ExtensionKind, FieldValue, KeyUsage};
use crate::x509::oids::{self, ALGORITHMS, EXTENSIONS};
use crate::x509::public_key::PublicKey;
use crate::x509::validator::{self, KeyIdCheck, ValidationOptions};

pub use self::name::{Attribute, DistinguishedName, GeneralName, GeneralNames};
pub use self::raw::{RawCertificate, RawCertificationRequest, RawSigned, Version};

pub const CERTIFICATE_PEM_LABEL: &str = "CERTIFICATE";
pub const CSR_PEM_LABEL: &str = "CERTIFICATE REQUEST";
/// Label written by older tooling for certification requests.
pub const LEGACY_CSR_PEM_LABEL: &str = "NEW CERTIFICATE REQUEST";

/// Default upper bound on accepted DER input.
pub const DEFAULT_MAX_DER_LEN: usize = 1024 * 1024;

// ============================================================================
// Decode options
// ============================================================================

/// Limits applied before any decoding work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Largest DER structure accepted, in bytes
    pub max_der_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_der_len: DEFAULT_MAX_DER_LEN,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_der_len(mut self, max_der_len: usize) -> Self {
        self.max_der_len = max_der_len;
        self
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.max_der_len {
            return Err(Error::ParseError(ParseError::InputTooLarge {
                limit: self.max_der_len,
                found: len,
            }));
        }
        Ok(())
    }
}

// ============================================================================
// X509Fields
// ============================================================================

/// Fields common to certificates and certification requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X509Fields {
    version: Version,
    serial_number: Vec<u8>,
    signature_algorithm: AlgorithmIdentifier<Any>,
    tbs_signature_algorithm: Option<AlgorithmIdentifier<Any>>,
    signature: BitString,
    tbs_der: Vec<u8>,
    der: Vec<u8>,
    subject: DistinguishedName,
    issuer: DistinguishedName,
    subject_hash: String,
    issuer_hash: String,
    extensions: Vec<Extension>,

    // Folded out of the extensions at construction.
    dns_names: Vec<String>,
    email_addresses: Vec<String>,
    ip_addresses: Vec<String>,
    uris: Vec<String>,
    is_ca: bool,
    max_path_len: i64,
    basic_constraints_valid: bool,
    key_usage: KeyUsage,
    ext_key_usage: Vec<ObjectIdentifier>,
    subject_key_identifier: String,
    authority_key_identifier: String,
    ocsp_server: String,
    issuing_certificate_url: String,
}

impl X509Fields {
    fn new(
        version: Version,
        serial_number: Vec<u8>,
        signed: RawSigned,
        tbs_signature_algorithm: Option<AlgorithmIdentifier<Any>>,
        subject: DistinguishedName,
        issuer: DistinguishedName,
        extensions: Vec<Extension>,
    ) -> Self {
        let mut fields = Self {
            version,
            serial_number,
            signature_algorithm: signed.signature_algorithm,
            tbs_signature_algorithm,
            signature: signed.signature,
            tbs_der: signed.tbs_der,
            der: signed.der,
            subject_hash: subject.get_hash(),
            issuer_hash: issuer.get_hash(),
            subject,
            issuer,
            extensions: Vec::new(),
            dns_names: Vec::new(),
            email_addresses: Vec::new(),
            ip_addresses: Vec::new(),
            uris: Vec::new(),
            is_ca: false,
            max_path_len: -1,
            basic_constraints_valid: false,
            key_usage: KeyUsage::default(),
            ext_key_usage: Vec::new(),
            subject_key_identifier: String::new(),
            authority_key_identifier: String::new(),
            ocsp_server: String::new(),
            issuing_certificate_url: String::new(),
        };

        for ext in &extensions {
            match &ext.kind {
                ExtensionKind::SubjectAltName(names) => {
                    fields
                        .dns_names
                        .extend(names.dns_names().map(String::from));
                    fields
                        .email_addresses
                        .extend(names.email_addresses().map(String::from));
                    fields.ip_addresses.extend(names.ip_addresses());
                    fields.uris.extend(names.uris().map(String::from));
                }
                ExtensionKind::BasicConstraints(bc) => {
                    fields.is_ca = bc.ca;
                    fields.max_path_len = bc.max_path_len();
                    fields.basic_constraints_valid = true;
                }
                ExtensionKind::KeyUsage(ku) => fields.key_usage = *ku,
                ExtensionKind::ExtendedKeyUsage(eku) => {
                    fields.ext_key_usage = eku.key_purposes.clone()
                }
                ExtensionKind::SubjectKeyIdentifier(id) => {
                    fields.subject_key_identifier = hex::encode(id)
                }
                ExtensionKind::AuthorityKeyIdentifier(aki) => {
                    if let Some(id) = &aki.key_identifier {
                        fields.authority_key_identifier = hex::encode(id);
                    }
                }
                ExtensionKind::AuthorityInfoAccess(aia) => {
                    fields.ocsp_server = aia.ocsp().unwrap_or_default().to_string();
                    fields.issuing_certificate_url =
                        aia.ca_issuers().unwrap_or_default().to_string();
                }
                ExtensionKind::IssuerAltName(_) | ExtensionKind::Unknown => {}
            }
        }
        fields.extensions = extensions;
        fields
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Serial number, big-endian, without a leading sign octet.
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    /// Lowercase hex of [`Self::serial_number`].
    pub fn serial_number_hex(&self) -> String {
        hex::encode(&self.serial_number)
    }

    /// The outer signatureAlgorithm.
    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier<Any> {
        &self.signature_algorithm
    }

    pub fn signature_algorithm_oid(&self) -> ObjectIdentifier {
        self.signature_algorithm.oid
    }

    /// Registry name of the signature algorithm, empty when unregistered.
    pub fn signature_algorithm_name(&self) -> &'static str {
        ALGORITHMS.long_name(&self.signature_algorithm.oid)
    }

    /// The TBSCertificate `signature` field; requests have none.
    pub fn tbs_signature_algorithm(&self) -> Option<&AlgorithmIdentifier<Any>> {
        self.tbs_signature_algorithm.as_ref()
    }

    pub fn signature(&self) -> &BitString {
        &self.signature
    }

    /// Signature bits as bytes.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature.raw_bytes()
    }

    /// The signed portion exactly as received.
    pub fn tbs_der(&self) -> &[u8] {
        &self.tbs_der
    }

    /// The whole structure exactly as received.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    pub fn subject(&self) -> &DistinguishedName {
        &self.subject
    }

    pub fn issuer(&self) -> &DistinguishedName {
        &self.issuer
    }

    pub fn subject_hash(&self) -> &str {
        &self.subject_hash
    }

    pub fn issuer_hash(&self) -> &str {
        &self.issuer_hash
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn dns_names(&self) -> &[String] {
        &self.dns_names
    }

    pub fn email_addresses(&self) -> &[String] {
        &self.email_addresses
    }

    /// SAN IP addresses in textual form.
    pub fn ip_addresses(&self) -> &[String] {
        &self.ip_addresses
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn is_ca(&self) -> bool {
        self.is_ca
    }

    /// pathLenConstraint, or -1 when absent.
    pub fn max_path_len(&self) -> i64 {
        self.max_path_len
    }

    /// Whether a basicConstraints extension is present.
    pub fn basic_constraints_valid(&self) -> bool {
        self.basic_constraints_valid
    }

    /// Key usage bits; empty when the extension is absent.
    pub fn key_usage(&self) -> KeyUsage {
        self.key_usage
    }

    pub fn ext_key_usage(&self) -> &[ObjectIdentifier] {
        &self.ext_key_usage
    }

    /// Hex subject key identifier, empty when absent.
    pub fn subject_key_identifier(&self) -> &str {
        &self.subject_key_identifier
    }

    /// Hex authority key identifier, empty when absent.
    pub fn authority_key_identifier(&self) -> &str {
        &self.authority_key_identifier
    }

    /// First OCSP responder URL, empty when absent.
    pub fn ocsp_server(&self) -> &str {
        &self.ocsp_server
    }

    /// First CA issuers URL, empty when absent.
    pub fn issuing_certificate_url(&self) -> &str {
        &self.issuing_certificate_url
    }

    /// Find an extension by short name, long name or dotted OID.
    pub fn get_extension(&self, key: &str) -> Option<&Extension> {
        let oid = EXTENSIONS.resolve(key)?;
        self.extensions.iter().find(|ext| ext.oid == oid)
    }

    /// Read a sub-field of an extension, e.g. `("keyUsage", "keyCertSign")`.
    pub fn get_extension_field(&self, key: &str, field: &str) -> Option<FieldValue> {
        self.get_extension(key)?.field(field)
    }

    fn declared_subject_key_identifier(&self) -> Option<&[u8]> {
        self.extensions.iter().find_map(|ext| match &ext.kind {
            ExtensionKind::SubjectKeyIdentifier(id) => Some(id.as_slice()),
            _ => None,
        })
    }

    fn to_pem_with_label(&self, label: &str) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            label,
            pem_rfc7468::LineEnding::LF,
            &self.der,
        )?)
    }

    fn json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("version".into(), self.version.to_string().into());
        map.insert("serialNumber".into(), self.serial_number_hex().into());
        map.insert(
            "signatureOid".into(),
            self.signature_algorithm.oid.to_string().into(),
        );
        map.insert(
            "signatureAlgorithm".into(),
            self.signature_algorithm_name().into(),
        );
        map.insert("subject".into(), self.subject.to_json());
        map.insert("issuer".into(), self.issuer.to_json());
        let extensions: Vec<serde_json::Value> =
            self.extensions.iter().map(Extension::to_json).collect();
        map.insert("extensions".into(), extensions.into());
        map.insert("dnsNames".into(), self.dns_names.clone().into());
        map.insert("emailAddresses".into(), self.email_addresses.clone().into());
        map.insert("ipAddresses".into(), self.ip_addresses.clone().into());
        map.insert("uris".into(), self.uris.clone().into());
        map.insert("isCA".into(), self.is_ca.into());
        map.insert("maxPathLen".into(), self.max_path_len.into());
        map.insert(
            "basicConstraintsValid".into(),
            self.basic_constraints_valid.into(),
        );
        map.insert("keyUsage".into(), self.key_usage.bits().into());
        map.insert(
            "subjectKeyIdentifier".into(),
            self.subject_key_identifier.clone().into(),
        );
        map.insert("ocspServer".into(), self.ocsp_server.clone().into());
        map.insert(
            "issuingCertificateURL".into(),
            self.issuing_certificate_url.clone().into(),
        );
        map
    }
}

fn public_key_json(key: &PublicKey) -> serde_json::Value {
    serde_json::json!({
        "algorithm": key.algorithm_name(),
        "oid": key.algorithm_oid().to_string(),
        "curve": key.curve_name(),
        "key": hex::encode(key.key_bytes()),
    })
}

// ============================================================================
// Certificate
// ============================================================================

/// A decoded X.509 certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    fields: X509Fields,
    validity: Validity,
    public_key: PublicKey,
}

impl Deref for Certificate {
    type Target = X509Fields;

    fn deref(&self) -> &X509Fields {
        &self.fields
    }
}

impl Certificate {
    /// Parse a Certificate from DER-encoded bytes.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Self::from_der_with_options(der, &DecodeOptions::default())
    }

    pub fn from_der_with_options(der: &[u8], options: &DecodeOptions) -> Result<Self> {
        options.check_len(der.len())?;
        Self::from_raw(RawCertificate::from_der(der)?)
    }

    /// Build the typed model from an already-decoded certificate.
    pub fn from_raw(raw: RawCertificate) -> Result<Self> {
        let RawCertificate {
            tbs_certificate: tbs,
            signed,
        } = raw;

        let version = Version::from_value(tbs.version)?;
        log::trace!(
            "certificate {} serial {}",
            version,
            hex::encode(&tbs.serial_number)
        );

        let extensions = decode_extensions(&tbs.extensions)?;
        let public_key = PublicKey::from_spki(tbs.spki_der, &tbs.spki)?;

        let mut issuer = tbs.issuer;
        issuer.set_unique_id(tbs.issuer_unique_id);
        let mut subject = tbs.subject;
        subject.set_unique_id(tbs.subject_unique_id);

        let fields = X509Fields::new(
            version,
            tbs.serial_number,
            signed,
            Some(tbs.signature),
            subject,
            issuer,
            extensions,
        );

        Ok(Self {
            fields,
            validity: tbs.validity,
            public_key,
        })
    }

    /// Parse the first CERTIFICATE block of a PEM document.
    ///
    /// Blocks with other labels are skipped; blocks after the first
    /// certificate are ignored.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_pem_with_options(pem, &DecodeOptions::default())
    }

    pub fn from_pem_with_options(pem: &str, options: &DecodeOptions) -> Result<Self> {
        let der = pem::contents_labelled(pem, CERTIFICATE_PEM_LABEL)?
            .into_iter()
            .next()
            .ok_or_else(Error::no_certificate)?;
        Self::from_der_with_options(&der, options)
    }

    /// Parse every CERTIFICATE block of a PEM document, in order.
    ///
    /// Any malformed certificate block fails the whole call.
    pub fn from_pems(pem: &str) -> Result<Vec<Self>> {
        Self::from_pems_with_options(pem, &DecodeOptions::default())
    }

    pub fn from_pems_with_options(pem: &str, options: &DecodeOptions) -> Result<Vec<Self>> {
        let certs = pem::contents_labelled(pem, CERTIFICATE_PEM_LABEL)?
            .iter()
            .map(|der| Self::from_der_with_options(der, options))
            .collect::<Result<Vec<_>>>()?;
        if certs.is_empty() {
            return Err(Error::no_certificate());
        }
        Ok(certs)
    }

    /// PEM framing of the original DER.
    pub fn to_pem(&self) -> Result<String> {
        self.fields.to_pem_with_label(CERTIFICATE_PEM_LABEL)
    }

    pub fn fields(&self) -> &X509Fields {
        &self.fields
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn valid_from(&self) -> Time {
        self.validity.not_before
    }

    pub fn valid_to(&self) -> Time {
        self.validity.not_after
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Contents of the subjectPublicKey BIT STRING.
    pub fn public_key_raw(&self) -> &[u8] {
        self.public_key.key_bytes()
    }

    /// Whether `parent`'s subject is this certificate's issuer.
    pub fn is_issuer(&self, parent: &Certificate) -> bool {
        validator::is_issuer(&self.fields, &parent.fields)
    }

    /// Verify the signature on `child` with this certificate's key.
    ///
    /// Only the signature is checked: validity dates, revocation, name
    /// constraints and path length are left to the caller.
    pub fn check_signature(&self, child: &X509Fields) -> core::result::Result<(), SignatureError> {
        self.check_signature_with_backend(&RingBackend, child)
    }

    pub fn check_signature_with_backend<B: CryptoBackend>(
        &self,
        backend: &B,
        child: &X509Fields,
    ) -> core::result::Result<(), SignatureError> {
        validator::check_signature(backend, &self.public_key, child)
    }

    /// Whether the subjectKeyIdentifier matches this certificate's own key
    /// under any default derivation. False when the extension is absent.
    pub fn verify_subject_key_identifier(&self) -> bool {
        self.check_subject_key_identifier(&ValidationOptions::default())
            .is_verified()
    }

    pub fn check_subject_key_identifier(&self, options: &ValidationOptions) -> KeyIdCheck {
        validator::check_subject_key_identifier(
            &self.public_key,
            self.fields.declared_subject_key_identifier(),
            options,
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = self.fields.json_map();
        map.insert(
            "validity".into(),
            serde_json::json!({
                "notBefore": self.validity.not_before.to_iso8601(),
                "notAfter": self.validity.not_after.to_iso8601(),
            }),
        );
        map.insert("publicKey".into(), public_key_json(&self.public_key));
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Certificate:")?;
        writeln!(f, "  Version: {}", self.version())?;
        writeln!(f, "  Serial Number: {}", self.serial_number_hex())?;
        writeln!(
            f,
            "  Signature Algorithm: {}",
            self.signature_algorithm_oid()
        )?;
        writeln!(f, "  Issuer: {}", self.issuer())?;
        writeln!(f, "  Validity:")?;
        writeln!(f, "    Not Before: {}", self.validity.not_before)?;
        writeln!(f, "    Not After: {}", self.validity.not_after)?;
        writeln!(f, "  Subject: {}", self.subject())?;
        writeln!(f, "  Public Key: {}", self.public_key.algorithm_oid())?;
        for ext in self.extensions() {
            writeln!(f, "  Extension: {}", ext)?;
        }
        Ok(())
    }
}

// ============================================================================
// CertificateSigningRequest
// ============================================================================

/// A decoded PKCS#10 certification request.
///
/// Extensions come from the `extensionRequest` attribute. The issuer name
/// is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSigningRequest {
    fields: X509Fields,
    public_key: PublicKey,
    attributes: Vec<Attribute>,
}

impl Deref for CertificateSigningRequest {
    type Target = X509Fields;

    fn deref(&self) -> &X509Fields {
        &self.fields
    }
}

impl CertificateSigningRequest {
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Self::from_der_with_options(der, &DecodeOptions::default())
    }

    pub fn from_der_with_options(der: &[u8], options: &DecodeOptions) -> Result<Self> {
        options.check_len(der.len())?;
        Self::from_raw(RawCertificationRequest::from_der(der)?)
    }

    /// Build the typed model from an already-decoded request.
    pub fn from_raw(raw: RawCertificationRequest) -> Result<Self> {
        let RawCertificationRequest { info, signed } = raw;

        let version = Version::from_value(info.version)?;
        if version != Version::V1 {
            return Err(Error::InvalidVersion(version.value()));
        }

        let mut attributes = Vec::with_capacity(info.attributes.len());
        let mut extensions = None;
        for raw_attr in info.attributes {
            let first = raw_attr.values.into_iter().next().ok_or_else(|| {
                Error::malformed(alloc::format!("attribute {} has no values", raw_attr.oid))
            })?;
            let mut attr = Attribute::from_any(raw_attr.oid, first)?;
            if raw_attr.oid == oids::EXTENSION_REQUEST {
                let raw_exts: raw::RawExtensions = attr.encoded_value().decode_as()?;
                let decoded = decode_extensions(&raw_exts.0)?;
                if extensions.is_none() {
                    extensions = Some(decoded.clone());
                }
                attr.set_extensions(decoded);
            }
            attributes.push(attr);
        }

        let public_key = PublicKey::from_spki(info.spki_der, &info.spki)?;
        let fields = X509Fields::new(
            version,
            Vec::new(),
            signed,
            None,
            info.subject,
            DistinguishedName::new(),
            extensions.unwrap_or_default(),
        );

        Ok(Self {
            fields,
            public_key,
            attributes,
        })
    }

    /// Parse the first certification request block of a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_pem_with_options(pem, &DecodeOptions::default())
    }

    pub fn from_pem_with_options(pem: &str, options: &DecodeOptions) -> Result<Self> {
        let blocks = pem::blocks(pem)?;
        let block = blocks
            .iter()
            .find(|b| b.tag() == CSR_PEM_LABEL || b.tag() == LEGACY_CSR_PEM_LABEL)
            .ok_or_else(|| {
                Error::EncodingError(EncodingError::InvalidPemLabel {
                    expected: CSR_PEM_LABEL.into(),
                    found: blocks.first().map(|b| b.tag().into()).unwrap_or_default(),
                })
            })?;
        Self::from_der_with_options(block.contents(), options)
    }

    pub fn to_pem(&self) -> Result<String> {
        self.fields.to_pem_with_label(CSR_PEM_LABEL)
    }

    pub fn fields(&self) -> &X509Fields {
        &self.fields
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Request attributes in encoding order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Find a request attribute by name or dotted OID.
    pub fn get_attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.matches(key))
    }

    pub fn challenge_password(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.oid() == oids::CHALLENGE_PASSWORD)
            .map(Attribute::value)
    }

    /// Verify the request's proof of possession with its own key.
    pub fn check_self_signature(&self) -> core::result::Result<(), SignatureError> {
        self.check_self_signature_with_backend(&RingBackend)
    }

    pub fn check_self_signature_with_backend<B: CryptoBackend>(
        &self,
        backend: &B,
    ) -> core::result::Result<(), SignatureError> {
        validator::check_signature(backend, &self.public_key, &self.fields)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = self.fields.json_map();
        let attributes: Vec<serde_json::Value> =
            self.attributes.iter().map(Attribute::to_json).collect();
        map.insert("attributes".into(), attributes.into());
        map.insert("publicKey".into(), public_key_json(&self.public_key));
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for CertificateSigningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Certificate Request:")?;
        writeln!(f, "  Version: {}", self.version())?;
        writeln!(f, "  Subject: {}", self.subject())?;
        writeln!(f, "  Public Key: {}", self.public_key.algorithm_oid())?;
        for attr in &self.attributes {
            writeln!(f, "  Attribute: {}", attr.oid())?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: &str = include_str!("../../../test_key/ecp256/leaf.cert.pem");
    const BARE: &str = include_str!("../../../test_key/ecp256/bare.cert.pem");
    const CSR: &str = include_str!("../../../test_key/ecp256/req.csr.pem");

    #[test]
    fn test_decode_options() {
        let options = DecodeOptions::new().with_max_der_len(16);
        assert!(options.check_len(16).is_ok());
        assert_eq!(
            options.check_len(17),
            Err(Error::ParseError(ParseError::InputTooLarge {
                limit: 16,
                found: 17
            }))
        );
        assert_eq!(DecodeOptions::default().max_der_len, DEFAULT_MAX_DER_LEN);
    }

    #[test]
    fn test_oversize_input_rejected_before_decoding() {
        let options = DecodeOptions::new().with_max_der_len(32);
        let err = Certificate::from_pem_with_options(BARE, &options).unwrap_err();
        assert!(matches!(
            err,
            Error::ParseError(ParseError::InputTooLarge { limit: 32, .. })
        ));
    }

    #[test]
    fn test_leaf_fields() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        assert_eq!(cert.version(), Version::V3);
        assert_eq!(cert.serial_number_hex(), "8f12");
        assert_eq!(cert.signature_algorithm_name(), "sha256WithRSAEncryption");
        assert_eq!(cert.subject().common_name(), "www.example.com");
        assert_eq!(cert.subject().organizational_unit_name(), "Engineering");
        assert_eq!(cert.issuer().common_name(), "Example Root CA");
        assert_eq!(cert.dns_names(), ["www.example.com", "example.com"]);
        assert_eq!(cert.email_addresses(), ["admin@example.com"]);
        assert_eq!(cert.ip_addresses(), ["192.168.1.1", "2001:db8::1"]);
        assert_eq!(cert.uris(), ["https://www.example.com/"]);
        assert!(!cert.is_ca());
        assert!(cert.basic_constraints_valid());
        assert!(cert.key_usage().has(KeyUsage::DIGITAL_SIGNATURE));
        assert!(cert.key_usage().has(KeyUsage::KEY_AGREEMENT));
        assert_eq!(cert.ext_key_usage().len(), 2);
        assert_eq!(
            cert.subject_key_identifier(),
            "8a4d138188d25e1096d561c8d9a51637e0cc39fd"
        );
        assert_eq!(
            cert.authority_key_identifier(),
            "85f9887994b5cb6fc01c3547ee11e364500c9f29"
        );
        assert_eq!(cert.ocsp_server(), "http://ocsp.example.com");
        assert_eq!(cert.issuing_certificate_url(), "http://ca.example.com/root.crt");
        assert_eq!(cert.valid_from().to_iso8601(), "2025-01-01T00:00:00Z");
        assert_eq!(cert.valid_to().to_iso8601(), "2030-01-01T00:00:00Z");
        assert_eq!(cert.public_key().curve_name(), Some("prime256v1"));
    }

    #[test]
    fn test_get_extension_field() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        assert_eq!(
            cert.get_extension_field("extKeyUsage", "serverAuth"),
            Some(FieldValue::Bool(true))
        );
        assert_eq!(
            cert.get_extension_field("2.5.29.15", "keyCertSign"),
            Some(FieldValue::Bool(false))
        );
        assert!(cert.get_extension("X509v3 Subject Alternative Name").is_some());
        assert_eq!(cert.get_extension_field("keyUsage", "noSuchFlag"), None);
        assert_eq!(cert.get_extension_field("nameConstraints", "critical"), None);
    }

    #[test]
    fn test_bare_defaults() {
        let cert = Certificate::from_pem(BARE).unwrap();
        assert!(cert.extensions().is_empty());
        assert!(!cert.is_ca());
        assert_eq!(cert.max_path_len(), -1);
        assert!(!cert.basic_constraints_valid());
        assert_eq!(cert.key_usage().bits(), 0);
        assert_eq!(cert.subject_key_identifier(), "");
        assert_eq!(cert.ocsp_server(), "");
        assert!(cert.dns_names().is_empty());
        assert_eq!(cert.serial_number_hex(), "ff");
        assert!(cert.get_extension("keyUsage").is_none());
    }

    #[test]
    fn test_to_json() {
        let cert = Certificate::from_pem(LEAF).unwrap();
        let json = cert.to_json();
        assert_eq!(json["serialNumber"], "8f12");
        assert_eq!(json["isCA"], false);
        assert_eq!(json["validity"]["notAfter"], "2030-01-01T00:00:00Z");
        assert_eq!(json["publicKey"]["curve"], "prime256v1");
        assert_eq!(json["dnsNames"][1], "example.com");
    }

    #[test]
    fn test_csr_fields() {
        let csr = CertificateSigningRequest::from_pem(CSR).unwrap();
        assert_eq!(csr.version(), Version::V1);
        assert!(csr.issuer().is_empty());
        assert_eq!(csr.subject().country_name(), "DE");
        assert_eq!(csr.dns_names(), ["device.example.org"]);
        assert_eq!(csr.ip_addresses(), ["10.0.0.1"]);
        assert!(csr.key_usage().has(KeyUsage::DIGITAL_SIGNATURE));
        assert_eq!(csr.attributes().len(), 1);
        let attr = csr.get_attribute("extensionRequest").unwrap();
        assert_eq!(attr.extensions().map(<[_]>::len), Some(2));
        assert!(csr.challenge_password().is_none());
        assert!(csr.tbs_signature_algorithm().is_none());
    }

    #[test]
    fn test_csr_label_required() {
        let err = CertificateSigningRequest::from_pem(LEAF).unwrap_err();
        assert_eq!(
            err,
            Error::EncodingError(EncodingError::InvalidPemLabel {
                expected: CSR_PEM_LABEL.into(),
                found: CERTIFICATE_PEM_LABEL.into(),
            })
        );

        let err = CertificateSigningRequest::from_pem("").unwrap_err();
        assert_eq!(
            err,
            Error::EncodingError(EncodingError::InvalidPemLabel {
                expected: CSR_PEM_LABEL.into(),
                found: String::new(),
            })
        );
    }
}
