// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 Certificate Extensions.
//!
//! Each encoded extension is turned into an [`Extension`] whose
//! [`ExtensionKind`] carries the decoded payload for the extensions this
//! crate understands. The original octet string is always kept in
//! [`Extension::value`].
//!
//! # Decoded Extensions
//!
//! - Basic Constraints - Identifies whether the subject is a CA
//! - Key Usage - Defines the purpose of the key
//! - Extended Key Usage - Defines extended purposes
//! - Subject / Issuer Alternative Name - Alternative names
//! - Subject / Authority Key Identifier - Links certificates by key
//! - Authority Information Access - OCSP responder and CA issuer locations
//!
//! Any other OID is kept as [`ExtensionKind::Unknown`] with its registry
//! name, and its `critical` flag is preserved for policy layers above.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{IntRef, OctetString},
    Decode, DecodeValue, FixedTag, Header, Reader, Sequence, Tag, TagMode, TagNumber,
};

use crate::certificate::name::{GeneralName, GeneralNames};
use crate::certificate::raw::RawExtension;
use crate::error::{ExtensionError, Result};
use crate::x509::oids::{self, EXTENSIONS, KEY_PURPOSES};

// ============================================================================
// Basic Constraints - RFC 5280 Section 4.2.1.9
// ============================================================================

/// Basic Constraints extension.
///
/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct BasicConstraints {
    /// Whether the subject is a CA
    #[asn1(default = "default_false")]
    pub ca: bool,

    /// Maximum depth of valid certification paths
    #[asn1(optional = "true")]
    pub path_len_constraint: Option<u32>,
}

fn default_false() -> bool {
    false
}

impl BasicConstraints {
    /// Path length limit, or -1 when unconstrained.
    pub fn max_path_len(&self) -> i64 {
        self.path_len_constraint.map_or(-1, i64::from)
    }
}

// ============================================================================
// Key Usage - RFC 5280 Section 4.2.1.3
// ============================================================================

/// Key Usage bit flags.
///
/// ```asn1
/// KeyUsage ::= BIT STRING {
///     digitalSignature        (0),
///     nonRepudiation          (1),
///     keyEncipherment         (2),
///     dataEncipherment        (3),
///     keyAgreement            (4),
///     keyCertSign             (5),
///     cRLSign                 (6),
///     encipherOnly            (7),
///     decipherOnly            (8)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    // Named bit n of the BIT STRING is stored as 1 << n.

    /// Digital signature (bit 0)
    pub const DIGITAL_SIGNATURE: u16 = 1 << 0;
    /// Non-repudiation / content commitment (bit 1)
    pub const NON_REPUDIATION: u16 = 1 << 1;
    /// Key encipherment (bit 2)
    pub const KEY_ENCIPHERMENT: u16 = 1 << 2;
    /// Data encipherment (bit 3)
    pub const DATA_ENCIPHERMENT: u16 = 1 << 3;
    /// Key agreement (bit 4)
    pub const KEY_AGREEMENT: u16 = 1 << 4;
    /// Certificate signing (bit 5)
    pub const KEY_CERT_SIGN: u16 = 1 << 5;
    /// CRL signing (bit 6)
    pub const CRL_SIGN: u16 = 1 << 6;
    /// Encipher only (bit 7)
    pub const ENCIPHER_ONLY: u16 = 1 << 7;
    /// Decipher only (bit 8)
    pub const DECIPHER_ONLY: u16 = 1 << 8;

    /// Flag names in bit order.
    pub const NAMES: [&'static str; 9] = [
        "digitalSignature",
        "nonRepudiation",
        "keyEncipherment",
        "dataEncipherment",
        "keyAgreement",
        "keyCertSign",
        "cRLSign",
        "encipherOnly",
        "decipherOnly",
    ];

    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Check if a specific usage is enabled
    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) != 0
    }

    /// Look up a flag by its RFC 5280 name.
    pub fn flag(&self, name: &str) -> Option<bool> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|bit| self.has(1 << bit))
    }

    /// Parse from DER-encoded BIT STRING.
    ///
    /// Bit 0 is the most significant bit of the first content octet.
    pub fn from_der(bytes: &[u8]) -> core::result::Result<Self, der::Error> {
        let bit_string = der::asn1::BitString::from_der(bytes)?;
        let raw = bit_string.raw_bytes();
        let mut bits = 0u16;
        for bit in 0..Self::NAMES.len() {
            let set = raw
                .get(bit / 8)
                .map_or(false, |byte| byte & (0x80 >> (bit % 8)) != 0);
            if set {
                bits |= 1 << bit;
            }
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usages: Vec<&str> = Self::NAMES
            .iter()
            .enumerate()
            .filter(|(bit, _)| self.has(1 << bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", usages.join(", "))
    }
}

// ============================================================================
// Extended Key Usage - RFC 5280 Section 4.2.1.12
// ============================================================================

/// Extended Key Usage extension.
///
/// ```asn1
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// KeyPurposeId ::= OBJECT IDENTIFIER
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    /// List of key purpose OIDs
    pub key_purposes: Vec<ObjectIdentifier>,
}

// Manual Decode implementation for SEQUENCE OF
impl<'a> DecodeValue<'a> for ExtendedKeyUsage {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut key_purposes = Vec::new();
            while !reader.is_finished() {
                key_purposes.push(ObjectIdentifier::decode(reader)?);
            }
            Ok(Self { key_purposes })
        })
    }
}

impl FixedTag for ExtendedKeyUsage {
    const TAG: Tag = Tag::Sequence;
}

impl ExtendedKeyUsage {
    /// Check if a specific purpose is present
    pub fn has_purpose(&self, oid: &ObjectIdentifier) -> bool {
        self.key_purposes.iter().any(|p| p == oid)
    }

    /// Check a purpose by registry name, e.g. `serverAuth`.
    ///
    /// Returns `None` when the name is not a known purpose.
    pub fn flag(&self, name: &str) -> Option<bool> {
        let oid = KEY_PURPOSES.lookup_name(name)?;
        Some(self.has_purpose(&oid))
    }

    pub fn is_server_auth(&self) -> bool {
        self.has_purpose(&oids::extended_key_usage_oids::SERVER_AUTH)
    }

    pub fn is_client_auth(&self) -> bool {
        self.has_purpose(&oids::extended_key_usage_oids::CLIENT_AUTH)
    }

    pub fn is_code_signing(&self) -> bool {
        self.has_purpose(&oids::extended_key_usage_oids::CODE_SIGNING)
    }
}

// ============================================================================
// Key identifiers - RFC 5280 Sections 4.2.1.1 and 4.2.1.2
// ============================================================================

/// AuthorityKeyIdentifier extension.
///
/// ```asn1
/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] KeyIdentifier           OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames            OPTIONAL,
///     authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Option<Vec<u8>>,
    pub authority_cert_issuer: Option<GeneralNames>,
    pub authority_cert_serial_number: Option<Vec<u8>>,
}

impl<'a> DecodeValue<'a> for AuthorityKeyIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let key_identifier = reader
                .context_specific::<OctetString>(TagNumber::N0, TagMode::Implicit)?
                .map(|id| id.as_bytes().to_vec());
            let authority_cert_issuer =
                reader.context_specific::<GeneralNames>(TagNumber::N1, TagMode::Implicit)?;
            let authority_cert_serial_number = reader
                .context_specific::<IntRef<'a>>(TagNumber::N2, TagMode::Implicit)?
                .map(|serial| serial.as_bytes().to_vec());
            Ok(Self {
                key_identifier,
                authority_cert_issuer,
                authority_cert_serial_number,
            })
        })
    }
}

impl FixedTag for AuthorityKeyIdentifier {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Authority Information Access - RFC 5280 Section 4.2.2.1
// ============================================================================

/// ```asn1
/// AccessDescription ::= SEQUENCE {
///     accessMethod    OBJECT IDENTIFIER,
///     accessLocation  GeneralName
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifier,
    pub access_location: GeneralName,
}

impl<'a> DecodeValue<'a> for AccessDescription {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let access_method = ObjectIdentifier::decode(reader)?;
            let location_header = Header::decode(reader)?;
            let access_location = GeneralName::decode_value(reader, location_header)?;
            Ok(Self {
                access_method,
                access_location,
            })
        })
    }
}

impl FixedTag for AccessDescription {
    const TAG: Tag = Tag::Sequence;
}

/// AuthorityInfoAccessSyntax ::= SEQUENCE SIZE (1..MAX) OF AccessDescription
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityInfoAccess {
    pub descriptions: Vec<AccessDescription>,
}

impl<'a> DecodeValue<'a> for AuthorityInfoAccess {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut descriptions = Vec::new();
            while !reader.is_finished() {
                descriptions.push(AccessDescription::decode(reader)?);
            }
            Ok(Self { descriptions })
        })
    }
}

impl FixedTag for AuthorityInfoAccess {
    const TAG: Tag = Tag::Sequence;
}

impl AuthorityInfoAccess {
    fn first_uri(&self, method: ObjectIdentifier) -> Option<&str> {
        self.descriptions
            .iter()
            .filter(|d| d.access_method == method)
            .find_map(|d| match &d.access_location {
                GeneralName::Uri(uri) => Some(uri.as_str()),
                _ => None,
            })
    }

    /// First OCSP responder URI.
    pub fn ocsp(&self) -> Option<&str> {
        self.first_uri(oids::AD_OCSP)
    }

    /// First CA issuers URI.
    pub fn ca_issuers(&self) -> Option<&str> {
        self.first_uri(oids::AD_CA_ISSUERS)
    }
}

// ============================================================================
// Extension
// ============================================================================

/// Decoded payload of an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionKind {
    BasicConstraints(BasicConstraints),
    KeyUsage(KeyUsage),
    ExtendedKeyUsage(ExtendedKeyUsage),
    SubjectAltName(GeneralNames),
    IssuerAltName(GeneralNames),
    SubjectKeyIdentifier(Vec<u8>),
    AuthorityKeyIdentifier(AuthorityKeyIdentifier),
    AuthorityInfoAccess(AuthorityInfoAccess),
    /// Not decoded; the payload stays in [`Extension::value`].
    Unknown,
}

/// A sub-field read off a decoded extension by [`Extension::field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Bool(b) => serde_json::Value::from(*b),
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Str(s) => serde_json::Value::from(s.as_str()),
            FieldValue::List(items) => serde_json::Value::from(items.clone()),
        }
    }
}

/// Extension represents a single X.509 v3 extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension OID
    pub oid: ObjectIdentifier,
    /// Whether this extension is critical
    pub critical: bool,
    /// The extnValue octets exactly as encoded
    pub value: Vec<u8>,
    /// Registry short name, empty for unregistered OIDs
    pub name: &'static str,
    pub kind: ExtensionKind,
}

fn invalid(make: fn(String) -> ExtensionError) -> impl FnOnce(der::Error) -> ExtensionError {
    move |e| make(e.to_string())
}

impl Extension {
    /// Decode one extension. A recognised extension whose payload does not
    /// decode is an error; unrecognised ones are kept undecoded.
    pub fn decode(raw: &RawExtension) -> core::result::Result<Self, ExtensionError> {
        let value = raw.value();
        let kind = match raw.extn_id {
            oids::BASIC_CONSTRAINTS => ExtensionKind::BasicConstraints(
                BasicConstraints::from_der(value)
                    .map_err(invalid(ExtensionError::BasicConstraints))?,
            ),
            oids::KEY_USAGE => ExtensionKind::KeyUsage(
                KeyUsage::from_der(value).map_err(invalid(ExtensionError::KeyUsage))?,
            ),
            oids::EXTENDED_KEY_USAGE => ExtensionKind::ExtendedKeyUsage(
                ExtendedKeyUsage::from_der(value)
                    .map_err(invalid(ExtensionError::ExtendedKeyUsage))?,
            ),
            oids::SUBJECT_ALT_NAME => ExtensionKind::SubjectAltName(
                GeneralNames::from_der(value).map_err(invalid(ExtensionError::AltName))?,
            ),
            oids::ISSUER_ALT_NAME => ExtensionKind::IssuerAltName(
                GeneralNames::from_der(value).map_err(invalid(ExtensionError::AltName))?,
            ),
            oids::SUBJECT_KEY_IDENTIFIER => ExtensionKind::SubjectKeyIdentifier(
                OctetString::from_der(value)
                    .map_err(invalid(ExtensionError::KeyIdentifier))?
                    .as_bytes()
                    .to_vec(),
            ),
            oids::AUTHORITY_KEY_IDENTIFIER => ExtensionKind::AuthorityKeyIdentifier(
                AuthorityKeyIdentifier::from_der(value)
                    .map_err(invalid(ExtensionError::KeyIdentifier))?,
            ),
            oids::AUTHORITY_INFO_ACCESS => ExtensionKind::AuthorityInfoAccess(
                AuthorityInfoAccess::from_der(value)
                    .map_err(invalid(ExtensionError::AuthorityInfoAccess))?,
            ),
            _ => ExtensionKind::Unknown,
        };
        log::trace!("decoded extension {} ({})", raw.extn_id, raw.critical);

        Ok(Self {
            oid: raw.extn_id,
            critical: raw.critical,
            value: value.to_vec(),
            name: EXTENSIONS.short_name(&raw.extn_id),
            kind,
        })
    }

    /// Whether `key` names this extension by short name, long name or OID.
    pub fn matches(&self, key: &str) -> bool {
        EXTENSIONS.resolve(key).map_or(false, |oid| oid == self.oid)
    }

    /// Read a named sub-field of the decoded payload.
    ///
    /// `critical`, `id` and `name` are available on every extension. The
    /// remaining keys depend on the kind, e.g. `keyCertSign` on keyUsage,
    /// `cA` / `pathLenConstraint` on basicConstraints, `serverAuth` on
    /// extKeyUsage, `altNames` on alternative names.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "critical" => return Some(FieldValue::Bool(self.critical)),
            "id" => return Some(FieldValue::Str(self.oid.to_string())),
            "name" => return Some(FieldValue::Str(self.name.to_string())),
            _ => {}
        }

        match &self.kind {
            ExtensionKind::BasicConstraints(bc) => match key {
                "cA" | "isCA" => Some(FieldValue::Bool(bc.ca)),
                "pathLenConstraint" => bc
                    .path_len_constraint
                    .map(|len| FieldValue::Int(i64::from(len))),
                "maxPathLen" => Some(FieldValue::Int(bc.max_path_len())),
                _ => None,
            },
            ExtensionKind::KeyUsage(ku) => ku.flag(key).map(FieldValue::Bool),
            ExtensionKind::ExtendedKeyUsage(eku) => match key {
                "purposes" => Some(FieldValue::List(
                    eku.key_purposes.iter().map(|p| p.to_string()).collect(),
                )),
                _ => eku.flag(key).map(FieldValue::Bool),
            },
            ExtensionKind::SubjectAltName(names) | ExtensionKind::IssuerAltName(names) => {
                match key {
                    "altNames" => Some(FieldValue::List(
                        names.names.iter().map(|n| n.to_string()).collect(),
                    )),
                    _ => None,
                }
            }
            ExtensionKind::SubjectKeyIdentifier(id) => match key {
                "subjectKeyIdentifier" => Some(FieldValue::Str(hex::encode(id))),
                _ => None,
            },
            ExtensionKind::AuthorityKeyIdentifier(aki) => match key {
                "keyIdentifier" => aki
                    .key_identifier
                    .as_ref()
                    .map(|id| FieldValue::Str(hex::encode(id))),
                "authorityCertIssuer" => aki.authority_cert_issuer.as_ref().map(|names| {
                    FieldValue::List(names.names.iter().map(|n| n.to_string()).collect())
                }),
                "serialNumber" => aki
                    .authority_cert_serial_number
                    .as_ref()
                    .map(|serial| FieldValue::Str(hex::encode(serial))),
                _ => None,
            },
            ExtensionKind::AuthorityInfoAccess(aia) => match key {
                "ocsp" => aia.ocsp().map(|uri| FieldValue::Str(uri.to_string())),
                "caIssuers" => aia.ca_issuers().map(|uri| FieldValue::Str(uri.to_string())),
                _ => None,
            },
            ExtensionKind::Unknown => None,
        }
    }

    fn kind_fields(&self) -> &'static [&'static str] {
        match &self.kind {
            ExtensionKind::BasicConstraints(_) => &["cA", "pathLenConstraint", "maxPathLen"],
            ExtensionKind::KeyUsage(_) => &KeyUsage::NAMES,
            ExtensionKind::ExtendedKeyUsage(_) => &[
                "purposes",
                "serverAuth",
                "clientAuth",
                "codeSigning",
                "emailProtection",
                "timeStamping",
                "OCSPSigning",
            ],
            ExtensionKind::SubjectAltName(_) | ExtensionKind::IssuerAltName(_) => &["altNames"],
            ExtensionKind::SubjectKeyIdentifier(_) => &["subjectKeyIdentifier"],
            ExtensionKind::AuthorityKeyIdentifier(_) => {
                &["keyIdentifier", "authorityCertIssuer", "serialNumber"]
            }
            ExtensionKind::AuthorityInfoAccess(_) => &["ocsp", "caIssuers"],
            ExtensionKind::Unknown => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("id".into(), self.oid.to_string().into());
        map.insert("name".into(), self.name.into());
        map.insert("critical".into(), self.critical.into());
        map.insert("value".into(), hex::encode(&self.value).into());
        for key in self.kind_fields() {
            if let Some(field) = self.field(key) {
                map.insert((*key).into(), field.to_json());
            }
        }
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = EXTENSIONS.long_name(&self.oid);
        if name.is_empty() {
            write!(f, "{}", self.oid)?;
        } else {
            write!(f, "{}", name)?;
        }
        if self.critical {
            write!(f, " (critical)")?;
        }
        Ok(())
    }
}

/// Decode an extension list, rejecting repeated OIDs.
pub fn decode_extensions(raw: &[RawExtension]) -> Result<Vec<Extension>> {
    let mut seen = BTreeSet::new();
    let mut extensions = Vec::with_capacity(raw.len());
    for ext in raw {
        if !seen.insert(ext.extn_id) {
            return Err(ExtensionError::DuplicateExtension(ext.extn_id.to_string()).into());
        }
        extensions.push(Extension::decode(ext)?);
    }
    Ok(extensions)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn raw(oid: ObjectIdentifier, critical: bool, value: &[u8]) -> RawExtension {
        RawExtension {
            extn_id: oid,
            critical,
            extn_value: OctetString::new(value.to_vec()).unwrap(),
        }
    }

    #[test]
    fn test_basic_constraints() {
        // SEQUENCE { BOOLEAN TRUE, INTEGER 2 }
        let ext = Extension::decode(&raw(
            oids::BASIC_CONSTRAINTS,
            true,
            &[0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x02],
        ))
        .unwrap();
        assert_eq!(ext.name, "basicConstraints");
        assert_eq!(ext.field("cA"), Some(FieldValue::Bool(true)));
        assert_eq!(ext.field("maxPathLen"), Some(FieldValue::Int(2)));

        // Empty SEQUENCE: end entity, no path length
        let ext = Extension::decode(&raw(oids::BASIC_CONSTRAINTS, false, &[0x30, 0x00])).unwrap();
        match &ext.kind {
            ExtensionKind::BasicConstraints(bc) => {
                assert!(!bc.ca);
                assert_eq!(bc.max_path_len(), -1);
            }
            other => panic!("unexpected kind {:?}", other),
        }
        assert_eq!(ext.field("pathLenConstraint"), None);
    }

    #[test]
    fn test_key_usage_bit_order() {
        // BIT STRING, 1 unused bit, keyCertSign | cRLSign = 0000 0110
        let ku = KeyUsage::from_der(&[0x03, 0x02, 0x01, 0x06]).unwrap();
        assert!(ku.has(KeyUsage::KEY_CERT_SIGN));
        assert!(ku.has(KeyUsage::CRL_SIGN));
        assert!(!ku.has(KeyUsage::DIGITAL_SIGNATURE));
        assert_eq!(ku.bits(), (1 << 5) | (1 << 6));
        assert_eq!(ku.flag("keyCertSign"), Some(true));
        assert_eq!(ku.flag("keyAgreement"), Some(false));
        assert_eq!(ku.flag("bogus"), None);
        assert_eq!(ku.to_string(), "keyCertSign, cRLSign");

        // decipherOnly lives in the second octet
        let ku = KeyUsage::from_der(&[0x03, 0x03, 0x07, 0x80, 0x80]).unwrap();
        assert!(ku.has(KeyUsage::DIGITAL_SIGNATURE));
        assert!(ku.has(KeyUsage::DECIPHER_ONLY));
    }

    #[test]
    fn test_extended_key_usage() {
        let eku = ExtendedKeyUsage {
            key_purposes: vec![
                oids::extended_key_usage_oids::SERVER_AUTH,
                oids::extended_key_usage_oids::CLIENT_AUTH,
            ],
        };

        assert!(eku.is_server_auth());
        assert!(eku.is_client_auth());
        assert!(!eku.is_code_signing());
        assert_eq!(eku.flag("serverAuth"), Some(true));
        assert_eq!(eku.flag("timeStamping"), Some(false));
        assert_eq!(eku.flag("notAPurpose"), None);
    }

    #[test]
    fn test_subject_key_identifier() {
        let ext = Extension::decode(&raw(
            oids::SUBJECT_KEY_IDENTIFIER,
            false,
            &[0x04, 0x03, 0xab, 0xcd, 0xef],
        ))
        .unwrap();
        assert_eq!(
            ext.field("subjectKeyIdentifier"),
            Some(FieldValue::Str("abcdef".into()))
        );
    }

    #[test]
    fn test_authority_key_identifier() {
        // SEQUENCE { [0] 01 02 }
        let ext = Extension::decode(&raw(
            oids::AUTHORITY_KEY_IDENTIFIER,
            false,
            &[0x30, 0x04, 0x80, 0x02, 0x01, 0x02],
        ))
        .unwrap();
        assert_eq!(ext.field("keyIdentifier"), Some(FieldValue::Str("0102".into())));
        assert_eq!(ext.field("serialNumber"), None);
    }

    #[test]
    fn test_authority_info_access_first_wins() {
        // SEQUENCE {
        //   SEQUENCE { ocsp, [6] "http://a" }
        //   SEQUENCE { ocsp, [6] "http://b" }
        // }
        let der = [
            0x30, 0x26, 0x30, 0x11, 0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01,
            0x86, 0x05, b'h', b't', b't', b'p', b'a', 0x30, 0x11, 0x06, 0x08, 0x2b, 0x06, 0x01,
            0x05, 0x05, 0x07, 0x30, 0x01, 0x86, 0x05, b'h', b't', b't', b'p', b'b',
        ];
        let ext = Extension::decode(&raw(oids::AUTHORITY_INFO_ACCESS, false, &der)).unwrap();
        assert_eq!(ext.field("ocsp"), Some(FieldValue::Str("httpa".into())));
        assert_eq!(ext.field("caIssuers"), None);
    }

    #[test]
    fn test_unknown_extension_kept() {
        let oid = ObjectIdentifier::new_unwrap("1.2.3.4.5");
        let ext = Extension::decode(&raw(oid, true, &[0xde, 0xad])).unwrap();
        assert_eq!(ext.kind, ExtensionKind::Unknown);
        assert_eq!(ext.name, "");
        assert!(ext.critical);
        assert_eq!(ext.value, [0xde, 0xad]);
        assert_eq!(ext.field("critical"), Some(FieldValue::Bool(true)));
        assert_eq!(ext.field("anything"), None);
    }

    #[test]
    fn test_registered_but_undecoded_extension_named() {
        let oid = ObjectIdentifier::new_unwrap("2.5.29.32");
        let ext = Extension::decode(&raw(oid, false, &[0x30, 0x00])).unwrap();
        assert_eq!(ext.kind, ExtensionKind::Unknown);
        assert_eq!(ext.name, "certificatePolicies");
        assert!(ext.matches("certificatePolicies"));
        assert!(ext.matches("2.5.29.32"));
    }

    #[test]
    fn test_malformed_known_extension_fails() {
        let err = Extension::decode(&raw(oids::KEY_USAGE, true, &[0x04, 0x01, 0x00])).unwrap_err();
        assert!(matches!(err, ExtensionError::KeyUsage(_)));
    }

    #[test]
    fn test_duplicate_extensions_rejected() {
        let exts = [
            raw(oids::KEY_USAGE, true, &[0x03, 0x02, 0x07, 0x80]),
            raw(oids::KEY_USAGE, true, &[0x03, 0x02, 0x07, 0x80]),
        ];
        assert!(decode_extensions(&exts).is_err());
        assert_eq!(decode_extensions(&exts[..1]).unwrap().len(), 1);
    }

    #[test]
    fn test_extension_json() {
        let ext = Extension::decode(&raw(oids::KEY_USAGE, true, &[0x03, 0x02, 0x07, 0x80])).unwrap();
        let json = ext.to_json();
        assert_eq!(json["name"], "keyUsage");
        assert_eq!(json["digitalSignature"], true);
        assert_eq!(json["keyCertSign"], false);
        assert_eq!(json["value"], "03020780");
    }
}
