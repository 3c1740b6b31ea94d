// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! DER layer for certificates and certification requests.
//!
//! These types mirror the ASN.1 of RFC 5280 and RFC 2986 field by field.
//! The signed portion (`tbsCertificate` / `certificationRequestInfo`) and
//! the SubjectPublicKeyInfo are kept as the exact input bytes, since
//! signature checks and key identifiers are computed over them.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{BitString, IntRef, OctetString},
    Any, Decode, DecodeValue, Encode, Header, Reader, Sequence, SliceReader, Tag, TagMode,
    TagNumber,
};
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::certificate::name::DistinguishedName;
use crate::error::{Error, Result};
use crate::time::Validity;

// ============================================================================
// Version - RFC 5280 Section 4.1.2.1
// ============================================================================

/// Certificate or request version.
///
/// ```asn1
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    /// Version 1 (value 0)
    #[default]
    V1 = 0,
    /// Version 2 (value 1)
    V2 = 1,
    /// Version 3 (value 2)
    V3 = 2,
}

impl Version {
    /// Get the integer value of the version
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Create a Version from an integer value
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            v => Err(Error::InvalidVersion(v)),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1 => write!(f, "v1"),
            Version::V2 => write!(f, "v2"),
            Version::V3 => write!(f, "v3"),
        }
    }
}

/// Collapse an INTEGER to a version byte; anything that is not a single
/// non-negative octet maps to 0xFF and is rejected by [`Version::from_value`].
fn version_byte(int: IntRef<'_>) -> u8 {
    match int.as_bytes() {
        [v] if *v < 0x80 => *v,
        _ => 0xFF,
    }
}

// ============================================================================
// Extensions - RFC 5280 Section 4.1.2.9
// ============================================================================

/// One encoded extension.
///
/// ```asn1
/// Extension  ::=  SEQUENCE  {
///     extnID      OBJECT IDENTIFIER,
///     critical    BOOLEAN DEFAULT FALSE,
///     extnValue   OCTET STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct RawExtension {
    pub extn_id: ObjectIdentifier,

    #[asn1(default = "default_false")]
    pub critical: bool,

    pub extn_value: OctetString,
}

fn default_false() -> bool {
    false
}

impl RawExtension {
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// Extensions ::= SEQUENCE SIZE (1..MAX) OF Extension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawExtensions(pub Vec<RawExtension>);

impl<'a> DecodeValue<'a> for RawExtensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let mut extensions = Vec::new();
        reader.read_nested(header.length, |seq_reader| {
            while !seq_reader.is_finished() {
                extensions.push(RawExtension::decode(seq_reader)?);
            }
            Ok(())
        })?;
        Ok(Self(extensions))
    }
}

impl der::FixedTag for RawExtensions {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Signed envelope
// ============================================================================

/// The outer `SEQUENCE { signed, signatureAlgorithm, signature }` shared by
/// certificates and certification requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSigned {
    /// The whole structure as received
    pub der: Vec<u8>,
    /// Exact DER of the signed portion
    pub tbs_der: Vec<u8>,
    pub signature_algorithm: AlgorithmIdentifier<Any>,
    pub signature: BitString,
}

impl RawSigned {
    /// Split a signed structure, rejecting trailing data.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let header = Header::decode(&mut reader)?;
        header.tag.assert_eq(Tag::Sequence)?;
        let signed = reader.read_nested(header.length, |reader| {
            // Any re-encodes to the identical TLV since DER lengths are canonical.
            let tbs_der = Any::decode(reader)?.to_der()?;
            let signature_algorithm = AlgorithmIdentifier::<Any>::decode(reader)?;
            let signature = BitString::decode(reader)?;
            Ok(Self {
                der: bytes.to_vec(),
                tbs_der,
                signature_algorithm,
                signature,
            })
        })?;
        Ok(reader.finish(signed)?)
    }
}

fn decode_spki<'a, R: Reader<'a>>(
    reader: &mut R,
) -> der::Result<(Vec<u8>, SubjectPublicKeyInfo<Any, BitString>)> {
    let spki_der = Any::decode(reader)?.to_der()?;
    let spki = SubjectPublicKeyInfo::<Any, BitString>::from_der(&spki_der)?;
    Ok((spki_der, spki))
}

// ============================================================================
// TBSCertificate - RFC 5280 Section 4.1
// ============================================================================

/// TBSCertificate as encoded.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTbsCertificate {
    /// Raw version value, validated by the model layer
    pub version: u8,
    /// Serial number magnitude, big-endian, without the sign octet
    pub serial_number: Vec<u8>,
    pub signature: AlgorithmIdentifier<Any>,
    pub issuer: DistinguishedName,
    pub validity: Validity,
    pub subject: DistinguishedName,
    /// Exact DER of the SubjectPublicKeyInfo
    pub spki_der: Vec<u8>,
    pub spki: SubjectPublicKeyInfo<Any, BitString>,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    pub extensions: Vec<RawExtension>,
}

impl<'a> DecodeValue<'a> for RawTbsCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = reader
                .context_specific::<IntRef<'a>>(TagNumber::N0, TagMode::Explicit)?
                .map(version_byte)
                .unwrap_or(0);

            let serial = IntRef::decode(reader)?;
            let serial_number = strip_sign_octet(serial.as_bytes()).to_vec();
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = DistinguishedName::decode(reader)?;
            let validity = Validity::decode(reader)?;
            let subject = DistinguishedName::decode(reader)?;
            let (spki_der, spki) = decode_spki(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions = reader
                .context_specific::<RawExtensions>(TagNumber::N3, TagMode::Explicit)?
                .map(|e| e.0)
                .unwrap_or_default();

            Ok(Self {
                version,
                serial_number,
                signature,
                issuer,
                validity,
                subject,
                spki_der,
                spki,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl der::FixedTag for RawTbsCertificate {
    const TAG: Tag = Tag::Sequence;
}

fn strip_sign_octet(bytes: &[u8]) -> &[u8] {
    match bytes {
        [0x00, rest @ ..] if !rest.is_empty() => rest,
        _ => bytes,
    }
}

/// A decoded certificate with the exact signed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCertificate {
    pub tbs_certificate: RawTbsCertificate,
    pub signed: RawSigned,
}

impl RawCertificate {
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let signed = RawSigned::from_der(bytes)?;
        let tbs_certificate = RawTbsCertificate::from_der(&signed.tbs_der)?;
        Ok(Self {
            tbs_certificate,
            signed,
        })
    }
}

// ============================================================================
// CertificationRequest - RFC 2986 Section 4
// ============================================================================

/// A request attribute: `SEQUENCE { type OID, values SET OF ANY }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequestAttribute {
    pub oid: ObjectIdentifier,
    pub values: Vec<Any>,
}

impl<'a> DecodeValue<'a> for RawRequestAttribute {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let oid = ObjectIdentifier::decode(reader)?;
            let set_header = Header::decode(reader)?;
            set_header.tag.assert_eq(Tag::Set)?;
            let mut values = Vec::new();
            reader.read_nested(set_header.length, |set| {
                while !set.is_finished() {
                    values.push(Any::decode(set)?);
                }
                Ok(())
            })?;
            Ok(Self { oid, values })
        })
    }
}

impl der::FixedTag for RawRequestAttribute {
    const TAG: Tag = Tag::Sequence;
}

/// CertificationRequestInfo as encoded.
///
/// ```asn1
/// CertificationRequestInfo ::= SEQUENCE {
///     version       INTEGER { v1(0) },
///     subject       Name,
///     subjectPKInfo SubjectPublicKeyInfo,
///     attributes    [0] IMPLICIT SET OF Attribute
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCertificationRequestInfo {
    pub version: u8,
    pub subject: DistinguishedName,
    pub spki_der: Vec<u8>,
    pub spki: SubjectPublicKeyInfo<Any, BitString>,
    pub attributes: Vec<RawRequestAttribute>,
}

impl<'a> DecodeValue<'a> for RawCertificationRequestInfo {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = version_byte(IntRef::decode(reader)?);
            let subject = DistinguishedName::decode(reader)?;
            let (spki_der, spki) = decode_spki(reader)?;

            // Some encoders omit the attributes field entirely.
            let mut attributes = Vec::new();
            if !reader.is_finished() {
                let attr_header = Header::decode(reader)?;
                if !attr_header.tag.is_context_specific()
                    || attr_header.tag.number() != TagNumber::N0
                {
                    return Err(der::ErrorKind::TagUnexpected {
                        expected: None,
                        actual: attr_header.tag,
                    }
                    .into());
                }
                reader.read_nested(attr_header.length, |set| {
                    while !set.is_finished() {
                        attributes.push(RawRequestAttribute::decode(set)?);
                    }
                    Ok(())
                })?;
            }

            Ok(Self {
                version,
                subject,
                spki_der,
                spki,
                attributes,
            })
        })
    }
}

impl der::FixedTag for RawCertificationRequestInfo {
    const TAG: Tag = Tag::Sequence;
}

/// A decoded certification request with the exact signed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCertificationRequest {
    pub info: RawCertificationRequestInfo,
    pub signed: RawSigned,
}

impl RawCertificationRequest {
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let signed = RawSigned::from_der(bytes)?;
        let info = RawCertificationRequestInfo::from_der(&signed.tbs_der)?;
        Ok(Self { info, signed })
    }
}

// ============================================================================
// Tests
// ============================================================================
