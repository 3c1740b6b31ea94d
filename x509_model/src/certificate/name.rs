// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Name (DN) and GeneralName support.
//!
//! A [`DistinguishedName`] is the flattened, order-preserving list of the
//! attributes found in an RDNSequence. Every [`Attribute`] keeps its value as
//! an encoded [`Any`], so the source string type (PrintableString,
//! UTF8String, ...) survives re-encoding for [`DistinguishedName::get_hash`].

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::net::{Ipv4Addr, Ipv6Addr};

use const_oid::ObjectIdentifier;
use der::{
    asn1::{
        BitString, BmpString, Ia5StringRef, PrintableStringRef, SetOfVec, TeletexStringRef,
        Utf8StringRef,
    },
    Any, Decode, DecodeValue, Encode, ErrorKind, FixedTag, Header, Length, Reader, Sequence, Tag,
    TagNumber, Tagged, ValueOrd,
};
use ring::digest;

use crate::error::{Error, NameError, Result};
use crate::x509::extensions::Extension;
use crate::x509::oids::{self, ATTRIBUTE_TYPES};

// Encoding of an RDNSequence with no RDNs.
const EMPTY_NAME_DER: [u8; 2] = [0x30, 0x00];

fn invalid_attribute(msg: String) -> Error {
    Error::NameError(NameError::InvalidAttribute(msg))
}

/// Text of a naming attribute value.
///
/// String types are checked against their character set. Any other value is
/// rendered as `#` followed by the hex of its DER encoding.
fn value_text(value: &Any) -> der::Result<String> {
    let bytes = value.value();
    let text = match value.tag() {
        Tag::Utf8String => Utf8StringRef::new(bytes)?.to_string(),
        Tag::PrintableString => PrintableStringRef::new(bytes)?.to_string(),
        // VisibleString and NumericString are subsets of IA5.
        Tag::Ia5String | Tag::VisibleString | Tag::NumericString => {
            Ia5StringRef::new(bytes)?.to_string()
        }
        Tag::TeletexString => TeletexStringRef::new(bytes)?.to_string(),
        Tag::BmpString => BmpString::from_ucs2(bytes)?.to_string(),
        _ => format!("#{}", hex::encode(value.to_der()?)),
    };
    Ok(text)
}

fn encode_text(value: &str, tag: Tag) -> der::Result<Any> {
    match tag {
        Tag::Utf8String => Any::encode_from(&Utf8StringRef::new(value)?),
        Tag::PrintableString => Any::encode_from(&PrintableStringRef::new(value)?),
        Tag::Ia5String => Any::encode_from(&Ia5StringRef::new(value)?),
        Tag::TeletexString => Any::encode_from(&TeletexStringRef::new(value)?),
        Tag::BmpString => Any::encode_from(&BmpString::from_utf8(value)?),
        other => Err(other.value_error()),
    }
}

// ============================================================================
// Attribute
// ============================================================================

/// One naming attribute (or one CSR request attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    oid: ObjectIdentifier,
    encoded: Any,
    text: String,
    name: &'static str,
    short_name: &'static str,
    extensions: Option<Vec<Extension>>,
}

impl Attribute {
    /// Build an attribute from its type and encoded value.
    pub fn from_any(oid: ObjectIdentifier, value: Any) -> Result<Self> {
        Self::from_parts(oid, value)
            .map_err(|e| invalid_attribute(format!("malformed value for {} ({})", oid, e)))
    }

    fn from_parts(oid: ObjectIdentifier, encoded: Any) -> der::Result<Self> {
        let text = value_text(&encoded)?;
        Ok(Self {
            oid,
            encoded,
            text,
            name: ATTRIBUTE_TYPES.long_name(&oid),
            short_name: ATTRIBUTE_TYPES.short_name(&oid),
            extensions: None,
        })
    }

    /// Build an attribute by short name, long name or dotted OID.
    ///
    /// The value is encoded with the string type conventionally used for the
    /// attribute: PrintableString for country and serial number, IA5String
    /// for email and domain component, UTF8String otherwise.
    pub fn new(key: &str, value: &str) -> Result<Self> {
        let oid = ATTRIBUTE_TYPES
            .resolve(key)
            .ok_or_else(|| invalid_attribute(format!("unknown attribute type: {}", key)))?;
        let tag = match oid {
            oids::COUNTRY_NAME | oids::SERIAL_NUMBER if PrintableStringRef::new(value).is_ok() => {
                Tag::PrintableString
            }
            oids::EMAIL_ADDRESS | oids::DOMAIN_COMPONENT if value.is_ascii() => Tag::Ia5String,
            _ => Tag::Utf8String,
        };
        Self::with_tag(oid, value, tag)
    }

    /// Build an attribute whose value is encoded with an explicit string type.
    pub fn with_tag(oid: ObjectIdentifier, value: &str, tag: Tag) -> Result<Self> {
        let encoded = encode_text(value, tag).map_err(|e| {
            invalid_attribute(format!("{:?} cannot be encoded as {} ({})", value, tag, e))
        })?;
        Ok(Self {
            oid,
            encoded,
            text: value.to_string(),
            name: ATTRIBUTE_TYPES.long_name(&oid),
            short_name: ATTRIBUTE_TYPES.short_name(&oid),
            extensions: None,
        })
    }

    /// Attribute type
    pub fn oid(&self) -> ObjectIdentifier {
        self.oid
    }

    /// Decoded text, or `#` followed by the hex TLV for non-string values
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Universal tag of the encoded value
    pub fn value_tag(&self) -> Tag {
        self.encoded.tag()
    }

    /// The value exactly as encoded.
    pub fn encoded_value(&self) -> &Any {
        &self.encoded
    }

    /// Long name (`commonName`), empty for unregistered types
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Short name (`CN`), empty for unregistered types
    pub fn short_name(&self) -> &'static str {
        self.short_name
    }

    /// Extensions carried by a CSR `extensionRequest` attribute
    pub fn extensions(&self) -> Option<&[Extension]> {
        self.extensions.as_deref()
    }

    pub(crate) fn set_extensions(&mut self, extensions: Vec<Extension>) {
        self.extensions = Some(extensions);
    }

    /// Whether `key` names this attribute by short name, long name or OID.
    pub fn matches(&self, key: &str) -> bool {
        (!self.short_name.is_empty() && self.short_name == key)
            || (!self.name.is_empty() && self.name == key)
            || ObjectIdentifier::new(key).map_or(false, |oid| oid == self.oid)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.oid.to_string(),
            "name": self.name,
            "shortName": self.short_name,
            "value": self.text,
            "valueTag": u8::from(self.value_tag()),
        })
    }

    fn to_atv(&self) -> AttributeTypeAndValue {
        AttributeTypeAndValue {
            oid: self.oid,
            value: self.encoded.clone(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.short_name.is_empty() {
            write!(f, "{}={}", self.oid, self.text)
        } else {
            write!(f, "{}={}", self.short_name, self.text)
        }
    }
}

// ============================================================================
// AttributeTypeAndValue - RFC 5280 Section 4.1.2.4
// ============================================================================

/// ```asn1
/// AttributeTypeAndValue ::= SEQUENCE {
///     type     AttributeType,
///     value    AttributeValue
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence, ValueOrd)]
struct AttributeTypeAndValue {
    oid: ObjectIdentifier,
    value: Any,
}

type RdnSequence = Vec<SetOfVec<AttributeTypeAndValue>>;

// ============================================================================
// DistinguishedName
// ============================================================================

/// Ordered attribute list of a subject or issuer name.
///
/// Attribute order is the encoding order; lookups return the first match.
/// Within a multi-valued RDN the order is the DER SET OF order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    attributes: Vec<Attribute>,
    // Number of attributes in each RDN, in order.
    rdn_lengths: Vec<usize>,
    // RDNSequence encoding of `attributes`, kept in step by every mutator.
    der: Vec<u8>,
    unique_id: Option<BitString>,
}

impl Default for DistinguishedName {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            rdn_lengths: Vec::new(),
            der: EMPTY_NAME_DER.to_vec(),
            unique_id: None,
        }
    }
}

fn encode_rdns(attributes: &[Attribute], rdn_lengths: &[usize]) -> der::Result<Vec<u8>> {
    let mut rdns = RdnSequence::with_capacity(rdn_lengths.len());
    let mut start = 0;
    for len in rdn_lengths {
        let atvs: Vec<AttributeTypeAndValue> = attributes[start..start + len]
            .iter()
            .map(Attribute::to_atv)
            .collect();
        rdns.push(SetOfVec::try_from(atvs)?);
        start += len;
    }
    rdns.to_der()
}

impl DistinguishedName {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes in encoding order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Issuer or subject unique identifier, when the certificate carries one
    pub fn unique_id(&self) -> Option<&BitString> {
        self.unique_id.as_ref()
    }

    pub(crate) fn set_unique_id(&mut self, unique_id: Option<BitString>) {
        self.unique_id = unique_id;
    }

    /// Look up an attribute by short name, long name or dotted OID.
    pub fn get_field(&self, key: &str) -> Option<&Attribute> {
        if let Some(oid) = ATTRIBUTE_TYPES.resolve(key) {
            return self.attributes.iter().find(|a| a.oid == oid);
        }
        self.attributes.iter().find(|a| a.matches(key))
    }

    /// Append an attribute as its own RDN.
    pub fn add_field(&mut self, attr: Attribute) -> Result<()> {
        self.attributes.push(attr);
        self.rdn_lengths.push(1);
        match encode_rdns(&self.attributes, &self.rdn_lengths) {
            Ok(der) => {
                self.der = der;
                Ok(())
            }
            Err(e) => {
                self.attributes.pop();
                self.rdn_lengths.pop();
                Err(e.into())
            }
        }
    }

    /// Replace all attributes, one RDN per attribute.
    pub fn set_attrs(&mut self, attrs: Vec<Attribute>) -> Result<()> {
        let rdn_lengths = alloc::vec![1; attrs.len()];
        self.der = encode_rdns(&attrs, &rdn_lengths)?;
        self.attributes = attrs;
        self.rdn_lengths = rdn_lengths;
        Ok(())
    }

    /// The RDNs of this name as slices of [`Self::attributes`].
    pub fn rdns(&self) -> impl Iterator<Item = &[Attribute]> {
        let mut start = 0;
        self.rdn_lengths.iter().map(move |len| {
            let rdn = &self.attributes[start..start + len];
            start += len;
            rdn
        })
    }

    /// DER encoding of the RDNSequence, reusing each value's original encoding.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// Hex SHA-256 of [`Self::to_der`].
    ///
    /// Equal for names with the same attribute sequence, values and string
    /// types. The string type is part of the hash: `CN=Test` as
    /// PrintableString and as UTF8String hash differently. Reordering
    /// attributes changes the hash.
    pub fn get_hash(&self) -> String {
        hex::encode(digest::digest(&digest::SHA256, &self.der))
    }

    fn field_or_empty(&self, oid: ObjectIdentifier) -> String {
        self.attributes
            .iter()
            .find(|a| a.oid == oid)
            .map(|a| a.text.clone())
            .unwrap_or_default()
    }

    pub fn common_name(&self) -> String {
        self.field_or_empty(oids::CN)
    }

    pub fn organization_name(&self) -> String {
        self.field_or_empty(oids::ORGANIZATION_NAME)
    }

    pub fn organizational_unit_name(&self) -> String {
        self.field_or_empty(oids::ORGANIZATIONAL_UNIT_NAME)
    }

    pub fn country_name(&self) -> String {
        self.field_or_empty(oids::COUNTRY_NAME)
    }

    pub fn locality_name(&self) -> String {
        self.field_or_empty(oids::LOCALITY_NAME)
    }

    pub fn serial_name(&self) -> String {
        self.field_or_empty(oids::SERIAL_NUMBER)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let attributes: Vec<serde_json::Value> =
            self.attributes.iter().map(Attribute::to_json).collect();
        serde_json::json!({
            "attributes": attributes,
            "hash": self.get_hash(),
            "uniqueId": self.unique_id.as_ref().map(|id| hex::encode(id.raw_bytes())),
        })
    }
}

impl<'a> DecodeValue<'a> for DistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let rdns = RdnSequence::decode_value(reader, header)?;
        let mut dn = DistinguishedName {
            der: rdns.to_der()?,
            ..Default::default()
        };
        for rdn in rdns {
            if rdn.is_empty() {
                return Err(Tag::Set.length_error());
            }
            dn.rdn_lengths.push(rdn.len());
            for atv in rdn.into_vec() {
                dn.attributes.push(Attribute::from_parts(atv.oid, atv.value)?);
            }
        }
        Ok(dn)
    }
}

impl FixedTag for DistinguishedName {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attrs: Vec<String> = self.attributes.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", attrs.join(", "))
    }
}

// ============================================================================
// GeneralName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// GeneralName as used by alternative-name and key-identifier extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// otherName `[0]`
    OtherName(Vec<u8>),
    /// rfc822Name `[1]` - Email address
    Rfc822Name(String),
    /// dNSName `[2]` - DNS hostname
    DnsName(String),
    /// x400Address `[3]`
    X400Address(Vec<u8>),
    /// directoryName `[4]` - Distinguished Name
    DirectoryName(DistinguishedName),
    /// ediPartyName `[5]`
    EdiPartyName(Vec<u8>),
    /// uniformResourceIdentifier `[6]` - URI
    Uri(String),
    /// iPAddress `[7]` - IPv4 or IPv6 address
    IpAddress(Vec<u8>),
    /// registeredID `[8]` - OID
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    /// Textual form of an iPAddress (4 bytes for IPv4, 16 bytes for IPv6).
    pub fn ip_address_string(&self) -> Option<String> {
        match self {
            GeneralName::IpAddress(bytes) => {
                if let Ok(v4) = <[u8; 4]>::try_from(bytes.as_slice()) {
                    Some(Ipv4Addr::from(v4).to_string())
                } else if let Ok(v6) = <[u8; 16]>::try_from(bytes.as_slice()) {
                    Some(Ipv6Addr::from(v6).to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Name of the CHOICE alternative.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneralName::OtherName(_) => "otherName",
            GeneralName::Rfc822Name(_) => "rfc822Name",
            GeneralName::DnsName(_) => "dNSName",
            GeneralName::X400Address(_) => "x400Address",
            GeneralName::DirectoryName(_) => "directoryName",
            GeneralName::EdiPartyName(_) => "ediPartyName",
            GeneralName::Uri(_) => "uniformResourceIdentifier",
            GeneralName::IpAddress(_) => "iPAddress",
            GeneralName::RegisteredId(_) => "registeredID",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                serde_json::Value::from(s.as_str())
            }
            GeneralName::IpAddress(bytes) => match self.ip_address_string() {
                Some(ip) => serde_json::Value::from(ip),
                None => serde_json::Value::from(hex::encode(bytes)),
            },
            GeneralName::DirectoryName(dn) => dn.to_json(),
            GeneralName::RegisteredId(oid) => serde_json::Value::from(oid.to_string()),
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::EdiPartyName(bytes) => serde_json::Value::from(hex::encode(bytes)),
        };
        serde_json::json!({ "type": self.kind(), "value": value })
    }
}

fn ia5_text(bytes: Vec<u8>, tag: Tag) -> der::Result<String> {
    Ia5StringRef::new(&bytes)
        .map(|s| s.to_string())
        .map_err(|_| ErrorKind::Value { tag }.into())
}

impl<'a> DecodeValue<'a> for GeneralName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let tag = header.tag;

        if !tag.is_context_specific() {
            return Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into());
        }

        match tag.number() {
            TagNumber::N0 => Ok(GeneralName::OtherName(reader.read_vec(header.length)?)),
            TagNumber::N1 => Ok(GeneralName::Rfc822Name(ia5_text(
                reader.read_vec(header.length)?,
                tag,
            )?)),
            TagNumber::N2 => Ok(GeneralName::DnsName(ia5_text(
                reader.read_vec(header.length)?,
                tag,
            )?)),
            TagNumber::N3 => Ok(GeneralName::X400Address(reader.read_vec(header.length)?)),
            TagNumber::N4 => {
                // EXPLICIT [4] Name
                let name = reader.read_nested(header.length, DistinguishedName::decode)?;
                Ok(GeneralName::DirectoryName(name))
            }
            TagNumber::N5 => Ok(GeneralName::EdiPartyName(reader.read_vec(header.length)?)),
            TagNumber::N6 => Ok(GeneralName::Uri(ia5_text(
                reader.read_vec(header.length)?,
                tag,
            )?)),
            TagNumber::N7 => Ok(GeneralName::IpAddress(reader.read_vec(header.length)?)),
            TagNumber::N8 => {
                // IMPLICIT [8] OBJECT IDENTIFIER
                let bytes = reader.read_vec(header.length)?;
                let oid = ObjectIdentifier::from_bytes(&bytes)
                    .map_err(|_| der::Error::from(ErrorKind::Value { tag }))?;
                Ok(GeneralName::RegisteredId(oid))
            }
            _ => Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into()),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(_) => write!(f, "othername:<unsupported>"),
            GeneralName::Rfc822Name(email) => write!(f, "email:{}", email),
            GeneralName::DnsName(dns) => write!(f, "DNS:{}", dns),
            GeneralName::X400Address(_) => write!(f, "X400Name:<unsupported>"),
            GeneralName::DirectoryName(name) => write!(f, "DirName:{}", name),
            GeneralName::EdiPartyName(_) => write!(f, "EdiPartyName:<unsupported>"),
            GeneralName::Uri(uri) => write!(f, "URI:{}", uri),
            GeneralName::IpAddress(_) => match self.ip_address_string() {
                Some(ip) => write!(f, "IP Address:{}", ip),
                None => write!(f, "IP Address:<invalid>"),
            },
            GeneralName::RegisteredId(oid) => write!(f, "Registered ID:{}", oid),
        }
    }
}

/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralNames {
    pub names: Vec<GeneralName>,
}

impl GeneralNames {
    /// Decode a GeneralNames SEQUENCE from DER.
    pub fn from_der_bytes(bytes: &[u8]) -> der::Result<Self> {
        Self::from_der(bytes)
    }

    /// Decode the content octets of a GeneralNames SEQUENCE.
    pub(crate) fn decode_content<'a, R: Reader<'a>>(
        reader: &mut R,
        length: Length,
    ) -> der::Result<Self> {
        let mut names = Vec::new();
        reader.read_nested(length, |reader| {
            while !reader.is_finished() {
                let name_header = Header::decode(reader)?;
                names.push(GeneralName::decode_value(reader, name_header)?);
            }
            Ok(())
        })?;
        Ok(Self { names })
    }

    pub fn dns_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::DnsName(dns) => Some(dns.as_str()),
            _ => None,
        })
    }

    pub fn email_addresses(&self) -> impl Iterator<Item = &str> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::Rfc822Name(email) => Some(email.as_str()),
            _ => None,
        })
    }

    /// IP addresses in textual form; malformed lengths are skipped.
    pub fn ip_addresses(&self) -> impl Iterator<Item = String> + '_ {
        self.names.iter().filter_map(GeneralName::ip_address_string)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.names.iter().filter_map(|n| match n {
            GeneralName::Uri(uri) => Some(uri.as_str()),
            _ => None,
        })
    }
}

impl<'a> DecodeValue<'a> for GeneralNames {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Self::decode_content(reader, header.length)
    }
}

impl FixedTag for GeneralNames {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for GeneralNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.names.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================
