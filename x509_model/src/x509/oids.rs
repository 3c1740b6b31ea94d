// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! OID constants and name registries
//!
//! Three registries are built once on first use: naming attribute types
//! (`CN` / `commonName` / `2.5.4.3`), extensions (`keyUsage` / `2.5.29.15`)
//! and algorithms. Each maps an OID to its short and long names and resolves
//! any of the three spellings back to the OID.

extern crate alloc;

use alloc::collections::BTreeMap;

use const_oid::ObjectIdentifier;
use lazy_static::lazy_static;

// =============================================================================
// Naming attribute types (RFC 5280 Appendix A.1, RFC 4519)
// =============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

// =============================================================================
// PKCS#9 request attributes
// =============================================================================

/// Challenge password - 1.2.840.113549.1.9.7
pub const CHALLENGE_PASSWORD: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.7");

/// Extension request - 1.2.840.113549.1.9.14
pub const EXTENSION_REQUEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.14");

// =============================================================================
// Extensions (RFC 5280 Section 4.2)
// =============================================================================

/// Subject Key Identifier - 2.5.29.14
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// Subject Alternative Name - 2.5.29.17
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Issuer Alternative Name - 2.5.29.18
pub const ISSUER_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.18");

/// Basic Constraints - 2.5.29.19
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Authority Information Access - 1.3.6.1.5.5.7.1.1
pub const AUTHORITY_INFO_ACCESS: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.1.1");

/// OCSP access method - 1.3.6.1.5.5.7.48.1
pub const AD_OCSP: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1");

/// CA Issuers access method - 1.3.6.1.5.5.7.48.2
pub const AD_CA_ISSUERS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.2");

/// Extended Key Usage purposes
pub mod extended_key_usage_oids {
    use const_oid::ObjectIdentifier;

    /// TLS Web Server Authentication - 1.3.6.1.5.5.7.3.1
    pub const SERVER_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.1");

    /// TLS Web Client Authentication - 1.3.6.1.5.5.7.3.2
    pub const CLIENT_AUTH: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.2");

    /// Code Signing - 1.3.6.1.5.5.7.3.3
    pub const CODE_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.3");

    /// Email Protection - 1.3.6.1.5.5.7.3.4
    pub const EMAIL_PROTECTION: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.4");

    /// Time Stamping - 1.3.6.1.5.5.7.3.8
    pub const TIME_STAMPING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.8");

    /// OCSP Signing - 1.3.6.1.5.5.7.3.9
    pub const OCSP_SIGNING: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.9");
}

// =============================================================================
// Algorithms
// =============================================================================

/// RSA Encryption - 1.2.840.113549.1.1.1
pub const RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// RSASSA-PSS - 1.2.840.113549.1.1.10
pub const RSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

/// MGF1 mask generation - 1.2.840.113549.1.1.8
pub const MGF1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");

/// EC Public Key - 1.2.840.10045.2.1
pub const ECPUBLICKEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// ECDSA P-256 (secp256r1) - 1.2.840.10045.3.1.7
pub const ECDSA_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// ECDSA P-384 (secp384r1) - 1.3.132.0.34
pub const ECDSA_P384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// EdDSA Ed25519 - 1.3.101.112
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

pub const SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
pub const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
pub const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");

/// SHA-256 - 2.16.840.1.101.3.4.2.1
pub const SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");

/// SHA-384 - 2.16.840.1.101.3.4.2.2
pub const SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");

/// SHA-512 - 2.16.840.1.101.3.4.2.3
pub const SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

// =============================================================================
// Registries
// =============================================================================

/// One registered OID with its names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OidEntry {
    pub oid: ObjectIdentifier,
    pub short_name: &'static str,
    pub long_name: &'static str,
}

/// Bidirectional OID / name table.
#[derive(Debug)]
pub struct OidRegistry {
    by_oid: BTreeMap<ObjectIdentifier, OidEntry>,
    by_name: BTreeMap<&'static str, ObjectIdentifier>,
}

impl OidRegistry {
    fn new(entries: &[(&str, &'static str, &'static str)]) -> Self {
        let mut by_oid = BTreeMap::new();
        let mut by_name = BTreeMap::new();
        for &(dotted, short_name, long_name) in entries {
            let oid = match ObjectIdentifier::new(dotted) {
                Ok(oid) => oid,
                Err(_) => {
                    log::error!("skipping malformed registry OID {}", dotted);
                    continue;
                }
            };
            by_oid.insert(
                oid,
                OidEntry {
                    oid,
                    short_name,
                    long_name,
                },
            );
            // First registration of a spelling wins.
            by_name.entry(short_name).or_insert(oid);
            by_name.entry(long_name).or_insert(oid);
        }
        Self { by_oid, by_name }
    }

    /// Look up the names registered for `oid`.
    pub fn lookup(&self, oid: &ObjectIdentifier) -> Option<&OidEntry> {
        self.by_oid.get(oid)
    }

    /// Resolve a short name, long name or dotted OID string.
    ///
    /// Dotted strings resolve even when the OID is not registered.
    pub fn resolve(&self, key: &str) -> Option<ObjectIdentifier> {
        if let Some(oid) = self.by_name.get(key) {
            return Some(*oid);
        }
        ObjectIdentifier::new(key).ok()
    }

    /// Resolve a short or long name only.
    pub fn lookup_name(&self, name: &str) -> Option<ObjectIdentifier> {
        self.by_name.get(name).copied()
    }

    /// Long name for `oid`, or `""` when unregistered.
    pub fn long_name(&self, oid: &ObjectIdentifier) -> &'static str {
        self.lookup(oid).map(|e| e.long_name).unwrap_or("")
    }

    /// Short name for `oid`, or `""` when unregistered.
    pub fn short_name(&self, oid: &ObjectIdentifier) -> &'static str {
        self.lookup(oid).map(|e| e.short_name).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.by_oid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_oid.is_empty()
    }
}

lazy_static! {
    /// Naming attribute types used in distinguished names, plus the PKCS#9
    /// request attributes found in certification requests.
    pub static ref ATTRIBUTE_TYPES: OidRegistry = OidRegistry::new(&[
        ("2.5.4.3", "CN", "commonName"),
        ("2.5.4.4", "SN", "surname"),
        ("2.5.4.5", "serialNumber", "serialName"),
        ("2.5.4.6", "C", "countryName"),
        ("2.5.4.7", "L", "localityName"),
        ("2.5.4.8", "ST", "stateOrProvinceName"),
        ("2.5.4.9", "street", "streetAddress"),
        ("2.5.4.10", "O", "organizationName"),
        ("2.5.4.11", "OU", "organizationalUnitName"),
        ("2.5.4.12", "title", "title"),
        ("2.5.4.13", "description", "description"),
        ("2.5.4.15", "businessCategory", "businessCategory"),
        ("2.5.4.17", "postalCode", "postalCode"),
        ("2.5.4.42", "GN", "givenName"),
        ("2.5.4.43", "initials", "initials"),
        ("2.5.4.46", "dnQualifier", "dnQualifier"),
        ("2.5.4.65", "pseudonym", "pseudonym"),
        ("1.2.840.113549.1.9.1", "E", "emailAddress"),
        ("1.2.840.113549.1.9.2", "unstructuredName", "unstructuredName"),
        ("1.2.840.113549.1.9.7", "challengePassword", "challengePassword"),
        ("1.2.840.113549.1.9.14", "extensionRequest", "extensionRequest"),
        ("0.9.2342.19200300.100.1.1", "UID", "userId"),
        ("0.9.2342.19200300.100.1.25", "DC", "domainComponent"),
        (
            "1.3.6.1.4.1.311.60.2.1.3",
            "jurisdictionC",
            "jurisdictionOfIncorporationCountryName",
        ),
    ]);

    /// Certificate extensions. The short name is the lookup key used by
    /// `get_extension`.
    pub static ref EXTENSIONS: OidRegistry = OidRegistry::new(&[
        ("2.5.29.14", "subjectKeyIdentifier", "X509v3 Subject Key Identifier"),
        ("2.5.29.15", "keyUsage", "X509v3 Key Usage"),
        ("2.5.29.17", "subjectAltName", "X509v3 Subject Alternative Name"),
        ("2.5.29.18", "issuerAltName", "X509v3 Issuer Alternative Name"),
        ("2.5.29.19", "basicConstraints", "X509v3 Basic Constraints"),
        ("2.5.29.30", "nameConstraints", "X509v3 Name Constraints"),
        ("2.5.29.31", "cRLDistributionPoints", "X509v3 CRL Distribution Points"),
        ("2.5.29.32", "certificatePolicies", "X509v3 Certificate Policies"),
        ("2.5.29.33", "policyMappings", "X509v3 Policy Mappings"),
        ("2.5.29.35", "authorityKeyIdentifier", "X509v3 Authority Key Identifier"),
        ("2.5.29.36", "policyConstraints", "X509v3 Policy Constraints"),
        ("2.5.29.37", "extKeyUsage", "X509v3 Extended Key Usage"),
        ("2.5.29.54", "inhibitAnyPolicy", "X509v3 Inhibit Any Policy"),
        ("1.3.6.1.5.5.7.1.1", "authorityInfoAccess", "Authority Information Access"),
        ("1.3.6.1.5.5.7.1.11", "subjectInfoAccess", "Subject Information Access"),
        ("2.16.840.1.113730.1.1", "nsCertType", "Netscape Cert Type"),
        ("1.3.6.1.4.1.11129.2.4.2", "ct_precert_scts", "CT Precertificate SCTs"),
    ]);

    /// Signature, public key, curve and digest algorithms.
    pub static ref ALGORITHMS: OidRegistry = OidRegistry::new(&[
        ("1.2.840.113549.1.1.1", "rsaEncryption", "rsaEncryption"),
        ("1.2.840.113549.1.1.5", "RSA-SHA1", "sha1WithRSAEncryption"),
        ("1.2.840.113549.1.1.10", "RSASSA-PSS", "rsassaPss"),
        ("1.2.840.113549.1.1.8", "MGF1", "mgf1"),
        ("1.2.840.113549.1.1.11", "RSA-SHA256", "sha256WithRSAEncryption"),
        ("1.2.840.113549.1.1.12", "RSA-SHA384", "sha384WithRSAEncryption"),
        ("1.2.840.113549.1.1.13", "RSA-SHA512", "sha512WithRSAEncryption"),
        ("1.2.840.10045.2.1", "id-ecPublicKey", "id-ecPublicKey"),
        ("1.2.840.10045.4.3.2", "ecdsa-with-SHA256", "ecdsa-with-SHA256"),
        ("1.2.840.10045.4.3.3", "ecdsa-with-SHA384", "ecdsa-with-SHA384"),
        ("1.2.840.10045.4.3.4", "ecdsa-with-SHA512", "ecdsa-with-SHA512"),
        ("1.2.840.10045.3.1.7", "prime256v1", "prime256v1"),
        ("1.3.132.0.34", "secp384r1", "secp384r1"),
        ("1.3.132.0.35", "secp521r1", "secp521r1"),
        ("1.3.101.112", "ED25519", "ED25519"),
        ("1.3.14.3.2.26", "SHA1", "sha1"),
        ("2.16.840.1.101.3.4.2.1", "SHA256", "sha256"),
        ("2.16.840.1.101.3.4.2.2", "SHA384", "sha384"),
        ("2.16.840.1.101.3.4.2.3", "SHA512", "sha512"),
    ]);

    /// Extended key usage purposes, keyed by the names `get_extension_field`
    /// accepts on an `extKeyUsage` extension.
    pub static ref KEY_PURPOSES: OidRegistry = OidRegistry::new(&[
        ("1.3.6.1.5.5.7.3.1", "serverAuth", "TLS Web Server Authentication"),
        ("1.3.6.1.5.5.7.3.2", "clientAuth", "TLS Web Client Authentication"),
        ("1.3.6.1.5.5.7.3.3", "codeSigning", "Code Signing"),
        ("1.3.6.1.5.5.7.3.4", "emailProtection", "E-mail Protection"),
        ("1.3.6.1.5.5.7.3.8", "timeStamping", "Time Stamping"),
        ("1.3.6.1.5.5.7.3.9", "OCSPSigning", "OCSP Signing"),
    ]);
}
