// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use x509_model::certificate::{CERTIFICATE_PEM_LABEL, CSR_PEM_LABEL};
use x509_model::error::{EncodingError, ParseError};
use x509_model::prelude::*;
use x509_model::{
    DecodeOptions, FieldValue, KeyIdMethod, KeyUsage, RingBackend, SignatureError, Version,
};

const CA: &str = include_str!("../../test_key/rsa2048/ca.cert.pem");
const REORDERED_CA: &str = include_str!("../../test_key/rsa2048/reordered_ca.cert.pem");
const LEAF: &str = include_str!("../../test_key/ecp256/leaf.cert.pem");
const BARE: &str = include_str!("../../test_key/ecp256/bare.cert.pem");
const BAD_SKI: &str = include_str!("../../test_key/ecp256/bad_ski.cert.pem");
const CSR: &str = include_str!("../../test_key/ecp256/req.csr.pem");
const CHAIN: &str = include_str!("../../test_key/bundle/chain.pem");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn load(pem: &str) -> Certificate {
    Certificate::from_pem(pem).unwrap()
}

// ============================================================================
// Issuer matching
// ============================================================================

#[test]
fn test_case0_is_issuer() {
    init_logger();
    let ca = load(CA);
    let leaf = load(LEAF);
    assert!(leaf.is_issuer(&ca));
    assert!(ca.is_issuer(&ca));
    assert!(!ca.is_issuer(&leaf));
}

#[test]
fn test_case1_is_issuer_attribute_order_matters() {
    init_logger();
    let reordered = load(REORDERED_CA);
    let leaf = load(LEAF);
    assert!(!leaf.is_issuer(&reordered));
    assert!(reordered.is_issuer(&reordered));
    assert_ne!(reordered.subject_hash(), load(CA).subject_hash());
}

#[test]
fn test_issuer_hash_matches_subject_hash() {
    let ca = load(CA);
    let leaf = load(LEAF);
    assert_eq!(leaf.issuer_hash(), ca.subject_hash());
    assert_eq!(ca.subject_hash().len(), 64);
    assert_eq!(leaf.issuer(), ca.subject());
}

// ============================================================================
// Signature checks
// ============================================================================

#[test]
fn test_case0_check_signature() {
    init_logger();
    let ca = load(CA);
    let leaf = load(LEAF);
    let status = ca.check_signature(&leaf).is_ok();
    assert!(status);

    let status = ca.check_signature(&ca).is_ok();
    assert!(status);
}

#[test]
fn test_case1_check_signature_self_signed_ec() {
    init_logger();
    let bare = load(BARE);
    assert!(bare.check_signature(&bare).is_ok());

    // bad_ski shares bare's key pair
    let bad_ski = load(BAD_SKI);
    assert!(bare.check_signature(&bad_ski).is_ok());
    assert!(bad_ski.check_signature(&bad_ski).is_ok());
}

#[test]
fn test_case2_check_signature_wrong_key() {
    init_logger();
    let leaf = load(LEAF);
    let bare = load(BARE);

    // EC key against an RSA signature
    let status = leaf.check_signature(&leaf).is_err();
    assert!(status);

    // EC key, EC signature, different key
    assert_eq!(
        leaf.check_signature(&bare),
        Err(SignatureError::VerificationFailed)
    );
}

#[test]
fn test_case3_check_signature_with_backend() {
    let ca = load(CA);
    let leaf = load(LEAF);
    assert!(ca.check_signature_with_backend(&RingBackend, &leaf).is_ok());
}

#[test]
fn test_check_signature_rejects_tampered_tbs() {
    init_logger();
    let ca = load(CA);
    let leaf = load(LEAF);

    // Flip one byte of the subject CN inside the signed portion.
    let mut der = leaf.to_der().to_vec();
    let needle = b"www.example.com";
    let pos = der
        .windows(needle.len())
        .position(|w| w == needle)
        .unwrap();
    der[pos] = b'x';
    let tampered = Certificate::from_der(&der).unwrap();
    assert_eq!(tampered.subject().common_name(), "xww.example.com");
    assert!(ca.check_signature(&tampered).is_err());
}

// ============================================================================
// Subject key identifier
// ============================================================================

#[test]
fn test_verify_subject_key_identifier() {
    init_logger();
    assert!(load(CA).verify_subject_key_identifier());
    assert!(load(LEAF).verify_subject_key_identifier());
    assert!(!load(BAD_SKI).verify_subject_key_identifier());
    assert!(!load(BARE).verify_subject_key_identifier());
}

#[test]
fn test_check_subject_key_identifier_outcomes() {
    let options = ValidationOptions::default();
    assert_eq!(
        load(LEAF).check_subject_key_identifier(&options),
        KeyIdCheck::Verified(KeyIdMethod::Sha1)
    );
    assert_eq!(
        load(BAD_SKI).check_subject_key_identifier(&options),
        KeyIdCheck::Unverified
    );
    assert_eq!(
        load(BARE).check_subject_key_identifier(&options),
        KeyIdCheck::Absent
    );

    let truncated_only =
        ValidationOptions::new().with_key_id_methods(&[KeyIdMethod::Sha256Truncated]);
    assert_eq!(
        load(LEAF).check_subject_key_identifier(&truncated_only),
        KeyIdCheck::Unverified
    );
}

// ============================================================================
// Extensions and derived fields
// ============================================================================

#[test]
fn test_ca_extensions() {
    let ca = load(CA);
    assert!(ca.is_ca());
    assert_eq!(ca.max_path_len(), 2);
    assert_eq!(
        ca.get_extension_field("keyUsage", "keyCertSign"),
        Some(FieldValue::Bool(true))
    );
    assert_eq!(
        ca.get_extension_field("keyUsage", "digitalSignature"),
        Some(FieldValue::Bool(false))
    );
    assert_eq!(
        ca.get_extension_field("basicConstraints", "critical"),
        Some(FieldValue::Bool(true))
    );
    assert_eq!(
        ca.get_extension_field("basicConstraints", "pathLenConstraint"),
        Some(FieldValue::Int(2))
    );
    assert!(ca.key_usage().has(KeyUsage::KEY_CERT_SIGN));
    assert!(ca.key_usage().has(KeyUsage::CRL_SIGN));
    assert_eq!(ca.subject_key_identifier(), ca.authority_key_identifier());
}

#[test]
fn test_extension_lookup_absent() {
    let bare = load(BARE);
    assert!(bare.get_extension("keyUsage").is_none());
    assert!(bare.get_extension("2.5.29.19").is_none());
    assert!(!bare.is_ca());
    assert_eq!(bare.max_path_len(), -1);
    assert_eq!(bare.key_usage().bits(), 0);
}

#[test]
fn test_bad_ski_basic_constraints_without_path_len() {
    let cert = load(BAD_SKI);
    assert!(cert.is_ca());
    assert_eq!(cert.max_path_len(), -1);
    assert_eq!(
        cert.get_extension_field("basicConstraints", "pathLenConstraint"),
        None
    );
    assert_eq!(
        cert.subject_key_identifier(),
        "0102030405060708090a0b0c0d0e0f1011121314"
    );
}

#[test]
fn test_leaf_subject_and_alt_names() {
    let leaf = load(LEAF);
    let subject = leaf.subject();
    assert_eq!(subject.country_name(), "US");
    assert_eq!(subject.locality_name(), "San Francisco");
    assert_eq!(subject.organization_name(), "Example Corp");
    // First of the two OU values
    assert_eq!(subject.organizational_unit_name(), "Engineering");
    assert_eq!(
        subject.get_field("ST").map(|a| a.value()),
        Some("California")
    );
    assert_eq!(subject.attributes().len(), 7);

    assert_eq!(leaf.dns_names(), ["www.example.com", "example.com"]);
    assert_eq!(leaf.ip_addresses(), ["192.168.1.1", "2001:db8::1"]);
    assert_eq!(leaf.email_addresses(), ["admin@example.com"]);
    assert_eq!(leaf.uris(), ["https://www.example.com/"]);
    assert_eq!(leaf.ocsp_server(), "http://ocsp.example.com");
    assert_eq!(
        leaf.issuing_certificate_url(),
        "http://ca.example.com/root.crt"
    );
}

#[test]
fn test_leaf_header_fields() {
    let leaf = load(LEAF);
    assert_eq!(leaf.version(), Version::V3);
    assert_eq!(leaf.serial_number(), [0x8f, 0x12]);
    assert_eq!(leaf.serial_number_hex(), "8f12");
    assert_eq!(leaf.signature_algorithm_oid().to_string(), "1.2.840.113549.1.1.11");
    assert_eq!(
        leaf.tbs_signature_algorithm().map(|alg| alg.oid),
        Some(leaf.signature_algorithm_oid())
    );
    assert_eq!(leaf.signature_bytes().len(), 256);
    assert!(leaf.validity().is_well_formed());
    assert!(leaf.valid_from() < leaf.valid_to());
}

// ============================================================================
// PEM handling
// ============================================================================

#[test]
fn test_case0_from_pems_bundle() {
    init_logger();
    let certs = Certificate::from_pems(CHAIN).unwrap();
    assert_eq!(certs.len(), 2);
    assert_eq!(certs[0].subject().common_name(), "Example Root CA");
    assert_eq!(certs[1].subject().common_name(), "www.example.com");
    assert!(certs[1].is_issuer(&certs[0]));
    assert!(certs[0].check_signature(&certs[1]).is_ok());
}

#[test]
fn test_case1_from_pem_takes_first_certificate() {
    let cert = Certificate::from_pem(CHAIN).unwrap();
    assert_eq!(cert.subject().common_name(), "Example Root CA");
}

#[test]
fn test_case2_no_certificate() {
    assert_eq!(
        Certificate::from_pem("").unwrap_err(),
        Error::EncodingError(EncodingError::NoCertificateFound)
    );
    assert_eq!(
        Certificate::from_pems("no pem here").unwrap_err(),
        Error::EncodingError(EncodingError::NoCertificateFound)
    );
    let public_key_only = include_str!("../../test_key/ecp256/leaf.pub.pem");
    assert!(Certificate::from_pems(public_key_only).is_err());
}

#[test]
fn test_case3_truncated_certificate() {
    init_logger();
    let der = load(LEAF).to_der().to_vec();
    let truncated = &der[..der.len() / 2];
    let pem = pem_rfc7468::encode_string(
        CERTIFICATE_PEM_LABEL,
        pem_rfc7468::LineEnding::LF,
        truncated,
    )
    .unwrap();

    let status = Certificate::from_pem(&pem).is_err();
    assert!(status);
    assert!(Certificate::from_der(truncated).is_err());
    assert!(Certificate::from_der(&[]).is_err());
    assert!(Certificate::from_der(&[0x30, 0x00]).is_err());
}

#[test]
fn test_case4_malformed_block_in_bundle_fails() {
    let der = load(BARE).to_der().to_vec();
    let broken = pem_rfc7468::encode_string(
        CERTIFICATE_PEM_LABEL,
        pem_rfc7468::LineEnding::LF,
        &der[..der.len() - 4],
    )
    .unwrap();
    let bundle = format!("{}{}", CA, broken);
    assert!(Certificate::from_pems(&bundle).is_err());
}

#[test]
fn test_case5_unterminated_block_before_certificate() {
    init_logger();
    let public_key = include_str!("../../test_key/ecp256/leaf.pub.pem");
    let unterminated: String = public_key
        .lines()
        .filter(|line| !line.starts_with("-----END"))
        .map(|line| format!("{}\n", line))
        .collect();
    let bundle = format!("{}{}{}", unterminated, CA, LEAF);

    let err = Certificate::from_pems(&bundle).unwrap_err();
    assert!(matches!(
        err,
        Error::EncodingError(EncodingError::InvalidPem(_))
    ));
    assert!(matches!(
        Certificate::from_pem(&bundle),
        Err(Error::EncodingError(EncodingError::InvalidPem(_)))
    ));

    // Terminated, the same key block is skipped.
    let bundle = format!("{}{}{}", public_key, CA, LEAF);
    assert_eq!(Certificate::from_pems(&bundle).unwrap().len(), 2);
}

#[test]
fn test_case6_garbage_block_before_certificate() {
    let bundle = format!(
        "-----BEGIN GARBAGE-----\n%%% not base64 %%%\n-----END GARBAGE-----\n{}",
        CA
    );
    let status = Certificate::from_pems(&bundle).is_err();
    assert!(status);
    assert_ne!(
        Certificate::from_pem(&bundle).unwrap_err(),
        Error::EncodingError(EncodingError::NoCertificateFound)
    );
}

#[test]
fn test_pem_round_trip() {
    for pem in [CA, LEAF, BARE, BAD_SKI] {
        let cert = load(pem);
        let again = Certificate::from_pem(&cert.to_pem().unwrap()).unwrap();
        assert_eq!(cert, again);
        assert_eq!(cert.to_pem().unwrap(), pem);
    }
}

#[test]
fn test_decode_options_limit() {
    let options = DecodeOptions::new().with_max_der_len(256);
    assert!(matches!(
        Certificate::from_pem_with_options(CA, &options),
        Err(Error::ParseError(ParseError::InputTooLarge { limit: 256, .. }))
    ));
    assert!(Certificate::from_pem_with_options(BARE, &DecodeOptions::default()).is_ok());
}

// ============================================================================
// Certification requests
// ============================================================================

#[test]
fn test_csr_decode() {
    init_logger();
    let csr = CertificateSigningRequest::from_pem(CSR).unwrap();
    assert_eq!(csr.version(), Version::V1);
    assert_eq!(csr.subject().common_name(), "device.example.org");
    assert_eq!(csr.subject().organization_name(), "Example GmbH");
    assert!(csr.issuer().is_empty());
    assert!(csr.serial_number().is_empty());

    assert_eq!(csr.dns_names(), ["device.example.org"]);
    assert_eq!(csr.ip_addresses(), ["10.0.0.1"]);
    assert_eq!(
        csr.get_extension_field("keyUsage", "digitalSignature"),
        Some(FieldValue::Bool(true))
    );
    assert_eq!(
        csr.get_extension_field("keyUsage", "critical"),
        Some(FieldValue::Bool(false))
    );
}

#[test]
fn test_csr_self_signature() {
    init_logger();
    let csr = CertificateSigningRequest::from_pem(CSR).unwrap();
    assert!(csr.check_self_signature().is_ok());

    // The leaf certificate was issued for the same key.
    let leaf = load(LEAF);
    assert_eq!(csr.public_key(), leaf.public_key());
}

#[test]
fn test_csr_pem_round_trip() {
    let csr = CertificateSigningRequest::from_pem(CSR).unwrap();
    let pem = csr.to_pem().unwrap();
    assert!(pem.starts_with(&format!("-----BEGIN {}-----", CSR_PEM_LABEL)));
    assert_eq!(CertificateSigningRequest::from_pem(&pem).unwrap(), csr);
}

#[test]
fn test_csr_rejects_certificate_pem() {
    assert!(matches!(
        CertificateSigningRequest::from_pem(LEAF),
        Err(Error::EncodingError(EncodingError::InvalidPemLabel { .. }))
    ));
    let leaf_der = load(LEAF).to_der().to_vec();
    assert!(CertificateSigningRequest::from_der(&leaf_der).is_err());
}
