// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use x509_model::{Certificate, CertificateSigningRequest, ValidationOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(cert) = Certificate::from_der(data) {
        let _ = cert.is_issuer(&cert);
        let _ = cert.check_signature(&cert);
        let _ = cert.check_subject_key_identifier(&ValidationOptions::default());
        let _ = cert.get_extension_field("basicConstraints", "cA");
        let _ = cert.to_json();
        let _ = cert.to_pem();
    }

    if let Ok(csr) = CertificateSigningRequest::from_der(data) {
        let _ = csr.check_self_signature();
        let _ = csr.to_json();
    }

    // Same input through the PEM front end
    if let Ok(text) = core::str::from_utf8(data) {
        let _ = Certificate::from_pem(text);
        let _ = Certificate::from_pems(text);
        let _ = CertificateSigningRequest::from_pem(text);
    }
});
