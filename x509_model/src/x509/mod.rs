// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extensions, public keys and validation primitives.
//!
//! This module provides the extension decoders defined in RFC 5280, the OID
//! registries used to name attributes, extensions and algorithms, and the
//! issuer, signature and key identifier checks a chain builder relies on.

pub mod extensions;
pub mod oids;
pub mod public_key;
pub mod validator;

pub use extensions::*;
pub use public_key::{KeyKind, PublicKey};
pub use validator::{
    check_signature, check_subject_key_identifier, is_issuer, KeyIdCheck, KeyIdMethod,
    ValidationOptions,
};
