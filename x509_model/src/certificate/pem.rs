// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Multi-block PEM splitting.
//!
//! A bundle is cut into blocks by the `pem` crate. Text between blocks is
//! ignored, but a block with bad base64 or an end boundary that does not match
//! its begin label fails the whole document, so a broken block can never hide
//! the certificates that follow it.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::Result;

pub use ::pem::Pem;

/// Every block of `input`, in order of appearance.
pub fn blocks(input: &str) -> Result<Vec<Pem>> {
    Ok(::pem::parse_many(input)?)
}

/// Decoded contents of the blocks labelled `label`, in order.
///
/// Blocks with any other label are skipped.
pub fn contents_labelled(input: &str, label: &str) -> Result<Vec<Vec<u8>>> {
    let mut out = Vec::new();
    for block in blocks(input)? {
        if block.tag() != label {
            log::debug!("skipping PEM block labelled {}", block.tag());
            continue;
        }
        out.push(block.into_contents());
    }
    Ok(out)
}
