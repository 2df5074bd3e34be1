// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pin Loading
//!
//! Reads pinned certificates from files bundled with the application
//! and parses operator-supplied digest pins. Loading happens once,
//! before the engine is constructed.

use std::fs;
use std::path::Path;

use pinlock_core::config::decode_digest_pin;

use crate::error::ClientError;

/// Loads a DER-encoded certificate file as an exact-certificate pin.
pub fn load_der_certificate(path: &Path) -> Result<Vec<u8>, ClientError> {
    Ok(fs::read(path)?)
}

/// Loads the first CERTIFICATE block of a PEM file as DER bytes.
pub fn load_pem_certificate(path: &Path) -> Result<Vec<u8>, ClientError> {
    let data = fs::read(path)?;
    let (_, pem) = x509_parser::pem::parse_x509_pem(&data)
        .map_err(|e| ClientError::InvalidCertificate(format!("invalid PEM: {}", e)))?;
    if pem.label != "CERTIFICATE" {
        return Err(ClientError::InvalidCertificate(format!(
            "expected CERTIFICATE block, found {}",
            pem.label
        )));
    }
    Ok(pem.contents)
}

/// Parses a `sha256:<hex>` or `sha256/<base64>` digest pin.
pub fn parse_digest_pin(pin: &str) -> Result<[u8; 32], ClientError> {
    decode_digest_pin(pin).map_err(|e| ClientError::InvalidPin(e.to_string()))
}
