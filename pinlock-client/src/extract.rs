// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chain Extraction
//!
//! Turns DER certificates into the decoded entries the engine
//! validates: raw subject public key bytes for key pinning and the
//! full SubjectPublicKeyInfo structure for SPKI pinning. Also derives
//! pin values from a known-good certificate.

use pinlock_core::{CertificateChain, ChainEntry, Hasher, Sha256Hasher};
use x509_parser::prelude::*;

use crate::error::ClientError;

/// Decodes one DER certificate into a chain entry.
///
/// A certificate that fails to parse still enters the chain - with no
/// key material, so key and SPKI strategies report the extraction
/// failure while exact-certificate pinning keeps working over the raw
/// bytes.
pub fn chain_entry_from_der(der: &[u8]) -> ChainEntry {
    match X509Certificate::from_der(der) {
        Ok((_, cert)) => {
            let spki = cert.public_key();
            ChainEntry::new(der.to_vec())
                .with_public_key(spki.subject_public_key.data.to_vec())
                .with_spki(spki.raw.to_vec())
        }
        Err(err) => {
            tracing::warn!("unable to get public key data: {}", err);
            ChainEntry::new(der.to_vec())
        }
    }
}

/// Builds a leaf-first chain from DER certificates in presentation order.
pub fn chain_from_der<'a, I>(ders: I) -> CertificateChain
where
    I: IntoIterator<Item = &'a [u8]>,
{
    CertificateChain::new(ders.into_iter().map(chain_entry_from_der).collect())
}

/// Pin value for exact-certificate pinning: the DER bytes themselves.
pub fn certificate_pin(der: &[u8]) -> Vec<u8> {
    der.to_vec()
}

/// SHA-256 pin of the certificate's raw subject public key bytes.
pub fn public_key_pin(der: &[u8]) -> Result<[u8; 32], ClientError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| ClientError::InvalidCertificate(e.to_string()))?;
    Ok(Sha256Hasher.digest(&cert.public_key().subject_public_key.data))
}

/// SHA-256 pin of the certificate's SubjectPublicKeyInfo structure,
/// matching pins produced by external SPKI tooling.
pub fn spki_pin(der: &[u8]) -> Result<[u8; 32], ClientError> {
    let (_, cert) = X509Certificate::from_der(der)
        .map_err(|e| ClientError::InvalidCertificate(e.to_string()))?;
    Ok(Sha256Hasher.digest(cert.public_key().raw))
}

/// Public-key pin in the `sha256:<hex>` configuration form.
pub fn public_key_pin_hex(der: &[u8]) -> Result<String, ClientError> {
    Ok(format!("sha256:{}", hex::encode(public_key_pin(der)?)))
}

/// SPKI pin in the HPKP-style `sha256/<base64>` configuration form.
pub fn spki_pin_base64(der: &[u8]) -> Result<String, ClientError> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    Ok(format!("sha256/{}", BASE64.encode(spki_pin(der)?)))
}
