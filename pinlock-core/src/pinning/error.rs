// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinning Error Types

use thiserror::Error;

/// Errors that can occur during pinning validation.
///
/// The set is closed and every variant is terminal for the current
/// validation attempt; retry is a policy decision of the calling
/// transport layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinningError {
    /// No server trust information was available in the challenge.
    #[error("No server trust available for pinning validation")]
    NoServerTrust,

    /// No certificate was presented by the server.
    #[error("Server did not provide a certificate for pinning validation")]
    NoServerCertificate,

    /// Public key of the server did not match any pinned key.
    #[error("Public key does not match any pinned key")]
    PublicKeyMismatch,

    /// Certificate did not match any pinned certificate.
    #[error("Certificate does not match any pinned certificate")]
    CertificateMismatch,

    /// SPKI hash did not match any pinned SPKI hash.
    #[error("SPKI hash does not match any pinned SPKI")]
    SpkiMismatch,

    /// General pinning failure.
    #[error("Pinning failed: {0}")]
    PinningFailed(String),
}
