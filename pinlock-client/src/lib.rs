// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinlock Client Glue
//!
//! Everything between the transport layer and the pinning engine:
//! trust-challenge handling, DER chain extraction, a rustls
//! certificate verifier, a pinned WebSocket connector, and pin-file
//! loading.

pub mod challenge;
pub mod error;
pub mod extract;
pub mod pins;

#[cfg(feature = "network-rustls")]
pub mod connector;
#[cfg(feature = "network-rustls")]
pub mod verifier;

pub use challenge::{ChallengeAdapter, ChallengeDisposition, ChallengeMethod, TrustChallenge};
pub use error::ClientError;
pub use extract::{
    certificate_pin, chain_entry_from_der, chain_from_der, public_key_pin, public_key_pin_hex,
    spki_pin, spki_pin_base64,
};
pub use pins::{load_der_certificate, load_pem_certificate, parse_digest_pin};

#[cfg(feature = "network-rustls")]
pub use connector::connect_pinned;
#[cfg(feature = "network-rustls")]
pub use verifier::{pinned_client_config, PinnedServerVerifier};
