// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinning Configuration
//!
//! Serde surface for the pin material an application loads before
//! constructing the engine. Digest pins use the `sha256:<hex>` form or
//! the HPKP-style `sha256/<base64>` form; certificate pins are base64
//! DER.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::PinScope;
use crate::pinning::{PinSet, PinningStrategy};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Which pinning strategy a configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Exact DER certificate comparison.
    Certificate,
    /// SHA-256 of the leaf's public key.
    PublicKey,
    /// SHA-256 of the leaf's SubjectPublicKeyInfo.
    Spki,
}

/// Declarative pinning configuration.
///
/// `scope` applies to the certificate strategy only; the key and SPKI
/// strategies always inspect the leaf. An empty pin list is accepted
/// and produces a strategy that rejects every chain.
///
/// # Example
///
/// ```
/// use pinlock_core::PinningConfig;
///
/// let config = PinningConfig::from_json(
///     r#"{
///         "strategy": "spki",
///         "pins": ["sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"]
///     }"#,
/// ).unwrap();
/// let strategy = config.build_strategy().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinningConfig {
    /// Strategy selection.
    pub strategy: StrategyKind,
    /// Chain scope for the certificate strategy.
    #[serde(default)]
    pub scope: PinScope,
    /// Encoded pins.
    #[serde(default)]
    pub pins: Vec<String>,
}

impl PinningConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Decodes the pins and constructs the configured strategy.
    pub fn build_strategy(&self) -> Result<PinningStrategy, ConfigError> {
        match self.strategy {
            StrategyKind::Certificate => {
                let pins = self
                    .pins
                    .iter()
                    .map(|pin| decode_certificate_pin(pin))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PinningStrategy::certificate(PinSet::new(pins), self.scope))
            }
            StrategyKind::PublicKey => {
                Ok(PinningStrategy::public_key(self.decode_digest_pins()?))
            }
            StrategyKind::Spki => Ok(PinningStrategy::spki(self.decode_digest_pins()?)),
        }
    }

    fn decode_digest_pins(&self) -> Result<PinSet, ConfigError> {
        let digests = self
            .pins
            .iter()
            .map(|pin| decode_digest_pin(pin))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PinSet::from(digests))
    }
}

/// Decodes a `sha256:<hex>` or `sha256/<base64>` digest pin.
pub fn decode_digest_pin(pin: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = if let Some(hex_str) = pin.strip_prefix("sha256:") {
        hex::decode(hex_str.trim()).map_err(|e| ConfigError::InvalidPin {
            pin: pin.to_string(),
            reason: format!("invalid hex: {}", e),
        })?
    } else if let Some(b64_str) = pin.strip_prefix("sha256/") {
        BASE64
            .decode(b64_str.trim())
            .map_err(|e| ConfigError::InvalidPin {
                pin: pin.to_string(),
                reason: format!("invalid base64: {}", e),
            })?
    } else {
        return Err(ConfigError::InvalidPin {
            pin: pin.to_string(),
            reason: "expected 'sha256:<hex>' or 'sha256/<base64>'".into(),
        });
    };

    if bytes.len() != 32 {
        return Err(ConfigError::InvalidPin {
            pin: pin.to_string(),
            reason: format!("digest must be 32 bytes, got {}", bytes.len()),
        });
    }

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&bytes);
    Ok(digest)
}

fn decode_certificate_pin(pin: &str) -> Result<Vec<u8>, ConfigError> {
    BASE64
        .decode(pin.trim())
        .map_err(|e| ConfigError::InvalidPin {
            pin: pin.to_string(),
            reason: format!("invalid base64 DER: {}", e),
        })
}

/// Errors that can occur while decoding a pinning configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration document could not be parsed.
    #[error("Invalid pinning configuration: {0}")]
    Parse(String),

    /// A pin entry could not be decoded.
    #[error("Invalid pin entry '{pin}': {reason}")]
    InvalidPin {
        /// The offending pin string.
        pin: String,
        /// Why it was rejected.
        reason: String,
    },
}
