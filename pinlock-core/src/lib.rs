// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinlock Core Library
//!
//! TLS certificate pinning validation engine.
//! All hashing uses the audited `ring` crate.
//!
//! The engine receives an already-decoded certificate chain from the
//! handshake layer and returns an accept/reject decision. It does not
//! perform TLS handshakes, build chains, or evaluate signatures,
//! expiry, or revocation - those belong to the transport collaborator.

pub mod chain;
pub mod config;
pub mod hashing;
pub mod logging;
pub mod manager;
pub mod pinning;

pub use chain::{CertificateChain, ChainEntry, PinScope};
pub use config::{ConfigError, PinningConfig, StrategyKind};
pub use hashing::{Hasher, Sha256Hasher};
pub use logging::{ConsoleLogger, Logger, TracingLogger};
pub use manager::PinningManager;
pub use pinning::{PinSet, PinningError, PinningStrategy};
