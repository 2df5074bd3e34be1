// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hashing Capability
//!
//! Digest computation for key and SPKI pinning. The trait keeps the
//! primitive injectable so tests can substitute a recording or
//! constant hasher.

use ring::digest;

/// Produces a fixed-length digest of arbitrary bytes.
///
/// Implementations must be deterministic, total (no failure modes),
/// and safely callable from concurrent validations.
pub trait Hasher: Send + Sync {
    /// Computes a 32-byte SHA-256 digest of `data`.
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// Default SHA-256 hasher backed by `ring`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let hash = digest::digest(&digest::SHA256, data);
        let mut out = [0u8; 32];
        out.copy_from_slice(hash.as_ref());
        out
    }
}
