// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinning Strategy
//!
//! One tagged type covers the three validation strategies; a single
//! `validate` dispatches on the tag. Strategies are immutable after
//! construction, so one instance can serve any number of concurrent
//! validations.

use std::fmt;
use std::sync::Arc;

use super::error::PinningError;
use super::pin_set::PinSet;
use crate::chain::{CertificateChain, ChainEntry, PinScope};
use crate::hashing::{Hasher, Sha256Hasher};

/// A pinning validation strategy.
///
/// # Example
///
/// ```
/// use pinlock_core::{CertificateChain, ChainEntry, PinScope, PinSet, PinningStrategy};
///
/// let pinned = vec![0x30, 0x82, 0x01, 0x0A];
/// let strategy = PinningStrategy::certificate(
///     PinSet::new(vec![pinned.clone()]),
///     PinScope::Leaf,
/// );
/// let chain = CertificateChain::new(vec![ChainEntry::new(pinned)]);
/// assert!(strategy.validate(&chain).is_ok());
/// ```
#[derive(Clone)]
pub enum PinningStrategy {
    /// Accept if a certificate in the selected scope exactly equals a
    /// pinned DER certificate. Requires app updates when the server
    /// certificate changes.
    Certificate {
        /// Pinned DER-encoded certificates.
        pins: PinSet,
        /// Chain positions eligible for comparison.
        scope: PinScope,
    },
    /// Accept if the SHA-256 digest of the leaf's public key matches a
    /// pinned key hash. More flexible across certificate rotations.
    PublicKey {
        /// Pinned 32-byte key digests.
        pins: PinSet,
        /// Digest capability.
        hasher: Arc<dyn Hasher>,
    },
    /// Accept if the SHA-256 digest of the leaf's SubjectPublicKeyInfo
    /// matches a pinned SPKI hash. Interoperable with externally
    /// generated SPKI pins.
    Spki {
        /// Pinned 32-byte SPKI digests.
        pins: PinSet,
        /// Digest capability.
        hasher: Arc<dyn Hasher>,
    },
}

impl PinningStrategy {
    /// Creates an exact-certificate strategy over `scope`.
    pub fn certificate(pins: PinSet, scope: PinScope) -> Self {
        PinningStrategy::Certificate { pins, scope }
    }

    /// Creates a public-key-hash strategy with the default SHA-256 hasher.
    pub fn public_key(pins: PinSet) -> Self {
        Self::public_key_with_hasher(pins, Arc::new(Sha256Hasher))
    }

    /// Creates a public-key-hash strategy with an injected hasher.
    pub fn public_key_with_hasher(pins: PinSet, hasher: Arc<dyn Hasher>) -> Self {
        PinningStrategy::PublicKey { pins, hasher }
    }

    /// Creates an SPKI-hash strategy with the default SHA-256 hasher.
    pub fn spki(pins: PinSet) -> Self {
        Self::spki_with_hasher(pins, Arc::new(Sha256Hasher))
    }

    /// Creates an SPKI-hash strategy with an injected hasher.
    pub fn spki_with_hasher(pins: PinSet, hasher: Arc<dyn Hasher>) -> Self {
        PinningStrategy::Spki { pins, hasher }
    }

    /// Validates a server-presented chain against the configured pins.
    ///
    /// Pure comparison over the supplied data; no I/O, no mutation.
    /// Every failure is terminal for this attempt.
    pub fn validate(&self, chain: &CertificateChain) -> Result<(), PinningError> {
        match self {
            PinningStrategy::Certificate { pins, scope } => {
                validate_certificate(chain, pins, *scope)
            }
            PinningStrategy::PublicKey { pins, hasher } => {
                let leaf = chain.leaf().ok_or(PinningError::NoServerCertificate)?;
                let key = leaf.public_key.as_deref().ok_or_else(|| {
                    PinningError::PinningFailed("unable to extract public key".into())
                })?;
                if pins.contains(&hasher.digest(key)) {
                    Ok(())
                } else {
                    Err(PinningError::PublicKeyMismatch)
                }
            }
            PinningStrategy::Spki { pins, hasher } => {
                let leaf = chain.leaf().ok_or(PinningError::NoServerCertificate)?;
                let spki = leaf.spki.as_deref().ok_or_else(|| {
                    PinningError::PinningFailed("unable to extract public key for SPKI".into())
                })?;
                if pins.contains(&hasher.digest(spki)) {
                    Ok(())
                } else {
                    Err(PinningError::SpkiMismatch)
                }
            }
        }
    }
}

fn validate_certificate(
    chain: &CertificateChain,
    pins: &PinSet,
    scope: PinScope,
) -> Result<(), PinningError> {
    if chain.is_empty() {
        return Err(PinningError::NoServerCertificate);
    }

    let matches = |entry: &ChainEntry| pins.contains(&entry.der);

    let matched = match scope {
        PinScope::Leaf => chain.leaf().map(matches).unwrap_or(false),
        PinScope::Root => chain.root().map(matches).unwrap_or(false),
        PinScope::Intermediates => {
            // At least one entry strictly between leaf and root.
            if chain.len() < 3 {
                return Err(PinningError::PinningFailed(
                    "no intermediate certificates in chain".into(),
                ));
            }
            chain
                .iter()
                .take(chain.len() - 1)
                .skip(1)
                .any(|entry| matches(entry))
        }
        PinScope::Any => chain.iter().any(|entry| matches(entry)),
    };

    if matched {
        Ok(())
    } else {
        Err(PinningError::CertificateMismatch)
    }
}

impl fmt::Debug for PinningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinningStrategy::Certificate { pins, scope } => f
                .debug_struct("Certificate")
                .field("pins", &pins.len())
                .field("scope", scope)
                .finish(),
            PinningStrategy::PublicKey { pins, .. } => f
                .debug_struct("PublicKey")
                .field("pins", &pins.len())
                .finish(),
            PinningStrategy::Spki { pins, .. } => {
                f.debug_struct("Spki").field("pins", &pins.len()).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert_entry(tag: u8) -> ChainEntry {
        ChainEntry::new(vec![tag; 16])
    }

    fn chain_of(tags: &[u8]) -> CertificateChain {
        CertificateChain::new(tags.iter().map(|t| cert_entry(*t)).collect())
    }

    fn cert_pins(tags: &[u8]) -> PinSet {
        PinSet::new(tags.iter().map(|t| vec![*t; 16]).collect())
    }

    #[test]
    fn test_leaf_scope_accepts_pinned_leaf() {
        let strategy = PinningStrategy::certificate(cert_pins(&[1]), PinScope::Leaf);
        assert!(strategy.validate(&chain_of(&[1, 2])).is_ok());
    }

    #[test]
    fn test_leaf_scope_rejects_unpinned_leaf() {
        let strategy = PinningStrategy::certificate(cert_pins(&[1]), PinScope::Leaf);
        assert_eq!(
            strategy.validate(&chain_of(&[2, 1])),
            Err(PinningError::CertificateMismatch)
        );
    }

    #[test]
    fn test_root_scope_compares_last_entry() {
        let strategy = PinningStrategy::certificate(cert_pins(&[1]), PinScope::Root);
        // Pinned cert is the leaf here, not the root.
        assert_eq!(
            strategy.validate(&chain_of(&[1, 2])),
            Err(PinningError::CertificateMismatch)
        );
        assert!(strategy.validate(&chain_of(&[2, 1])).is_ok());
    }

    #[test]
    fn test_intermediates_scope_requires_three_entries() {
        let strategy = PinningStrategy::certificate(cert_pins(&[2]), PinScope::Intermediates);
        let err = strategy.validate(&chain_of(&[1, 2])).unwrap_err();
        match err {
            PinningError::PinningFailed(reason) => {
                assert!(reason.contains("no intermediate certificates"))
            }
            other => panic!("expected PinningFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_intermediates_scope_excludes_leaf_and_root() {
        let leaf_pinned = PinningStrategy::certificate(cert_pins(&[1]), PinScope::Intermediates);
        let root_pinned = PinningStrategy::certificate(cert_pins(&[4]), PinScope::Intermediates);
        let inter_pinned = PinningStrategy::certificate(cert_pins(&[3]), PinScope::Intermediates);

        let chain = chain_of(&[1, 2, 3, 4]);
        assert_eq!(
            leaf_pinned.validate(&chain),
            Err(PinningError::CertificateMismatch)
        );
        assert_eq!(
            root_pinned.validate(&chain),
            Err(PinningError::CertificateMismatch)
        );
        assert!(inter_pinned.validate(&chain).is_ok());
    }

    #[test]
    fn test_any_scope_accepts_any_position() {
        for tag in [1, 2, 3, 4] {
            let strategy = PinningStrategy::certificate(cert_pins(&[tag]), PinScope::Any);
            assert!(strategy.validate(&chain_of(&[1, 2, 3, 4])).is_ok());
        }
    }

    #[test]
    fn test_any_scope_rejects_when_nothing_matches() {
        let strategy = PinningStrategy::certificate(cert_pins(&[9]), PinScope::Any);
        assert_eq!(
            strategy.validate(&chain_of(&[1, 2, 3])),
            Err(PinningError::CertificateMismatch)
        );
    }

    #[test]
    fn test_empty_chain_fails_before_scope_dispatch() {
        for scope in [
            PinScope::Leaf,
            PinScope::Root,
            PinScope::Intermediates,
            PinScope::Any,
        ] {
            let strategy = PinningStrategy::certificate(cert_pins(&[1]), scope);
            assert_eq!(
                strategy.validate(&CertificateChain::default()),
                Err(PinningError::NoServerCertificate)
            );
        }
    }

    #[test]
    fn test_empty_pin_set_never_accepts() {
        let strategy = PinningStrategy::certificate(PinSet::default(), PinScope::Any);
        assert_eq!(
            strategy.validate(&chain_of(&[1])),
            Err(PinningError::CertificateMismatch)
        );
    }

    #[test]
    fn test_public_key_strategy_matches_leaf_key_digest() {
        let key = vec![0x42u8; 65];
        let digest = Sha256Hasher.digest(&key);
        let strategy = PinningStrategy::public_key(PinSet::from(vec![digest]));

        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_public_key(key),
            cert_entry(2),
        ]);
        assert!(strategy.validate(&chain).is_ok());
    }

    #[test]
    fn test_public_key_strategy_rejects_unpinned_key() {
        let strategy = PinningStrategy::public_key(PinSet::from(vec![[0xFF; 32]]));
        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_public_key(vec![0x42; 65])
        ]);
        assert_eq!(
            strategy.validate(&chain),
            Err(PinningError::PublicKeyMismatch)
        );
    }

    #[test]
    fn test_public_key_strategy_ignores_non_leaf_keys() {
        // Only the leaf key is checked; a pinned key further up the
        // chain does not rescue validation.
        let pinned_key = vec![0x42u8; 65];
        let digest = Sha256Hasher.digest(&pinned_key);
        let strategy = PinningStrategy::public_key(PinSet::from(vec![digest]));

        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_public_key(vec![0x24; 65]),
            ChainEntry::new(vec![2; 16]).with_public_key(pinned_key),
        ]);
        assert_eq!(
            strategy.validate(&chain),
            Err(PinningError::PublicKeyMismatch)
        );
    }

    #[test]
    fn test_public_key_strategy_requires_extracted_key() {
        let strategy = PinningStrategy::public_key(PinSet::from(vec![[0xAA; 32]]));
        let chain = CertificateChain::new(vec![ChainEntry::new(vec![1; 16])]);
        assert_eq!(
            strategy.validate(&chain),
            Err(PinningError::PinningFailed(
                "unable to extract public key".into()
            ))
        );
    }

    #[test]
    fn test_public_key_strategy_empty_chain() {
        let strategy = PinningStrategy::public_key(PinSet::from(vec![[0xAA; 32]]));
        assert_eq!(
            strategy.validate(&CertificateChain::default()),
            Err(PinningError::NoServerCertificate)
        );
    }

    #[test]
    fn test_spki_strategy_matches_spki_digest() {
        let spki = vec![0x30u8, 0x59, 0x30, 0x13, 0x06, 0x07];
        let digest = Sha256Hasher.digest(&spki);
        let strategy = PinningStrategy::spki(PinSet::from(vec![digest]));

        let chain =
            CertificateChain::new(vec![ChainEntry::new(vec![1; 16]).with_spki(spki)]);
        assert!(strategy.validate(&chain).is_ok());
    }

    #[test]
    fn test_spki_strategy_rejects_unpinned_spki() {
        let strategy = PinningStrategy::spki(PinSet::from(vec![[0xFF; 32]]));
        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_spki(vec![0x30, 0x59])
        ]);
        assert_eq!(strategy.validate(&chain), Err(PinningError::SpkiMismatch));
    }

    #[test]
    fn test_spki_strategy_requires_spki_bytes() {
        let strategy = PinningStrategy::spki(PinSet::from(vec![[0xFF; 32]]));
        // Raw key present, SPKI absent: extraction failed upstream.
        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_public_key(vec![0x42; 65])
        ]);
        assert_eq!(
            strategy.validate(&chain),
            Err(PinningError::PinningFailed(
                "unable to extract public key for SPKI".into()
            ))
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let key = vec![0x42u8; 65];
        let digest = Sha256Hasher.digest(&key);
        let strategy = PinningStrategy::public_key(PinSet::from(vec![digest]));
        let chain = CertificateChain::new(vec![
            ChainEntry::new(vec![1; 16]).with_public_key(key)
        ]);

        assert_eq!(strategy.validate(&chain), strategy.validate(&chain));
    }
}
