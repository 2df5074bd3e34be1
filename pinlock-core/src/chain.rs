// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Certificate Chain Model
//!
//! Leaf-first representation of a server-presented certificate chain.
//! Chain elements arrive already decoded: the handshake collaborator
//! supplies the DER bytes together with the extracted public key
//! representations. The engine never parses X.509 itself.

use serde::{Deserialize, Serialize};

/// One element of a server-presented certificate chain.
///
/// The key fields are optional because extraction is performed by the
/// handshake collaborator and may fail for malformed certificates. A
/// missing key representation surfaces as a pinning failure when a
/// key-based strategy inspects the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry {
    /// DER encoding of the certificate, treated as opaque bytes.
    pub der: Vec<u8>,
    /// Raw subject public key bytes (the key's external representation).
    pub public_key: Option<Vec<u8>>,
    /// Full DER SubjectPublicKeyInfo structure (algorithm identifier
    /// plus key bits), as produced by external SPKI pin generators.
    pub spki: Option<Vec<u8>>,
}

impl ChainEntry {
    /// Creates an entry from DER bytes with no extracted key material.
    pub fn new(der: Vec<u8>) -> Self {
        ChainEntry {
            der,
            public_key: None,
            spki: None,
        }
    }

    /// Attaches the raw subject public key bytes.
    pub fn with_public_key(mut self, public_key: Vec<u8>) -> Self {
        self.public_key = Some(public_key);
        self
    }

    /// Attaches the DER SubjectPublicKeyInfo bytes.
    pub fn with_spki(mut self, spki: Vec<u8>) -> Self {
        self.spki = Some(spki);
        self
    }
}

/// An ordered certificate chain, index 0 = leaf (server) certificate,
/// last index = root/anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateChain {
    entries: Vec<ChainEntry>,
}

impl CertificateChain {
    /// Creates a chain from leaf-first entries.
    pub fn new(entries: Vec<ChainEntry>) -> Self {
        CertificateChain { entries }
    }

    /// Number of certificates in the chain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the server presented no certificates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The server's own certificate (index 0), if present.
    pub fn leaf(&self) -> Option<&ChainEntry> {
        self.entries.first()
    }

    /// The root/anchor certificate (last index), if present.
    pub fn root(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    /// Entry at `index`, leaf-first.
    pub fn get(&self, index: usize) -> Option<&ChainEntry> {
        self.entries.get(index)
    }

    /// Iterates entries leaf-first.
    pub fn iter(&self) -> std::slice::Iter<'_, ChainEntry> {
        self.entries.iter()
    }
}

impl From<Vec<ChainEntry>> for CertificateChain {
    fn from(entries: Vec<ChainEntry>) -> Self {
        CertificateChain::new(entries)
    }
}

/// Which positions in a certificate chain are eligible for comparison
/// against the pinned certificates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinScope {
    /// Only the server's own certificate (index 0).
    #[default]
    Leaf,
    /// Only the root/anchor certificate (last index).
    Root,
    /// Only certificates strictly between leaf and root.
    Intermediates,
    /// Any certificate in the chain.
    Any,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: u8) -> ChainEntry {
        ChainEntry::new(vec![tag; 8])
    }

    #[test]
    fn test_chain_leaf_and_root() {
        let chain = CertificateChain::new(vec![entry(1), entry(2), entry(3)]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.leaf().unwrap().der, vec![1; 8]);
        assert_eq!(chain.root().unwrap().der, vec![3; 8]);
    }

    #[test]
    fn test_empty_chain() {
        let chain = CertificateChain::default();
        assert!(chain.is_empty());
        assert!(chain.leaf().is_none());
        assert!(chain.root().is_none());
    }

    #[test]
    fn test_single_entry_is_both_leaf_and_root() {
        let chain = CertificateChain::new(vec![entry(7)]);
        assert_eq!(chain.leaf(), chain.root());
    }

    #[test]
    fn test_entry_builder() {
        let e = ChainEntry::new(vec![1, 2, 3])
            .with_public_key(vec![4, 5])
            .with_spki(vec![6, 7]);
        assert_eq!(e.public_key.as_deref(), Some(&[4u8, 5][..]));
        assert_eq!(e.spki.as_deref(), Some(&[6u8, 7][..]));
    }

    #[test]
    fn test_scope_default_is_leaf() {
        assert_eq!(PinScope::default(), PinScope::Leaf);
    }

    #[test]
    fn test_scope_serde_kebab_case() {
        let json = serde_json::to_string(&PinScope::Intermediates).unwrap();
        assert_eq!(json, "\"intermediates\"");
        let scope: PinScope = serde_json::from_str("\"any\"").unwrap();
        assert_eq!(scope, PinScope::Any);
    }
}
