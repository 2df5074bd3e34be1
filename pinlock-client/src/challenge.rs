// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trust Challenge Adapter
//!
//! Receives handshake trust-challenge events from the transport
//! collaborator, runs the pinning manager, and answers with exactly
//! one transport disposition. Only server-trust challenges are
//! handled; everything else passes through to default handling.

use std::sync::Arc;

use pinlock_core::{CertificateChain, Logger, PinningError, PinningManager, TracingLogger};

/// Authentication-method tag of a handshake challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeMethod {
    /// The server's certificate chain is being evaluated.
    ServerTrust,
    /// The server requested a client certificate.
    ClientCertificate,
    /// Any other method, carried through for logging.
    Other(String),
}

/// A trust-challenge event raised during a TLS handshake.
#[derive(Debug, Clone)]
pub struct TrustChallenge {
    /// Which kind of credential the handshake is asking about.
    pub method: ChallengeMethod,
    /// The server-presented chain, when the transport could extract one.
    pub chain: Option<CertificateChain>,
}

impl TrustChallenge {
    /// Convenience constructor for a server-trust challenge.
    pub fn server_trust(chain: CertificateChain) -> Self {
        TrustChallenge {
            method: ChallengeMethod::ServerTrust,
            chain: Some(chain),
        }
    }
}

/// The answer the transport expects for a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeDisposition {
    /// Accept the handshake with the supplied credential.
    UseCredential,
    /// Not a pinning concern; let the transport's default handling run.
    PerformDefaultHandling,
    /// Reject the handshake.
    CancelChallenge,
}

/// Maps trust-challenge events onto the pinning manager.
///
/// Once a pinning strategy is engaged, any validation failure cancels
/// the handshake - there is no partial-trust fallback.
pub struct ChallengeAdapter {
    manager: Arc<PinningManager>,
    logger: Arc<dyn Logger>,
}

impl ChallengeAdapter {
    /// Creates an adapter with the default `tracing`-backed logger.
    pub fn new(manager: Arc<PinningManager>) -> Self {
        Self::with_logger(manager, Arc::new(TracingLogger))
    }

    /// Creates an adapter with an injected logger.
    pub fn with_logger(manager: Arc<PinningManager>, logger: Arc<dyn Logger>) -> Self {
        ChallengeAdapter { manager, logger }
    }

    /// Answers a challenge with exactly one disposition.
    pub fn handle(&self, challenge: &TrustChallenge) -> ChallengeDisposition {
        if challenge.method != ChallengeMethod::ServerTrust {
            return ChallengeDisposition::PerformDefaultHandling;
        }

        let Some(chain) = &challenge.chain else {
            self.logger.log_error(&format!(
                "authentication challenge cancelled: {}",
                PinningError::NoServerTrust
            ));
            return ChallengeDisposition::CancelChallenge;
        };

        match self.manager.validate(chain) {
            Ok(()) => ChallengeDisposition::UseCredential,
            Err(err) => {
                self.logger
                    .log_error(&format!("authentication challenge cancelled: {}", err));
                ChallengeDisposition::CancelChallenge
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinlock_core::{ChainEntry, PinScope, PinSet, PinningStrategy};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        error: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn log_debug(&self, _message: &str) {}

        fn log_error(&self, message: &str) {
            self.error.lock().unwrap().push(message.to_string());
        }
    }

    fn adapter_for_pin(pinned: Vec<u8>) -> (ChallengeAdapter, Arc<RecordingLogger>) {
        let manager = Arc::new(PinningManager::with_logger(
            PinningStrategy::certificate(PinSet::new(vec![pinned]), PinScope::Leaf),
            Arc::new(RecordingLogger::default()),
        ));
        let logger = Arc::new(RecordingLogger::default());
        (ChallengeAdapter::with_logger(manager, logger.clone()), logger)
    }

    #[test]
    fn test_valid_chain_uses_credential() {
        let pinned = vec![0xAB; 16];
        let (adapter, _) = adapter_for_pin(pinned.clone());

        let challenge =
            TrustChallenge::server_trust(CertificateChain::new(vec![ChainEntry::new(pinned)]));
        assert_eq!(adapter.handle(&challenge), ChallengeDisposition::UseCredential);
    }

    #[test]
    fn test_mismatch_cancels_challenge() {
        let (adapter, logger) = adapter_for_pin(vec![0xAB; 16]);

        let challenge = TrustChallenge::server_trust(CertificateChain::new(vec![
            ChainEntry::new(vec![0xCD; 16]),
        ]));
        assert_eq!(
            adapter.handle(&challenge),
            ChallengeDisposition::CancelChallenge
        );

        let errors = logger.error.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("authentication challenge cancelled"));
    }

    #[test]
    fn test_non_server_trust_passes_through() {
        let (adapter, logger) = adapter_for_pin(vec![0xAB; 16]);

        for method in [
            ChallengeMethod::ClientCertificate,
            ChallengeMethod::Other("ntlm".into()),
        ] {
            let challenge = TrustChallenge {
                method,
                chain: None,
            };
            assert_eq!(
                adapter.handle(&challenge),
                ChallengeDisposition::PerformDefaultHandling
            );
        }
        assert!(logger.error.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_trust_object_cancels() {
        let (adapter, logger) = adapter_for_pin(vec![0xAB; 16]);

        let challenge = TrustChallenge {
            method: ChallengeMethod::ServerTrust,
            chain: None,
        };
        assert_eq!(
            adapter.handle(&challenge),
            ChallengeDisposition::CancelChallenge
        );
        assert!(logger.error.lock().unwrap()[0].contains("No server trust available"));
    }
}
