// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinning Manager
//!
//! Orchestrates pinning validation with a single strategy. The manager
//! is immutable after construction - the strategy and logger are
//! assigned once - so concurrent validations need no locking.

use std::fmt;
use std::sync::Arc;

use crate::chain::CertificateChain;
use crate::logging::{Logger, TracingLogger};
use crate::pinning::{PinningError, PinningStrategy};

/// Owns exactly one pinning strategy and exposes the validation entry
/// point consumed by the handshake-challenge collaborator.
///
/// Created once per trust domain and shared (`Arc`) across however
/// many handshakes are in flight. Each `validate` call is an
/// independent run; no state persists between calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pinlock_core::{
///     CertificateChain, ChainEntry, PinScope, PinSet, PinningManager, PinningStrategy,
/// };
///
/// let pinned = vec![0x30, 0x82, 0x01, 0x0A];
/// let manager = Arc::new(PinningManager::new(PinningStrategy::certificate(
///     PinSet::new(vec![pinned.clone()]),
///     PinScope::Leaf,
/// )));
/// let chain = CertificateChain::new(vec![ChainEntry::new(pinned)]);
/// assert!(manager.validate(&chain).is_ok());
/// ```
pub struct PinningManager {
    strategy: PinningStrategy,
    logger: Arc<dyn Logger>,
}

impl PinningManager {
    /// Creates a manager with the default `tracing`-backed logger.
    pub fn new(strategy: PinningStrategy) -> Self {
        Self::with_logger(strategy, Arc::new(TracingLogger))
    }

    /// Creates a manager with an injected logger.
    pub fn with_logger(strategy: PinningStrategy, logger: Arc<dyn Logger>) -> Self {
        PinningManager { strategy, logger }
    }

    /// Validates a server-presented chain using the owned strategy.
    ///
    /// Success is logged at debug level; failures are logged at error
    /// level with their description and propagated unchanged. Never
    /// retried internally - retry is the transport layer's policy.
    pub fn validate(&self, chain: &CertificateChain) -> Result<(), PinningError> {
        match self.strategy.validate(chain) {
            Ok(()) => {
                self.logger.log_debug("pinning validation succeeded");
                Ok(())
            }
            Err(err) => {
                self.logger
                    .log_error(&format!("pinning validation failed: {}", err));
                Err(err)
            }
        }
    }

    /// The strategy this manager validates with.
    pub fn strategy(&self) -> &PinningStrategy {
        &self.strategy
    }
}

impl fmt::Debug for PinningManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinningManager")
            .field("strategy", &self.strategy)
            .finish()
    }
}
