// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rustls Verifier
//!
//! Plugs the pinning engine into rustls as a custom certificate
//! verifier. The pin match is the trust decision; handshake signature
//! checks use the crypto provider's default algorithms. Chain
//! evaluation against a root store (expiry, signatures, revocation)
//! stays with the platform collaborator.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, Error as TlsError, SignatureScheme};

use pinlock_core::PinningManager;

use crate::error::ClientError;
use crate::extract;

/// Certificate verifier that accepts a server iff its presented chain
/// passes pinning validation.
#[derive(Debug)]
pub struct PinnedServerVerifier {
    manager: Arc<PinningManager>,
    provider: Arc<CryptoProvider>,
}

impl PinnedServerVerifier {
    /// Creates a verifier over the given manager using the ring
    /// crypto provider.
    pub fn new(manager: Arc<PinningManager>) -> Self {
        PinnedServerVerifier {
            manager,
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        }
    }
}

impl ServerCertVerifier for PinnedServerVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        let ders = std::iter::once(end_entity.as_ref())
            .chain(intermediates.iter().map(|cert| cert.as_ref()));
        let chain = extract::chain_from_der(ders);

        self.manager
            .validate(&chain)
            .map_err(|err| TlsError::General(err.to_string()))?;

        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Builds a rustls client config that trusts only pinned servers.
pub fn pinned_client_config(manager: Arc<PinningManager>) -> Result<ClientConfig, ClientError> {
    let verifier = PinnedServerVerifier::new(manager);
    let provider = verifier.provider.clone();

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ClientError::Tls(e.to_string()))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Ok(config)
}
