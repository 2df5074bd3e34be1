// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pinned WebSocket Connector
//!
//! Connects to a relay over wss:// with the pinning verifier deciding
//! trust, or over ws:// for local development. The TLS handshake runs
//! lazily during the WebSocket upgrade.

use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use tungstenite::client::IntoClientRequest;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::WebSocket;
use url::Url;

use pinlock_core::PinningManager;

use crate::error::ClientError;
use crate::verifier::pinned_client_config;

/// Connects a WebSocket with certificate pinning.
///
/// For `wss://` URLs every handshake is validated by the manager's
/// strategy; a chain that matches no pin aborts the connection. Plain
/// `ws://` URLs skip TLS entirely (development only).
pub fn connect_pinned(
    url_str: &str,
    manager: Arc<PinningManager>,
) -> Result<WebSocket<MaybeTlsStream<TcpStream>>, ClientError> {
    let url =
        Url::parse(url_str).map_err(|e| ClientError::Connection(format!("invalid URL: {}", e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| ClientError::Connection("no host in URL".into()))?
        .to_string();
    let is_tls = match url.scheme() {
        "wss" => true,
        "ws" => false,
        other => {
            return Err(ClientError::Connection(format!(
                "invalid URL scheme '{}' (expected ws:// or wss://)",
                other
            )))
        }
    };
    let port = url.port().unwrap_or(if is_tls { 443 } else { 80 });

    let tcp_stream = TcpStream::connect((host.as_str(), port))
        .map_err(|e| ClientError::Connection(format!("TCP connection failed: {}", e)))?;

    let stream = if is_tls {
        let config = pinned_client_config(manager)?;
        let server_name: ServerName<'_> = host
            .as_str()
            .try_into()
            .map_err(|_| ClientError::Connection(format!("invalid server name: {}", host)))?;
        let tls_conn = rustls::ClientConnection::new(Arc::new(config), server_name.to_owned())
            .map_err(|e| ClientError::Tls(format!("TLS setup failed: {}", e)))?;
        MaybeTlsStream::Rustls(rustls::StreamOwned::new(tls_conn, tcp_stream))
    } else {
        MaybeTlsStream::Plain(tcp_stream)
    };

    let request = url_str
        .into_client_request()
        .map_err(|e| ClientError::Connection(format!("invalid WebSocket request: {}", e)))?;

    let (socket, _) = tungstenite::client(request, stream).map_err(|e| {
        ClientError::Tls(format!(
            "handshake failed (certificate pinning may have rejected the server): {}",
            e
        ))
    })?;

    Ok(socket)
}
