//! TLS transport
//!
//! Servers are verified against the platform's native root store, the same
//! roots a browser on the host would trust.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{self, ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

use crate::error::IrcError;

/// Client config with native roots and the ring crypto provider.
pub fn client_config() -> Result<ClientConfig, IrcError> {
    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        warn!(error = %err, "Skipping unreadable native certificate");
    }

    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    debug!(added, ignored, "Loaded native root certificates");
    if roots.is_empty() {
        return Err(IrcError::Tls("no usable root certificates found".to_string()));
    }

    let config = ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .map_err(|e| IrcError::Tls(e.to_string()))?
    .with_root_certificates(roots)
    .with_no_client_auth();
    Ok(config)
}

/// Name the certificate must be valid for.
pub fn server_name(host: &str) -> Result<ServerName<'static>, IrcError> {
    ServerName::try_from(host.to_string())
        .map_err(|_| IrcError::Tls(format!("invalid server name {host:?}")))
}

/// Run the TLS handshake over an established TCP connection.
pub async fn handshake(tcp: TcpStream, host: &str) -> Result<TlsStream<TcpStream>, IrcError> {
    let name = server_name(host)?;
    let connector = TlsConnector::from(Arc::new(client_config()?));
    connector
        .connect(name, tcp)
        .await
        .map_err(|source| IrcError::Handshake {
            host: host.to_string(),
            source,
        })
}
