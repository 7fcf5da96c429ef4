//! TLS certificate retrieval.
//!
//! Opens a verifying TLS session (unless invalid certificates were
//! explicitly allowed) and summarizes the peer's leaf certificate.

use crate::error::{ProbeError, ProbeResultOf};
use serde::Serialize;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use x509_parser::parse_x509_certificate;

/// Summary of a server certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub version: u32,
    pub not_before: String,
    pub not_after: String,
    pub serial_number: String,
}

impl CertificateInfo {
    /// Parse a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> ProbeResultOf<Self> {
        let (_, cert) =
            parse_x509_certificate(der).map_err(|e| ProbeError::Certificate(e.to_string()))?;

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            version: cert.version().0 + 1,
            not_before: cert.validity().not_before.to_string(),
            not_after: cert.validity().not_after.to_string(),
            serial_number: cert.raw_serial_as_string(),
        })
    }
}

/// Connect to `host:port`, complete a TLS handshake and return the peer
/// certificate.
pub async fn fetch_certificate(
    host: &str,
    port: u16,
    limit: Duration,
    accept_invalid_certs: bool,
) -> ProbeResultOf<CertificateInfo> {
    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()?;
    let connector = tokio_native_tls::TlsConnector::from(connector);

    let stream = timeout(limit, TcpStream::connect((host, port)))
        .await
        .map_err(|_| ProbeError::Timeout)??;
    let tls = timeout(limit, connector.connect(host, stream))
        .await
        .map_err(|_| ProbeError::Timeout)??;

    let cert = tls
        .get_ref()
        .peer_certificate()?
        .ok_or_else(|| ProbeError::Certificate("server sent no certificate".to_string()))?;
    let der = cert.to_der()?;

    tracing::debug!(host, port, bytes = der.len(), "retrieved peer certificate");
    CertificateInfo::from_der(&der)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_der_is_rejected() {
        let err = CertificateInfo::from_der(&[0x30, 0x03, 0x01, 0x01]).unwrap_err();
        assert!(matches!(err, ProbeError::Certificate(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_an_error() {
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let result = fetch_certificate("127.0.0.1", addr.port(), Duration::from_secs(1), false).await;
        assert!(result.is_err());
    }
}
