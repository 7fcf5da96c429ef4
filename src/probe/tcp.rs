//! TCP connect probe.
//!
//! Performs a plain TCP connect using the operating system's socket API.
//! A completed handshake marks the port open. Nothing is read from the
//! socket, so an open port says nothing about which service answers.

use crate::error::{ProbeError, ProbeResultOf};
use crate::probe::traits::{Evidence, Probe};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default connect timeout for port probes.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// TCP connect probe against one address.
pub struct TcpConnectProbe {
    addr: SocketAddr,
    service: String,
    timeout: Duration,
}

impl TcpConnectProbe {
    /// Create a new TCP connect probe.
    ///
    /// # Arguments
    /// * `addr` - Address and port to connect to
    /// * `service` - Conventional service name, used as the label
    pub fn new(addr: SocketAddr, service: impl Into<String>) -> Self {
        Self {
            addr,
            service: service.into(),
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self) -> ProbeResultOf<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => {
                let error_str = e.to_string().to_lowercase();
                if e.kind() == std::io::ErrorKind::ConnectionRefused || error_str.contains("refused") {
                    Err(ProbeError::ConnectionRefused)
                } else if error_str.contains("unreachable") {
                    Err(ProbeError::NetworkUnreachable(e.to_string()))
                } else {
                    Err(ProbeError::ConnectionFailed(format!("{}: {}", self.addr, e)))
                }
            }
            Err(_) => Err(ProbeError::Timeout),
        }
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    fn label(&self) -> &str {
        &self.service
    }

    fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    async fn probe(&self) -> ProbeResultOf<Evidence> {
        match self.attempt_connect().await {
            Ok(stream) => {
                drop(stream);
                Ok(Evidence::found().with_detail(self.service.clone()))
            }
            Err(ProbeError::ConnectionRefused) => Ok(Evidence::not_found()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{BoxedProbe, FanOut, ProbeOutcome};
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    #[test]
    fn test_probe_creation() {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 22);
        let probe = TcpConnectProbe::new(addr, "SSH");
        assert_eq!(probe.label(), "SSH");
        assert_eq!(probe.endpoint(), "127.0.0.1:22");
        assert_eq!(probe.port(), 22);
        assert_eq!(probe.timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_open_port_is_found() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpConnectProbe::new(addr, "test");
        let evidence = probe.probe().await.unwrap();
        assert!(evidence.found);
        assert_eq!(evidence.detail.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_refused_port_is_not_found() {
        // Bind then drop to get a port with nothing listening.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let probes: Vec<BoxedProbe> = vec![Box::new(
            TcpConnectProbe::new(addr, "closed").with_timeout(Duration::from_millis(500)),
        )];
        let results = FanOut::new(Duration::from_secs(2)).run(probes).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, ProbeOutcome::NotFound);
    }
}
