//! Probe trait abstraction.
//!
//! A probe is one independent network action against one endpoint. The
//! fan-out executor drives any mix of probes through this interface and
//! turns every outcome, including failures, into a [`ProbeResult`].

use crate::error::ProbeResultOf;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The endpoint answered with the success signal.
    Found,
    /// The endpoint answered, but without the success signal.
    NotFound,
    /// The probe could not determine anything (transport failure,
    /// timeout, panic).
    Error(String),
}

impl ProbeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => write!(f, "found"),
            Self::NotFound => write!(f, "not found"),
            Self::Error(reason) => write!(f, "error: {}", reason),
        }
    }
}

/// What a probe observed when it completed without a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    pub found: bool,
    /// Short observation (status code, resolved address, service name).
    pub detail: Option<String>,
}

impl Evidence {
    pub fn found() -> Self {
        Self {
            found: true,
            detail: None,
        }
    }

    pub fn not_found() -> Self {
        Self::default()
    }

    /// Attach an observation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Result of one probe. Created once by the executor, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub label: String,
    /// URL, `host:port` or hostname that was probed.
    pub endpoint: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

impl ProbeResult {
    /// Create a new probe result.
    pub fn new(label: impl Into<String>, endpoint: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            label: label.into(),
            endpoint: endpoint.into(),
            outcome,
            detail: None,
            elapsed_ms: 0,
        }
    }

    /// Set the detail.
    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }

    /// Set the elapsed time.
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn is_found(&self) -> bool {
        self.outcome.is_found()
    }
}

/// Trait for probe implementations.
///
/// # Example
///
/// ```ignore
/// use lookout::probe::{FanOut, Probe, TcpConnectProbe};
///
/// let probes: Vec<BoxedProbe> = vec![Box::new(TcpConnectProbe::new(addr, "SSH"))];
/// let results = FanOut::new(timeout).run(probes).await;
/// ```
#[async_trait]
pub trait Probe: Send + Sync {
    /// Human-readable name (platform, service, subdomain label).
    fn label(&self) -> &str;

    /// The endpoint this probe talks to.
    fn endpoint(&self) -> String;

    /// Perform the action once. Transport failures are returned as `Err`;
    /// an answer without the success signal is `Ok` with `found == false`.
    async fn probe(&self) -> ProbeResultOf<Evidence>;
}

/// A boxed probe for dynamic dispatch.
pub type BoxedProbe = Box<dyn Probe>;
