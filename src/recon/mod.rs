//! Per-mode lookup procedures.
//!
//! Each mode turns a normalized [`Target`] into a typed findings record.
//! Network-facing steps go through the shared [`ReconContext`]: one HTTP
//! client, one resolver and one catalog per session.

pub mod domain;
pub mod email;
pub mod ip;
pub mod phone;
pub mod photo;
pub mod username;

pub use domain::DomainFindings;
pub use email::EmailFindings;
pub use ip::IpFindings;
pub use phone::PhoneFindings;
pub use photo::PhotoFindings;
pub use username::UsernameFindings;

use crate::catalog::Catalog;
use crate::config::AppSettings;
use crate::error::{ConfigResult, ProbeResultOf};
use crate::probe::{build_client, ClientConfig, DnsResolver, FanOut, ProbeResult, ProbeSummary};
use crate::types::{Mode, Target};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

/// Shared state for every lookup in a session.
#[derive(Clone)]
pub struct ReconContext {
    pub settings: AppSettings,
    pub catalog: Arc<Catalog>,
    pub client: Client,
    pub resolver: DnsResolver,
    show_progress: bool,
}

impl ReconContext {
    /// Build the HTTP client and resolver from the settings.
    pub fn new(settings: AppSettings, catalog: Catalog) -> ConfigResult<Self> {
        let client = build_client(&ClientConfig {
            timeout: settings.web_timeout(),
            accept_invalid_certs: settings.accept_invalid_certs,
            ..ClientConfig::default()
        })?;
        let resolver = DnsResolver::new(settings.dns_timeout());

        Ok(Self {
            settings,
            catalog: Arc::new(catalog),
            client,
            resolver,
            show_progress: false,
        })
    }

    /// Draw progress bars during fan-outs.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn fan_out(&self, fanout: FanOut, message: &str) -> FanOut {
        if self.show_progress {
            fanout.with_progress(message)
        } else {
            fanout
        }
    }
}

/// Findings of one lookup, one variant per mode.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Findings {
    Username(UsernameFindings),
    Email(EmailFindings),
    Domain(DomainFindings),
    Phone(PhoneFindings),
    Ip(IpFindings),
    Photo(PhotoFindings),
}

impl Findings {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Username(_) => Mode::Username,
            Self::Email(_) => Mode::Email,
            Self::Domain(_) => Mode::Domain,
            Self::Phone(_) => Mode::Phone,
            Self::Ip(_) => Mode::Ip,
            Self::Photo(_) => Mode::Photo,
        }
    }

    /// The normalized target the findings describe.
    pub fn target(&self) -> &str {
        match self {
            Self::Username(f) => &f.target,
            Self::Email(f) => &f.target,
            Self::Domain(f) => &f.target,
            Self::Phone(f) => &f.target,
            Self::Ip(f) => &f.target,
            Self::Photo(f) => &f.target,
        }
    }

    /// Fan-out results collected by the lookup (empty for modes without one).
    pub fn probes(&self) -> &[ProbeResult] {
        match self {
            Self::Username(f) => &f.probes,
            Self::Domain(f) => &f.subdomain_probes,
            Self::Ip(f) => &f.port_probes,
            Self::Email(_) | Self::Phone(_) | Self::Photo(_) => &[],
        }
    }

    pub fn summary(&self) -> ProbeSummary {
        ProbeSummary::of(self.probes())
    }
}

/// Run the lookup for a normalized target.
pub async fn investigate(ctx: &ReconContext, target: &Target) -> ProbeResultOf<Findings> {
    tracing::info!(mode = %target.mode(), target = %target.normalized(), "lookup started");

    let findings = match target {
        Target::Username(name) => Findings::Username(username::investigate(ctx, name).await),
        Target::Email(address) => Findings::Email(email::investigate(ctx, address).await),
        Target::Domain(name) => Findings::Domain(domain::investigate(ctx, name).await),
        Target::Phone(number) => Findings::Phone(phone::investigate(&ctx.catalog, number)),
        Target::Ip(addr) => Findings::Ip(ip::investigate(ctx, *addr).await),
        Target::Photo(path) => Findings::Photo(photo::investigate(&ctx.catalog, path).await?),
    };

    let summary = findings.summary();
    tracing::info!(
        mode = %findings.mode(),
        probes = summary.total,
        found = summary.found,
        errors = summary.errors,
        "lookup finished"
    );

    Ok(findings)
}
