//! Domain lookup: resolution, record sets, web server, certificate,
//! subdomains.

use super::ReconContext;
use crate::catalog::{render_all, Link};
use crate::probe::dns::RECORD_TYPES;
use crate::probe::http::WebServerInfo;
use crate::probe::{
    fetch_certificate, BoxedProbe, CertificateInfo, FanOut, ProbeResult, SubdomainProbe, WebProbe,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::IpAddr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_dns: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Active,
    #[default]
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebServer {
    pub http: ServiceState,
    pub https: ServiceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
}

impl WebServer {
    /// Merge one scheme's answer; the first `Server` header seen wins.
    fn record(&mut self, scheme: &str, info: Option<WebServerInfo>) {
        let Some(info) = info else {
            return;
        };

        match scheme {
            "https" => self.https = ServiceState::Active,
            _ => self.http = ServiceState::Active,
        }
        if self.server.is_none() {
            self.server = info.server;
        }
        for tech in info.technologies {
            if !self.technologies.contains(&tech) {
                self.technologies.push(tech);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainFindings {
    pub target: String,
    pub domain: String,
    pub ip_info: IpInfo,
    /// Record type to rendered records; types without records are omitted.
    pub dns_records: BTreeMap<String, Vec<String>>,
    pub web_server: WebServer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<CertificateInfo>,
    /// Sorted fully qualified names.
    pub subdomains: Vec<String>,
    pub subdomain_probes: Vec<ProbeResult>,
    pub resources: Vec<Link>,
    /// Set when resolution failed and the lookup stopped early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_error: Option<String>,
}

impl DomainFindings {
    fn new(domain: &str) -> Self {
        Self {
            target: domain.to_string(),
            domain: domain.to_string(),
            ip_info: IpInfo::default(),
            dns_records: BTreeMap::new(),
            web_server: WebServer::default(),
            ssl: None,
            subdomains: Vec::new(),
            subdomain_probes: Vec::new(),
            resources: Vec::new(),
            resolution_error: None,
        }
    }
}

pub async fn investigate(ctx: &ReconContext, domain: &str) -> DomainFindings {
    let mut findings = DomainFindings::new(domain);
    findings.resources = render_all(&ctx.catalog.resources.domain, &[("domain", domain)]);

    let ipv4 = match ctx.resolver.lookup_ipv4(domain).await {
        Ok(addrs) => addrs.first().copied(),
        Err(e) => {
            findings.resolution_error = Some(e.to_string());
            None
        }
    };
    let Some(ipv4) = ipv4 else {
        tracing::warn!(domain, "domain does not resolve, stopping lookup");
        findings
            .resolution_error
            .get_or_insert_with(|| "no A records".to_string());
        return findings;
    };

    findings.ip_info.ipv4 = Some(ipv4.to_string());
    findings.ip_info.reverse_dns = ctx
        .resolver
        .reverse(IpAddr::V4(ipv4))
        .await
        .unwrap_or_else(|e| {
            tracing::debug!(%ipv4, error = %e, "reverse lookup failed");
            None
        });

    findings.dns_records = record_sets(ctx, domain).await;
    findings.web_server = detect_web_server(ctx, domain).await;

    if findings.web_server.https == ServiceState::Active {
        match fetch_certificate(
            domain,
            443,
            ctx.settings.tls_timeout(),
            ctx.settings.accept_invalid_certs,
        )
        .await
        {
            Ok(cert) => findings.ssl = Some(cert),
            Err(e) => tracing::info!(domain, error = %e, "certificate check failed"),
        }
    }

    let (subdomains, probes) = discover_subdomains(ctx, domain).await;
    findings.subdomains = subdomains;
    findings.subdomain_probes = probes;

    findings
}

async fn record_sets(ctx: &ReconContext, domain: &str) -> BTreeMap<String, Vec<String>> {
    let lookups = RECORD_TYPES
        .iter()
        .map(|&record_type| async move { (record_type, ctx.resolver.records(domain, record_type).await) });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(record_type, result)| match result {
            Ok(records) if !records.is_empty() => Some((record_type.to_string(), records)),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(domain, %record_type, error = %e, "record lookup failed");
                None
            }
        })
        .collect()
}

async fn detect_web_server(ctx: &ReconContext, domain: &str) -> WebServer {
    let mut web = WebServer::default();

    for scheme in ["http", "https"] {
        let probe = WebProbe::new(ctx.client.clone(), scheme, domain);
        let info = match probe.inspect().await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(domain, scheme, error = %e, "web server inactive");
                None
            }
        };
        web.record(scheme, info);
    }

    web
}

async fn discover_subdomains(ctx: &ReconContext, domain: &str) -> (Vec<String>, Vec<ProbeResult>) {
    let probes: Vec<BoxedProbe> = ctx
        .catalog
        .subdomains
        .iter()
        .map(|label| Box::new(SubdomainProbe::new(ctx.resolver.clone(), label, domain)) as BoxedProbe)
        .collect();

    let results = ctx
        .fan_out(FanOut::new(ctx.settings.dns_timeout()), "subdomains")
        .run(probes)
        .await;

    let mut found: Vec<String> = results
        .iter()
        .filter(|r| r.is_found())
        .map(|r| r.endpoint.clone())
        .collect();
    found.sort();

    (found, results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(server: Option<&str>, tech: &[&str]) -> Option<WebServerInfo> {
        Some(WebServerInfo {
            url: "http://example.com".to_string(),
            status: 200,
            server: server.map(str::to_string),
            technologies: tech.iter().map(|t| t.to_string()).collect(),
        })
    }

    #[test]
    fn test_web_server_merge() {
        let mut web = WebServer::default();
        web.record("http", info(Some("nginx"), &["X-Powered-By: PHP/8.2"]));
        web.record("https", info(Some("cloudflare"), &["X-Powered-By: PHP/8.2"]));

        assert_eq!(web.http, ServiceState::Active);
        assert_eq!(web.https, ServiceState::Active);
        assert_eq!(web.server.as_deref(), Some("nginx"));
        assert_eq!(web.technologies.len(), 1);
    }

    #[test]
    fn test_inactive_scheme() {
        let mut web = WebServer::default();
        web.record("http", None);
        web.record("https", info(None, &[]));

        assert_eq!(web.http, ServiceState::Inactive);
        assert_eq!(web.https, ServiceState::Active);
        assert_eq!(serde_json::to_value(&web).unwrap()["http"], "inactive");
    }
}
