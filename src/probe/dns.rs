//! DNS lookups: forward, reverse, record sets and subdomain probes.

use crate::error::ProbeResultOf;
use crate::probe::traits::{Evidence, Probe};
use async_trait::async_trait;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

/// Record sets collected for a domain.
pub const RECORD_TYPES: [RecordType; 7] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::MX,
    RecordType::NS,
    RecordType::TXT,
    RecordType::SOA,
    RecordType::CNAME,
];

/// A mail exchanger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
}

/// Async resolver shared by a session.
#[derive(Clone)]
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Create a resolver using the default upstream servers, one attempt per
    /// query.
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            inner: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }

    /// IPv4 addresses for a host. An empty answer is not an error.
    pub async fn lookup_ipv4(&self, host: &str) -> ProbeResultOf<Vec<Ipv4Addr>> {
        match self.inner.lookup_ip(host).await {
            Ok(response) => Ok(response
                .iter()
                .filter_map(|ip| match ip {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => None,
                })
                .collect()),
            Err(e) if is_no_records(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// First PTR name for an address, without the trailing dot.
    pub async fn reverse(&self, ip: IpAddr) -> ProbeResultOf<Option<String>> {
        match self.inner.reverse_lookup(ip).await {
            Ok(response) => Ok(response.iter().next().map(|name| trim_root(&name.to_string()))),
            Err(e) if is_no_records(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every record of one type, rendered as text.
    pub async fn records(&self, name: &str, record_type: RecordType) -> ProbeResultOf<Vec<String>> {
        match self.inner.lookup(name, record_type).await {
            Ok(response) => Ok(response.iter().map(|rdata| rdata.to_string()).collect()),
            Err(e) if is_no_records(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Mail exchangers, lowest priority first.
    pub async fn mx(&self, name: &str) -> ProbeResultOf<Vec<MxRecord>> {
        match self.inner.mx_lookup(name).await {
            Ok(response) => {
                let mut records: Vec<MxRecord> = response
                    .iter()
                    .map(|mx| MxRecord {
                        priority: mx.preference(),
                        exchange: trim_root(&mx.exchange().to_string()),
                    })
                    .collect();
                records.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.exchange.cmp(&b.exchange)));
                Ok(records)
            }
            Err(e) if is_no_records(&e) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

fn trim_root(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Resolves `<label>.<domain>`; any A record counts as found.
pub struct SubdomainProbe {
    resolver: DnsResolver,
    label: String,
    host: String,
}

impl SubdomainProbe {
    pub fn new(resolver: DnsResolver, label: &str, domain: &str) -> Self {
        Self {
            resolver,
            label: label.to_string(),
            host: format!("{}.{}", label, domain),
        }
    }
}

#[async_trait]
impl Probe for SubdomainProbe {
    fn label(&self) -> &str {
        &self.label
    }

    fn endpoint(&self) -> String {
        self.host.clone()
    }

    async fn probe(&self) -> ProbeResultOf<Evidence> {
        let addrs = self.resolver.lookup_ipv4(&self.host).await?;
        Ok(match addrs.first() {
            Some(ip) => Evidence::found().with_detail(ip.to_string()),
            None => Evidence::not_found(),
        })
    }
}
