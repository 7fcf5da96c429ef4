//! IPv4 lookup: classification, reverse DNS, well-known port scan.

use super::ReconContext;
use crate::catalog::{render_all, Link};
use crate::probe::{BoxedProbe, FanOut, ProbeResult, TcpConnectProbe};
use crate::types::IpClass;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenPort {
    pub port: u16,
    pub service: String,
    pub state: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct IpFindings {
    pub target: String,
    pub ip: String,
    #[serde(rename = "type")]
    pub class: IpClass,
    pub reverse_dns: Option<String>,
    /// Sorted by port.
    pub open_ports: Vec<OpenPort>,
    pub port_probes: Vec<ProbeResult>,
    pub intelligence_resources: Vec<Link>,
}

pub async fn investigate(ctx: &ReconContext, ip: Ipv4Addr) -> IpFindings {
    let class = IpClass::of(ip);
    tracing::info!(%ip, %class, "classified address");

    let reverse_dns = ctx.resolver.reverse(IpAddr::V4(ip)).await.unwrap_or_else(|e| {
        tracing::debug!(%ip, error = %e, "reverse lookup failed");
        None
    });

    let port_probes = scan_ports(ctx, ip).await;
    let open_ports = open_ports(&port_probes);

    let ip_text = ip.to_string();
    IpFindings {
        target: ip_text.clone(),
        class,
        reverse_dns,
        open_ports,
        port_probes,
        intelligence_resources: render_all(&ctx.catalog.resources.ip, &[("ip", ip_text.as_str())]),
        ip: ip_text,
    }
}

async fn scan_ports(ctx: &ReconContext, ip: Ipv4Addr) -> Vec<ProbeResult> {
    let timeout = ctx.settings.port_timeout();

    let probes: Vec<BoxedProbe> = ctx
        .catalog
        .ports
        .iter()
        .map(|entry| {
            let addr = SocketAddr::new(IpAddr::V4(ip), entry.port.as_u16());
            Box::new(TcpConnectProbe::new(addr, entry.service.clone()).with_timeout(timeout))
                as BoxedProbe
        })
        .collect();

    ctx.fan_out(FanOut::new(timeout), "ports").run(probes).await
}

fn open_ports(results: &[ProbeResult]) -> Vec<OpenPort> {
    let mut open: Vec<OpenPort> = results
        .iter()
        .filter(|r| r.is_found())
        .filter_map(|r| {
            let addr: SocketAddr = r.endpoint.parse().ok()?;
            Some(OpenPort {
                port: addr.port(),
                service: r.label.clone(),
                state: "open",
            })
        })
        .collect();
    open.sort_by_key(|p| p.port);
    open
}
