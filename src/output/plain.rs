//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::catalog::Link;
use crate::recon::domain::ServiceState;
use crate::recon::phone::LengthCheck;
use crate::recon::{
    DomainFindings, EmailFindings, Findings, IpFindings, PhoneFindings, PhotoFindings,
    UsernameFindings,
};
use crate::report::{Artifacts, ScanReport};
use crate::types::Mode;
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// EXIF tags shown in plain output; the rest stay in the saved report.
const IMPORTANT_TAGS: [&str; 7] = [
    "Make",
    "Model",
    "DateTime",
    "DateTimeOriginal",
    "Software",
    "Artist",
    "Copyright",
];

/// Print findings in human-readable plain text format.
pub fn write_plain<W: Write>(
    out: &mut W,
    findings: &Findings,
    report: &ScanReport,
    artifacts: &Artifacts,
) -> io::Result<()> {
    match findings {
        Findings::Username(f) => username(out, f)?,
        Findings::Email(f) => email(out, f)?,
        Findings::Domain(f) => domain(out, f)?,
        Findings::Phone(f) => phone(out, f)?,
        Findings::Ip(f) => ip(out, f)?,
        Findings::Photo(f) => photo(out, f)?,
    }

    footer(out, report, artifacts)
}

fn username<W: Write>(out: &mut W, f: &UsernameFindings) -> io::Result<()> {
    section(out, "Platform presence")?;
    for profile in &f.found {
        writeln!(out, "  {} {}: {}", style("[✓]").green().bold(), profile.platform, profile.url)?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", style(format!("Found on {} platforms", f.total_found)).green())?;
    writeln!(out, "  {}", style(format!("Not found on {} platforms", f.not_found_count)).red())?;
    writeln!(out, "  {}", style(format!("Errors: {}", f.errors.len())).yellow())?;
    for error in &f.errors {
        writeln!(out, "      {} {}", style(&error.platform).dim(), style(&error.error).dim())?;
    }

    section(out, "Google dorks")?;
    for dork in &f.google_dorks {
        writeln!(out, "  {} {}", style("→").cyan(), dork.url)?;
    }
    links(out, "Other search engines", &f.search_engines)
}

fn email<W: Write>(out: &mut W, f: &EmailFindings) -> io::Result<()> {
    section(out, "Address")?;
    field(out, "Username", &f.username)?;
    field(out, "Domain", &f.domain)?;

    section(out, "Hashes")?;
    field(out, "MD5", &f.hashes.md5)?;
    field(out, "SHA1", &f.hashes.sha1)?;
    field(out, "SHA256", &f.hashes.sha256)?;

    section(out, "Provider")?;
    field(out, "Provider", &f.provider.name)?;
    field(out, "Type", &f.provider.kind)?;
    if let Some(ref country) = f.provider.country {
        field(out, "Country", country)?;
    }

    section(out, "Domain validation")?;
    match f.validation.domain_ip {
        Some(ref ip) => {
            status(out, true, &format!("Domain resolves to: {}", ip))?;
            if f.validation.mx_records.is_empty() {
                status(out, false, "No MX records found")?;
            }
            for mx in &f.validation.mx_records {
                writeln!(out, "      Priority {}: {}", mx.priority, mx.exchange)?;
            }
        }
        None => status(out, false, "Domain cannot be resolved")?,
    }

    links(out, "Data breach check resources", &f.breach_check)?;
    links(out, "Social media & web presence", &f.social_media)?;

    section(out, "Possible username variations")?;
    for variation in &f.username_variations {
        writeln!(out, "  {} {}", style("•").yellow(), variation)?;
    }
    Ok(())
}

fn domain<W: Write>(out: &mut W, f: &DomainFindings) -> io::Result<()> {
    section(out, "IP resolution")?;
    match (&f.ip_info.ipv4, &f.resolution_error) {
        (Some(ip), _) => status(out, true, &format!("IPv4: {}", ip))?,
        (None, Some(err)) => status(out, false, &format!("Cannot resolve domain: {}", err))?,
        (None, None) => status(out, false, "Cannot resolve domain")?,
    }
    match f.ip_info.reverse_dns {
        Some(ref name) => status(out, true, &format!("Reverse DNS: {}", name))?,
        None if f.ip_info.ipv4.is_some() => status(out, false, "No reverse DNS")?,
        None => {}
    }

    if !f.dns_records.is_empty() {
        section(out, "DNS records")?;
        for (record_type, records) in &f.dns_records {
            writeln!(out, "  {}", style(format!("{} records:", record_type)).green())?;
            for record in records {
                writeln!(out, "      {}", record)?;
            }
        }
    }

    if f.ip_info.ipv4.is_some() {
        section(out, "Web server")?;
        let web = &f.web_server;
        for (scheme, state) in [("HTTP", web.http), ("HTTPS", web.https)] {
            let active = state == ServiceState::Active;
            status(out, active, &format!("{}: {}", scheme, if active { "active" } else { "inactive" }))?;
        }
        if let Some(ref server) = web.server {
            writeln!(out, "      Server: {}", server)?;
        }
        for tech in &web.technologies {
            writeln!(out, "      {}", tech)?;
        }

        if let Some(ref cert) = f.ssl {
            section(out, "TLS certificate")?;
            field(out, "Subject", &cert.subject)?;
            field(out, "Issuer", &cert.issuer)?;
            field(out, "Valid from", &cert.not_before)?;
            field(out, "Valid until", &cert.not_after)?;
        }

        section(out, "Subdomains")?;
        for name in &f.subdomains {
            status(out, true, name)?;
        }
        writeln!(out, "  {}", style(format!("Found {} subdomains", f.subdomains.len())).green())?;
    }

    links(out, "External resources", &f.resources)
}

fn phone<W: Write>(out: &mut W, f: &PhoneFindings) -> io::Result<()> {
    section(out, "Number")?;
    field(out, "Cleaned", &f.cleaned)?;
    field(out, "Normalized", &f.normalized)?;
    if let Some(ref country) = f.country {
        field(out, "Country", country)?;
    }
    if let Some(ref provider) = f.provider {
        field(out, "Provider", provider)?;
    }
    if let Some(ref card) = f.card_type {
        field(out, "Card type", card)?;
    }
    match f.validation.length {
        LengthCheck::Valid => status(out, true, "Length: valid (10+ digits)")?,
        LengthCheck::Invalid => status(out, false, "Length: invalid (under 10 digits)")?,
    }

    links(out, "Phone lookup resources", &f.lookup_resources)
}

fn ip<W: Write>(out: &mut W, f: &IpFindings) -> io::Result<()> {
    section(out, "Address")?;
    field(out, "Type", &f.class.to_string())?;
    match f.reverse_dns {
        Some(ref name) => status(out, true, &format!("Hostname: {}", name))?,
        None => status(out, false, "No reverse DNS record")?,
    }

    section(out, "Open ports")?;
    if f.open_ports.is_empty() {
        status(out, false, "No common ports open")?;
    }
    for port in &f.open_ports {
        writeln!(
            out,
            "  {} Port {:>5} ({:<15}) {}",
            style("[✓]").green().bold(),
            port.port,
            port.service,
            style("OPEN").green()
        )?;
    }

    links(out, "IP intelligence resources", &f.intelligence_resources)
}

fn photo<W: Write>(out: &mut W, f: &PhotoFindings) -> io::Result<()> {
    section(out, "File information")?;
    field(out, "Filename", &f.file_info.filename)?;
    field(out, "Size", &format!("{} KB", f.file_info.size_kb))?;
    if let Some(ref dimensions) = f.file_info.dimensions {
        field(out, "Dimensions", dimensions)?;
    }
    if let Some(ref format) = f.file_info.format {
        field(out, "Format", format)?;
    }

    section(out, "File hashes")?;
    field(out, "MD5", &f.hashes.md5)?;
    field(out, "SHA256", &f.hashes.sha256)?;

    section(out, "EXIF data")?;
    if f.exif_data.is_empty() && f.gps_data.is_empty() {
        status(out, false, "No EXIF data found")?;
    }
    for tag in IMPORTANT_TAGS {
        if let Some(value) = f.exif_data.get(tag) {
            field(out, tag, value)?;
        }
    }
    if let Some(ref gps) = f.gps_decimal {
        status(out, true, "GPS location found")?;
        writeln!(out, "      Latitude: {}", gps.latitude)?;
        writeln!(out, "      Longitude: {}", gps.longitude)?;
        writeln!(out, "      {}", style(&gps.map_url).cyan())?;
    }

    links(out, "Reverse image search", &f.reverse_search)
}

fn footer<W: Write>(out: &mut W, report: &ScanReport, artifacts: &Artifacts) -> io::Result<()> {
    let probes = &report.metadata.probes;

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    if probes.total > 0 {
        writeln!(
            out,
            "  {} {} checked: {} found, {} not found, {} errors",
            style("Summary:").bold(),
            probes.total,
            style(probes.found).green().bold(),
            style(probes.not_found).red(),
            style(probes.errors).yellow()
        )?;
    }
    writeln!(
        out,
        "  {} {}  {} {}",
        style("Duration:").bold(),
        report.metadata.scan_duration,
        style("Session:").bold(),
        style(report.session_id.short()).dim()
    )?;
    if let Some(ref path) = artifacts.json {
        writeln!(out, "  {} Results saved: {}", style("✓").green().bold(), path.display())?;
    }
    if let Some(ref path) = artifacts.html {
        writeln!(out, "  {} HTML report generated: {}", style("✓").green().bold(), path.display())?;
    }
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(format!("[*] {}", title)).bold())
}

fn field<W: Write>(out: &mut W, name: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {} {}", style(format!("{}:", name)).bold(), value)
}

fn status<W: Write>(out: &mut W, ok: bool, message: &str) -> io::Result<()> {
    if ok {
        writeln!(out, "  {} {}", style("[✓]").green().bold(), message)
    } else {
        writeln!(out, "  {} {}", style("[!]").yellow().bold(), message)
    }
}

fn links<W: Write>(out: &mut W, title: &str, links: &[Link]) -> io::Result<()> {
    if links.is_empty() {
        return Ok(());
    }
    section(out, title)?;
    for link in links {
        writeln!(out, "  {} {}: {}", style("→").cyan(), link.name, style(&link.url).cyan())?;
    }
    Ok(())
}

/// Print a lookup header before probing begins.
pub fn print_lookup_header(mode: Mode, target: &str) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("lookout").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{} Mode: {}", style("•").dim(), style(mode).yellow());
    println!("{} Target: {}", style("•").dim(), style(target).white().bold());
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
