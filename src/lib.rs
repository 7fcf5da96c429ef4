//! # lookout - An OSINT Reconnaissance Tool
//!
//! lookout gathers public information about a single target: a username,
//! an email address, a domain, a phone number, an IPv4 address or a photo.
//!
//! ## Features
//!
//! - **Username**: presence checks across public platforms plus search dorks
//! - **Email**: hashes, provider detection, MX records and breach-check links
//! - **Domain**: DNS records, web server detection, TLS certificate, subdomains
//! - **Phone**: calling code, carrier and card type
//! - **IP**: reserved-range classification, reverse DNS and common open ports
//! - **Photo**: file hashes, EXIF tags and GPS coordinates
//! - **Reports**: every lookup saved as JSON and rendered as HTML
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use lookout::catalog::Catalog;
//! use lookout::config::AppSettings;
//! use lookout::recon::{self, ReconContext};
//! use lookout::types::{Mode, Target};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ReconContext::new(AppSettings::default(), Catalog::builtin()?)?;
//!     let target = Target::parse(Mode::Ip, "8.8.8.8")?;
//!
//!     let findings = recon::investigate(&ctx, &target).await?;
//!     println!("{}", serde_json::to_string_pretty(&findings)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target normalizers, modes and session ids
//! - [`catalog`] - Static tables (platforms, ports, providers, carriers, links)
//! - [`probe`] - The `Probe` trait, the fan-out executor and network probes
//! - [`recon`] - One lookup procedure per mode
//! - [`report`] - Report envelope, JSON store and HTML reports
//! - [`config`] - Paths and settings
//! - [`logging`] - Tracing subscriber with a daily log file
//! - [`error`] - Error types
//! - [`output`] - Console output formatting
//! - [`cli`] - Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod probe;
pub mod recon;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ProbeError, ValidationError};
pub use probe::{FanOut, Probe, ProbeOutcome, ProbeResult};
pub use recon::{Findings, ReconContext};
pub use report::ScanReport;
pub use types::{Mode, SessionId, Target};
