//! CLI subcommand definitions and handlers.
//!
//! One subcommand per lookup mode plus history:
//! - `lookout username <NAME>` - Platform presence for a username
//! - `lookout email <ADDRESS>` - Hashes, provider and domain checks
//! - `lookout domain <DOMAIN>` - DNS, web server, TLS and subdomains
//! - `lookout phone <NUMBER>` - Calling code and carrier
//! - `lookout ip <ADDRESS>` - Classification, reverse DNS and open ports
//! - `lookout photo <PATH>` - File hashes and EXIF metadata
//! - `lookout history` - List saved results
//!
//! Without a subcommand an interactive menu is shown.

mod history;
mod lookup;
pub mod menu;

pub use history::HistoryCommand;
pub use lookup::{LookupCommand, Session};

use crate::config::{AppSettings, Paths};
use crate::error::ConfigResult;
use crate::types::Mode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lookout - An OSINT reconnaissance tool.
///
/// Checks a username across public platforms, inspects email addresses,
/// domains, phone numbers and IPv4 addresses, and extracts metadata from
/// photos. Every lookup is saved as JSON and as an HTML report.
#[derive(Parser, Debug)]
#[command(name = "lookout")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An OSINT reconnaissance tool", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for results, reports and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Don't save results or reports
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Maximum number of platform checks in flight
    #[arg(short = 'c', long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long, global = true, value_name = "MS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Load settings and apply the command-line overrides.
    pub fn settings(&self, paths: &Paths) -> ConfigResult<AppSettings> {
        let mut settings = match self.config {
            Some(ref path) => AppSettings::load_from(path)?,
            None => AppSettings::load(paths)?,
        };

        if let Some(timeout) = self.timeout {
            settings = settings.with_probe_timeout(timeout);
        }
        if let Some(concurrency) = self.concurrency {
            settings.platform_concurrency = concurrency.max(1);
        }
        if self.insecure {
            settings.accept_invalid_certs = true;
        }
        if self.no_save {
            settings.save_results = false;
        }

        Ok(settings)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a username across public platforms
    #[command(alias = "u")]
    Username(LookupCommand),

    /// Inspect an email address
    #[command(alias = "e")]
    Email(LookupCommand),

    /// Inspect a domain
    #[command(alias = "d")]
    Domain(LookupCommand),

    /// Inspect a phone number
    #[command(alias = "p")]
    Phone(LookupCommand),

    /// Inspect an IPv4 address
    #[command(alias = "i")]
    Ip(LookupCommand),

    /// Extract metadata from a photo
    #[command(alias = "ph")]
    Photo(LookupCommand),

    /// View saved results
    #[command(alias = "h")]
    History(HistoryCommand),
}

impl Commands {
    /// The lookup mode and its target, if this is a lookup subcommand.
    pub fn lookup(&self) -> Option<(Mode, &LookupCommand)> {
        match self {
            Self::Username(cmd) => Some((Mode::Username, cmd)),
            Self::Email(cmd) => Some((Mode::Email, cmd)),
            Self::Domain(cmd) => Some((Mode::Domain, cmd)),
            Self::Phone(cmd) => Some((Mode::Phone, cmd)),
            Self::Ip(cmd) => Some((Mode::Ip, cmd)),
            Self::Photo(cmd) => Some((Mode::Photo, cmd)),
            Self::History(_) => None,
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mode_aliases() {
        let cli = Cli::try_parse_from(["lookout", "ph", "cat.jpg"]).unwrap();
        let command = cli.command.unwrap();
        let (mode, cmd) = command.lookup().unwrap();
        assert_eq!(mode, Mode::Photo);
        assert_eq!(cmd.target, "cat.jpg");

        let cli = Cli::try_parse_from(["lookout", "--output", "json", "i", "8.8.8.8"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.command.unwrap().lookup().unwrap().0, Mode::Ip);
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["lookout", "--quiet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }

    #[test]
    fn test_flags_override_settings() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::at(dir.path().join("config"), dir.path().join("data"));
        let cli = Cli::try_parse_from([
            "lookout",
            "username",
            "alice",
            "--insecure",
            "--no-save",
            "--timeout",
            "1500",
            "-c",
            "0",
        ])
        .unwrap();

        let settings = cli.settings(&paths).unwrap();
        assert!(settings.accept_invalid_certs);
        assert!(!settings.save_results);
        assert_eq!(settings.port_timeout_ms, 1500);
        assert_eq!(settings.platform_timeout_ms, 1500);
        assert_eq!(settings.platform_concurrency, 1);
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.json");
        std::fs::write(&file, r#"{"platform_concurrency": 5}"#).unwrap();
        let paths = Paths::at(dir.path().join("config"), dir.path().join("data"));

        let cli = Cli::try_parse_from([
            "lookout",
            "--config",
            file.to_str().unwrap(),
            "history",
        ])
        .unwrap();

        let settings = cli.settings(&paths).unwrap();
        assert_eq!(settings.platform_concurrency, 5);
        assert!(!settings.accept_invalid_certs);
    }
}
