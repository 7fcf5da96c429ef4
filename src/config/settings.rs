//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and saved artifacts.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/lookout)
    pub config_dir: PathBuf,
    /// Root for saved results, reports and logs (~/.local/share/lookout)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve paths using XDG directories. `output_dir` replaces the data
    /// root when given.
    pub fn resolve(output_dir: Option<&Path>) -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "lookout", "lookout")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: output_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project.data_dir().to_path_buf()),
        })
    }

    /// Paths rooted at explicit directories.
    pub fn at(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the path to the catalog override directory.
    pub fn catalog_dir(&self) -> PathBuf {
        self.config_dir.join("catalog")
    }

    /// Get the path to the JSON results directory.
    pub fn results_dir(&self) -> PathBuf {
        self.data_dir.join("results")
    }

    /// Get the path to the HTML reports directory.
    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }

    /// Get the path to the log directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Timeout for each platform presence check, in milliseconds.
    pub platform_timeout_ms: u64,
    /// Platform checks allowed in flight at once.
    pub platform_concurrency: usize,
    /// Timeout for web server detection, in milliseconds.
    pub web_timeout_ms: u64,
    /// Timeout for each port connect, in milliseconds.
    pub port_timeout_ms: u64,
    /// Timeout for each DNS query, in milliseconds.
    pub dns_timeout_ms: u64,
    /// Timeout for the TLS handshake, in milliseconds.
    pub tls_timeout_ms: u64,
    /// Accept invalid TLS certificates. Must be opted into.
    pub accept_invalid_certs: bool,
    /// Write JSON results and HTML reports after each scan.
    pub save_results: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            platform_timeout_ms: 8000,
            platform_concurrency: 20,
            web_timeout_ms: 10_000,
            port_timeout_ms: 2000,
            dns_timeout_ms: 5000,
            tls_timeout_ms: 10_000,
            accept_invalid_certs: false,
            save_results: true,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no file exists.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let file = paths.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Use one timeout for every per-probe network action.
    pub fn with_probe_timeout(mut self, timeout_ms: u64) -> Self {
        self.platform_timeout_ms = timeout_ms;
        self.web_timeout_ms = timeout_ms;
        self.port_timeout_ms = timeout_ms;
        self.dns_timeout_ms = timeout_ms;
        self.tls_timeout_ms = timeout_ms;
        self
    }

    pub fn platform_timeout(&self) -> Duration {
        Duration::from_millis(self.platform_timeout_ms)
    }

    pub fn web_timeout(&self) -> Duration {
        Duration::from_millis(self.web_timeout_ms)
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_millis(self.port_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    pub fn tls_timeout(&self) -> Duration {
        Duration::from_millis(self.tls_timeout_ms)
    }
}
