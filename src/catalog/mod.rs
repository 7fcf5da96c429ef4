//! Static catalogs consulted by the lookups.
//!
//! Every table ships embedded in the binary as JSON and can be replaced
//! wholesale by a file of the same name in the user's catalog directory
//! (`<config>/catalog/<table>.json`). Tables are read once at startup and
//! never mutated.

mod platforms;
mod ports;
mod resources;
mod tables;

pub use platforms::{Platform, SuccessSignal};
pub use ports::{PortTable, WellKnownPort};
pub use resources::{render_all, Link, LinkTemplate, Resources};
pub use tables::{CallingCode, CarrierPrefix, EmailProvider};

use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const PLATFORMS: &str = include_str!("../../data/platforms.json");
const PORTS: &str = include_str!("../../data/ports.json");
const SUBDOMAINS: &str = include_str!("../../data/subdomains.json");
const EMAIL_PROVIDERS: &str = include_str!("../../data/email_providers.json");
const CALLING_CODES: &str = include_str!("../../data/calling_codes.json");
const CARRIERS: &str = include_str!("../../data/carriers.json");
const RESOURCES: &str = include_str!("../../data/resources.json");

/// All lookup tables used by a session.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Username presence checks.
    pub platforms: Vec<Platform>,
    /// Ports probed by the IP lookup.
    pub ports: PortTable,
    /// Labels tried during subdomain discovery.
    pub subdomains: Vec<String>,
    pub email_providers: Vec<EmailProvider>,
    /// Calling codes, matched in table order.
    pub calling_codes: Vec<CallingCode>,
    pub carriers: Vec<CarrierPrefix>,
    /// Link templates printed alongside the findings.
    pub resources: Resources,
}

impl Catalog {
    /// Load the embedded tables only.
    pub fn builtin() -> ConfigResult<Self> {
        Self::load(None)
    }

    /// Load the embedded tables, replacing any that have an override file
    /// in `override_dir`.
    pub fn load(override_dir: Option<&Path>) -> ConfigResult<Self> {
        let loader = TableLoader { dir: override_dir };

        Ok(Self {
            platforms: loader.table("platforms", PLATFORMS)?,
            ports: loader.table("ports", PORTS)?,
            subdomains: loader.table("subdomains", SUBDOMAINS)?,
            email_providers: loader.table("email_providers", EMAIL_PROVIDERS)?,
            calling_codes: loader.table("calling_codes", CALLING_CODES)?,
            carriers: loader.table("carriers", CARRIERS)?,
            resources: loader.table("resources", RESOURCES)?,
        })
    }
}

struct TableLoader<'a> {
    dir: Option<&'a Path>,
}

impl TableLoader<'_> {
    fn table<T: DeserializeOwned>(&self, name: &str, builtin: &str) -> ConfigResult<T> {
        if let Some(dir) = self.dir {
            let path = dir.join(format!("{}.json", name));
            if path.is_file() {
                let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                tracing::info!(table = name, path = %path.display(), "using catalog override");
                return parse_table(name, &content);
            }
        }

        parse_table(name, builtin)
    }
}

fn parse_table<T: DeserializeOwned>(name: &str, content: &str) -> ConfigResult<T> {
    serde_json::from_str(content).map_err(|e| ConfigError::InvalidCatalog {
        table: name.to_string(),
        reason: e.to_string(),
    })
}

/// Substitute `{key}` placeholders in a catalog template.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{}}}", key), value)
    })
}
