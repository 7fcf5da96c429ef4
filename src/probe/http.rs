//! HTTP probes: platform presence and web server detection.

use crate::catalog::Platform;
use crate::error::{ConfigError, ConfigResult, ProbeResultOf};
use crate::probe::traits::{Evidence, Probe};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Response headers that reveal the technology stack.
const TECH_HEADERS: [&str; 3] = ["X-Powered-By", "X-AspNet-Version", "X-Framework"];

/// Shared HTTP client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Skip certificate verification. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
        }
    }
}

/// Build the client shared by every HTTP probe in a session.
pub fn build_client(config: &ClientConfig) -> ConfigResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification disabled");
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Checks whether a username exists on one platform.
pub struct PlatformProbe {
    client: Client,
    platform: Platform,
    url: String,
}

impl PlatformProbe {
    pub fn new(client: Client, platform: Platform, username: &str) -> Self {
        let url = platform.profile_url(username);
        Self {
            client,
            platform,
            url,
        }
    }
}

#[async_trait]
impl Probe for PlatformProbe {
    fn label(&self) -> &str {
        &self.platform.name
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }

    async fn probe(&self) -> ProbeResultOf<Evidence> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status().as_u16();

        let body = if self.platform.success.needs_body() {
            Some(response.text().await?)
        } else {
            None
        };

        let evidence = if self.platform.success.matches(status, body.as_deref()) {
            Evidence::found()
        } else {
            Evidence::not_found()
        };
        Ok(evidence.with_detail(status.to_string()))
    }
}

/// What a web server revealed about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebServerInfo {
    pub url: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
}

/// Fetches a site root and records its status and identifying headers.
pub struct WebProbe {
    client: Client,
    label: String,
    url: String,
}

impl WebProbe {
    pub fn new(client: Client, scheme: &str, domain: &str) -> Self {
        Self {
            client,
            label: scheme.to_uppercase(),
            url: format!("{}://{}", scheme, domain),
        }
    }

    /// Fetch the site and read its headers. Only a success or redirect
    /// status counts as a live server.
    pub async fn inspect(&self) -> ProbeResultOf<WebServerInfo> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let headers = response.headers();

        let header_text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let technologies = TECH_HEADERS
            .into_iter()
            .filter_map(|name| header_text(name).map(|v| format!("{}: {}", name, v)))
            .collect();

        Ok(WebServerInfo {
            url: self.url.clone(),
            status: response.status().as_u16(),
            server: header_text("Server"),
            technologies,
        })
    }
}

#[async_trait]
impl Probe for WebProbe {
    fn label(&self) -> &str {
        &self.label
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }

    async fn probe(&self) -> ProbeResultOf<Evidence> {
        let info = self.inspect().await?;
        let detail = match info.server {
            Some(server) => format!("{} ({})", info.status, server),
            None => info.status.to_string(),
        };
        Ok(Evidence::found().with_detail(detail))
    }
}
