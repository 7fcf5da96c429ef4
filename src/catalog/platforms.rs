//! Username presence catalog entries.

use super::render_template;
use serde::{Deserialize, Serialize};

/// One platform checked for a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    /// Profile URL template with a `{username}` placeholder.
    pub url: String,
    #[serde(default)]
    pub success: SuccessSignal,
}

impl Platform {
    /// Build the profile URL for a username.
    pub fn profile_url(&self, username: &str) -> String {
        render_template(&self.url, &[("username", username)])
    }
}

/// What a response must look like for the profile to count as present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuccessSignal {
    /// The final response status equals `code`.
    Status {
        #[serde(default = "default_status")]
        code: u16,
    },
    /// HTTP 200 and the body does not contain `marker`.
    BodyLacks { marker: String },
}

fn default_status() -> u16 {
    200
}

impl Default for SuccessSignal {
    fn default() -> Self {
        Self::Status {
            code: default_status(),
        }
    }
}

impl SuccessSignal {
    /// Whether evaluating this signal requires the response body.
    pub fn needs_body(&self) -> bool {
        matches!(self, Self::BodyLacks { .. })
    }

    /// Evaluate the signal against a response.
    pub fn matches(&self, status: u16, body: Option<&str>) -> bool {
        match self {
            Self::Status { code } => status == *code,
            Self::BodyLacks { marker } => {
                status == 200 && body.is_some_and(|b| !b.contains(marker.as_str()))
            }
        }
    }
}
