//! Username presence across the platform catalog.

use super::ReconContext;
use crate::catalog::{render_all, render_template, Link};
use crate::probe::{BoxedProbe, FanOut, PlatformProbe, ProbeOutcome, ProbeResult};
use serde::Serialize;

/// Search-engine dorks, `{username}` substituted.
const DORKS: [&str; 10] = [
    "\"{username}\" ",
    "\"{username}\" site:twitter.com OR site:instagram.com OR site:facebook.com",
    "\"{username}\" site:linkedin.com",
    "\"{username}\" site:github.com OR site:gitlab.com",
    "\"{username}\" filetype:pdf",
    "intext:\"{username}\" site:pastebin.com",
    "\"{username}\" inurl:profile",
    "\"{username}\" inurl:user",
    "\"{username}\" site:reddit.com",
    "\"{username}\" (contact OR email OR phone)",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundProfile {
    pub platform: String,
    pub url: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformError {
    pub platform: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchDork {
    pub query: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameFindings {
    pub target: String,
    /// Sorted by platform name.
    pub found: Vec<FoundProfile>,
    pub total_found: usize,
    pub total_checked: usize,
    pub not_found_count: usize,
    pub errors: Vec<PlatformError>,
    pub google_dorks: Vec<SearchDork>,
    pub search_engines: Vec<Link>,
    pub probes: Vec<ProbeResult>,
}

pub async fn investigate(ctx: &ReconContext, username: &str) -> UsernameFindings {
    let platforms = &ctx.catalog.platforms;
    tracing::info!(username, platforms = platforms.len(), "checking platforms");

    let probes: Vec<BoxedProbe> = platforms
        .iter()
        .map(|platform| {
            Box::new(PlatformProbe::new(ctx.client.clone(), platform.clone(), username))
                as BoxedProbe
        })
        .collect();

    let fanout = FanOut::new(ctx.settings.platform_timeout())
        .with_window(ctx.settings.platform_concurrency);
    let results = ctx.fan_out(fanout, "platforms").run(probes).await;

    let mut findings = summarize(username, results);
    findings.google_dorks = google_dorks(username);
    findings.search_engines = render_all(
        &ctx.catalog.resources.username_search,
        &[("username", username)],
    );
    findings
}

/// Split fan-out results into found, absent and failed platforms.
fn summarize(username: &str, probes: Vec<ProbeResult>) -> UsernameFindings {
    let mut found = Vec::new();
    let mut errors = Vec::new();
    let mut not_found_count = 0;

    for result in &probes {
        match &result.outcome {
            ProbeOutcome::Found => found.push(FoundProfile {
                platform: result.label.clone(),
                url: result.endpoint.clone(),
                status_code: result
                    .detail
                    .as_deref()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(200),
            }),
            ProbeOutcome::NotFound => not_found_count += 1,
            ProbeOutcome::Error(reason) => errors.push(PlatformError {
                platform: result.label.clone(),
                error: reason.clone(),
            }),
        }
    }

    found.sort_by(|a, b| a.platform.cmp(&b.platform));
    errors.sort_by(|a, b| a.platform.cmp(&b.platform));

    UsernameFindings {
        target: username.to_string(),
        total_found: found.len(),
        total_checked: probes.len(),
        not_found_count,
        found,
        errors,
        google_dorks: Vec::new(),
        search_engines: Vec::new(),
        probes,
    }
}

/// Dork queries with ready-made Google search URLs.
pub fn google_dorks(username: &str) -> Vec<SearchDork> {
    DORKS
        .iter()
        .map(|template| {
            let query = render_template(template, &[("username", username)]);
            let url = format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(&query)
            );
            SearchDork { query, url }
        })
        .collect()
}
