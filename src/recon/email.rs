//! Email address lookup: hashes, provider, domain validation, link resources.

use super::ReconContext;
use crate::catalog::{render_all, Catalog, Link};
use crate::probe::dns::MxRecord;
use crate::types::EmailAddress;
use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Provider name reported for domains missing from the provider table.
pub const CUSTOM_PROVIDER: &str = "Custom/Corporate Domain";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailHashes {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl EmailHashes {
    /// Hash the trimmed, lower-cased address.
    pub fn of(address: &str) -> Self {
        let canonical = address.trim().to_lowercase();
        let bytes = canonical.as_bytes();

        Self {
            md5: format!("{:x}", Md5::digest(bytes)),
            sha1: format!("{:x}", Sha1::digest(bytes)),
            sha256: format!("{:x}", Sha256::digest(bytes)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ProviderInfo {
    pub fn detect(catalog: &Catalog, domain: &str) -> Self {
        match catalog.email_provider(domain) {
            Some(provider) => Self {
                name: provider.name.clone(),
                kind: provider.kind.clone(),
                country: provider.country.clone(),
            },
            None => Self {
                name: CUSTOM_PROVIDER.to_string(),
                kind: "Custom".to_string(),
                country: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainValidation {
    pub domain_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_ip: Option<String>,
    pub mx_records: Vec<MxRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailFindings {
    pub target: String,
    pub email: String,
    pub username: String,
    pub domain: String,
    pub hashes: EmailHashes,
    pub provider: ProviderInfo,
    pub validation: DomainValidation,
    pub breach_check: Vec<Link>,
    pub social_media: Vec<Link>,
    pub username_variations: Vec<String>,
}

pub async fn investigate(ctx: &ReconContext, email: &EmailAddress) -> EmailFindings {
    let hashes = EmailHashes::of(&email.address);
    let provider = ProviderInfo::detect(&ctx.catalog, &email.domain);
    let validation = validate_domain(ctx, &email.domain).await;

    let vars = [
        ("email", email.address.as_str()),
        ("md5", hashes.md5.as_str()),
    ];
    let breach_check = render_all(&ctx.catalog.resources.email_breach, &vars);
    let social_media = render_all(&ctx.catalog.resources.email_social, &vars);

    EmailFindings {
        target: email.address.clone(),
        email: email.address.clone(),
        username: email.local_part.clone(),
        domain: email.domain.clone(),
        username_variations: username_variations(&email.local_part),
        hashes,
        provider,
        validation,
        breach_check,
        social_media,
    }
}

/// Resolve the mail domain and collect its exchangers.
async fn validate_domain(ctx: &ReconContext, domain: &str) -> DomainValidation {
    let addrs = match ctx.resolver.lookup_ipv4(domain).await {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::debug!(domain, error = %e, "mail domain did not resolve");
            Vec::new()
        }
    };

    let Some(ip) = addrs.first() else {
        return DomainValidation::default();
    };

    let mx_records = ctx.resolver.mx(domain).await.unwrap_or_else(|e| {
        tracing::debug!(domain, error = %e, "MX lookup failed");
        Vec::new()
    });

    DomainValidation {
        domain_valid: true,
        domain_ip: Some(ip.to_string()),
        mx_records,
    }
}

/// Likely usernames derived from the local part, de-duplicated and sorted.
pub fn username_variations(local_part: &str) -> Vec<String> {
    let before_dot = local_part.split('.').next().unwrap_or(local_part);

    [
        local_part.to_string(),
        local_part.replace('.', ""),
        local_part.replace('_', ""),
        before_dot.to_string(),
    ]
    .into_iter()
    .filter(|v| !v.is_empty())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}
