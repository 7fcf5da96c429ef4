//! Target types and normalizers.
//!
//! Every lookup starts from a raw user string tagged with a [`Mode`].
//! Normalization is pure and fails closed: a malformed target yields a
//! [`ValidationError`] rather than a guess.
//!
//! - Domains lose their scheme, `www.` prefix and path.
//! - Emails must match `local@domain.tld` (word characters, dot, hyphen).
//! - Phones keep digits and a leading `+`; local trunk prefixes are
//!   rewritten to international form.
//! - IPs must be dotted-quad IPv4 literals and are classified into
//!   reserved ranges.

use crate::error::ValidationError;
use ipnetwork::Ipv4Network;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.-]+)@([\w.-]+\.\w+)$").expect("email pattern is a valid regex")
});

/// The kind of target a lookup runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Username,
    Email,
    Domain,
    Phone,
    Ip,
    Photo,
}

impl Mode {
    /// All modes in menu order.
    pub const ALL: [Mode; 6] = [
        Mode::Username,
        Mode::Email,
        Mode::Domain,
        Mode::Phone,
        Mode::Ip,
        Mode::Photo,
    ];

    /// Lowercase name used in file names and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Domain => "domain",
            Self::Phone => "phone",
            Self::Ip => "ip",
            Self::Photo => "photo",
        }
    }

    /// Prompt shown by the interactive menu.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Username => "Enter username",
            Self::Email => "Enter email",
            Self::Domain => "Enter domain",
            Self::Phone => "Enter phone number",
            Self::Ip => "Enter IP address",
            Self::Photo => "Enter photo path",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('-').to_lowercase().as_str() {
            "username" | "u" => Ok(Self::Username),
            "email" | "e" => Ok(Self::Email),
            "domain" | "d" => Ok(Self::Domain),
            "phone" | "p" => Ok(Self::Phone),
            "ip" | "i" => Ok(Self::Ip),
            "photo" | "ph" => Ok(Self::Photo),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// A validated email address split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub address: String,
    pub local_part: String,
    pub domain: String,
}

impl EmailAddress {
    /// Parse and validate an email address.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let caps = EMAIL_PATTERN
            .captures(raw)
            .ok_or_else(|| ValidationError::InvalidEmail(raw.to_string()))?;

        Ok(Self {
            address: raw.to_string(),
            local_part: caps[1].to_string(),
            domain: caps[2].to_string(),
        })
    }
}

/// Strip scheme, `www.` and any path from a domain-like input.
pub fn normalize_domain(raw: &str) -> Result<String, ValidationError> {
    let mut rest = raw.trim();

    for prefix in ["http://", "https://", "www."] {
        if let Some(stripped) = strip_prefix_ignore_case(rest, prefix) {
            rest = stripped;
        }
    }

    let domain = rest.split('/').next().unwrap_or_default();

    if domain.is_empty() {
        return Err(ValidationError::Empty("domain"));
    }
    if !is_valid_hostname(domain) {
        return Err(ValidationError::InvalidDomain(raw.trim().to_string()));
    }

    Ok(domain.to_string())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

/// A local trunk prefix that maps to an international calling code.
struct TrunkRule {
    /// Leading digits that identify a local mobile number.
    local_prefix: &'static str,
    /// The part of `local_prefix` dropped when rewriting.
    trunk: &'static str,
    country_code: &'static str,
}

const TRUNK_RULES: &[TrunkRule] = &[TrunkRule {
    local_prefix: "08",
    trunk: "0",
    country_code: "+62",
}];

/// Calling codes accepted without the leading `+`.
const BARE_CODES: &[&str] = &["62"];

/// A cleaned phone number with its international form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneNumber {
    pub original: String,
    pub cleaned: String,
    pub normalized: String,
}

impl PhoneNumber {
    /// Clean a raw phone number and rewrite it to international form.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();

        let mut cleaned = String::with_capacity(trimmed.len());
        if trimmed.starts_with('+') {
            cleaned.push('+');
        }
        cleaned.extend(trimmed.chars().filter(|c| c.is_ascii_digit()));

        if cleaned.trim_start_matches('+').is_empty() {
            return Err(ValidationError::InvalidPhone(trimmed.to_string()));
        }

        let normalized = international_form(&cleaned);

        Ok(Self {
            original: trimmed.to_string(),
            cleaned,
            normalized,
        })
    }

    /// Number of digits in the normalized form.
    pub fn digit_count(&self) -> usize {
        self.normalized.chars().filter(|c| c.is_ascii_digit()).count()
    }

    /// Digits following the given calling code, if the number carries it.
    pub fn subscriber_part(&self, country_code: &str) -> Option<&str> {
        self.normalized.strip_prefix(country_code)
    }
}

fn international_form(cleaned: &str) -> String {
    if cleaned.starts_with('+') {
        return cleaned.to_string();
    }

    for rule in TRUNK_RULES {
        if let Some(rest) = cleaned.strip_prefix(rule.trunk) {
            if cleaned.starts_with(rule.local_prefix) {
                return format!("{}{}", rule.country_code, rest);
            }
        }
    }

    for code in BARE_CODES {
        if cleaned.starts_with(code) {
            return format!("+{}", cleaned);
        }
    }

    cleaned.to_string()
}

/// Reserved-range classification of an IPv4 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpClass {
    #[serde(rename = "Private (Class A)")]
    PrivateA,
    #[serde(rename = "Private (Class B)")]
    PrivateB,
    #[serde(rename = "Private (Class C)")]
    PrivateC,
    #[serde(rename = "Loopback")]
    Loopback,
    #[serde(rename = "Reserved/Multicast")]
    ReservedMulticast,
    #[serde(rename = "Public")]
    Public,
}

impl IpClass {
    /// Classify an IPv4 address.
    pub fn of(ip: Ipv4Addr) -> Self {
        let within = |network: [u8; 4], prefix: u8| {
            Ipv4Network::new(Ipv4Addr::from(network), prefix)
                .map(|net| net.contains(ip))
                .unwrap_or(false)
        };

        if within([10, 0, 0, 0], 8) {
            Self::PrivateA
        } else if within([172, 16, 0, 0], 12) {
            Self::PrivateB
        } else if within([192, 168, 0, 0], 16) {
            Self::PrivateC
        } else if within([127, 0, 0, 0], 8) {
            Self::Loopback
        } else if within([224, 0, 0, 0], 3) {
            Self::ReservedMulticast
        } else {
            Self::Public
        }
    }
}

impl fmt::Display for IpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrivateA => "Private (Class A)",
            Self::PrivateB => "Private (Class B)",
            Self::PrivateC => "Private (Class C)",
            Self::Loopback => "Loopback",
            Self::ReservedMulticast => "Reserved/Multicast",
            Self::Public => "Public",
        };
        f.write_str(name)
    }
}

/// Parse a dotted-quad IPv4 literal.
pub fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, ValidationError> {
    let raw = raw.trim();
    raw.parse::<Ipv4Addr>()
        .map_err(|_| ValidationError::InvalidIp(raw.to_string()))
}

/// A normalized target, created once per lookup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Username(String),
    Email(EmailAddress),
    Domain(String),
    Phone(PhoneNumber),
    Ip(Ipv4Addr),
    Photo(PathBuf),
}

impl Target {
    /// Validate and normalize a raw target for the given mode.
    pub fn parse(mode: Mode, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty(mode.as_str()));
        }

        match mode {
            Mode::Username => {
                if trimmed.chars().any(|c| c.is_whitespace() || "/?#".contains(c)) {
                    return Err(ValidationError::InvalidUsername(trimmed.to_string()));
                }
                Ok(Self::Username(trimmed.to_string()))
            }
            Mode::Email => EmailAddress::parse(trimmed).map(Self::Email),
            Mode::Domain => normalize_domain(trimmed).map(Self::Domain),
            Mode::Phone => PhoneNumber::parse(trimmed).map(Self::Phone),
            Mode::Ip => parse_ipv4(trimmed).map(Self::Ip),
            Mode::Photo => {
                let path = PathBuf::from(trimmed);
                if !path.is_file() {
                    return Err(ValidationError::PhotoNotFound(path));
                }
                Ok(Self::Photo(path))
            }
        }
    }

    /// The mode this target was parsed for.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Username(_) => Mode::Username,
            Self::Email(_) => Mode::Email,
            Self::Domain(_) => Mode::Domain,
            Self::Phone(_) => Mode::Phone,
            Self::Ip(_) => Mode::Ip,
            Self::Photo(_) => Mode::Photo,
        }
    }

    /// Canonical string form of the target.
    pub fn normalized(&self) -> String {
        match self {
            Self::Username(name) => name.clone(),
            Self::Email(email) => email.address.clone(),
            Self::Domain(domain) => domain.clone(),
            Self::Phone(phone) => phone.normalized.clone(),
            Self::Ip(ip) => ip.to_string(),
            Self::Photo(path) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_classification_boundaries() {
        let cases = [
            ("10.0.0.1", IpClass::PrivateA),
            ("172.16.0.1", IpClass::PrivateB),
            ("172.31.255.255", IpClass::PrivateB),
            ("172.32.0.1", IpClass::Public),
            ("192.168.1.1", IpClass::PrivateC),
            ("127.0.0.1", IpClass::Loopback),
            ("224.0.0.1", IpClass::ReservedMulticast),
            ("255.255.255.255", IpClass::ReservedMulticast),
            ("8.8.8.8", IpClass::Public),
        ];

        for (ip, expected) in cases {
            assert_eq!(IpClass::of(parse_ipv4(ip).unwrap()), expected, "{}", ip);
        }
    }

    #[test]
    fn test_ip_rejects_non_dotted_quad() {
        assert!(parse_ipv4("127.1").is_err());
        assert!(parse_ipv4("256.0.0.1").is_err());
        assert!(parse_ipv4("::1").is_err());
        assert!(parse_ipv4("example.com").is_err());
    }

    #[test]
    fn test_email_validation() {
        let email = EmailAddress::parse("user.name@example.com").unwrap();
        assert_eq!(email.local_part, "user.name");
        assert_eq!(email.domain, "example.com");

        assert!(EmailAddress::parse("not-an-email").is_err());
        assert!(EmailAddress::parse("@missing-local.com").is_err());
        assert!(EmailAddress::parse("user@").is_err());
        assert!(EmailAddress::parse("user@nodot").is_err());
    }

    #[test]
    fn test_domain_normalization() {
        assert_eq!(
            normalize_domain("https://www.Example.com/path").unwrap(),
            "Example.com"
        );
        assert_eq!(normalize_domain("http://example.org").unwrap(), "example.org");
        assert_eq!(normalize_domain("www.sub.example.net/").unwrap(), "sub.example.net");
        assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_domain_fails_closed() {
        assert!(normalize_domain("https://").is_err());
        assert!(normalize_domain("bad domain.com").is_err());
        assert!(normalize_domain("-leading.com").is_err());
    }

    #[test]
    fn test_phone_trunk_rewrite() {
        let phone = PhoneNumber::parse("081234567890").unwrap();
        assert_eq!(phone.cleaned, "081234567890");
        assert_eq!(phone.normalized, "+6281234567890");
        assert_eq!(phone.subscriber_part("+62"), Some("81234567890"));
    }

    #[test]
    fn test_phone_international_unchanged() {
        let phone = PhoneNumber::parse("+1 (415) 555-1234").unwrap();
        assert_eq!(phone.cleaned, "+14155551234");
        assert_eq!(phone.normalized, "+14155551234");
        assert_eq!(phone.digit_count(), 11);
    }

    #[test]
    fn test_phone_bare_country_code() {
        let phone = PhoneNumber::parse("62-812-3456-7890").unwrap();
        assert_eq!(phone.normalized, "+6281234567890");
    }

    #[test]
    fn test_phone_without_digits_rejected() {
        assert!(PhoneNumber::parse("+").is_err());
        assert!(PhoneNumber::parse("call me").is_err());
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!("-u".parse::<Mode>().unwrap(), Mode::Username);
        assert_eq!("PHOTO".parse::<Mode>().unwrap(), Mode::Photo);
        assert_eq!("ph".parse::<Mode>().unwrap(), Mode::Photo);
        assert!("fax".parse::<Mode>().is_err());
    }

    #[test]
    fn test_target_parse_dispatch() {
        let target = Target::parse(Mode::Domain, " https://www.rust-lang.org/learn ").unwrap();
        assert_eq!(target, Target::Domain("rust-lang.org".to_string()));
        assert_eq!(target.mode(), Mode::Domain);

        assert!(matches!(
            Target::parse(Mode::Username, "   "),
            Err(ValidationError::Empty("username"))
        ));
        assert!(Target::parse(Mode::Username, "john doe").is_err());
        assert!(Target::parse(Mode::Photo, "/definitely/not/here.jpg").is_err());
    }
}
