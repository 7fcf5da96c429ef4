//! Enrichment tables: email providers, calling codes, carrier prefixes.
//!
//! Lookups are pure. Where entries could overlap, the first matching entry
//! in table order wins.

use super::Catalog;
use serde::{Deserialize, Serialize};

/// A known email provider, keyed by exact domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailProvider {
    pub domain: String,
    pub name: String,
    /// Free, Encrypted, ...
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// An international calling code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallingCode {
    /// Code including the leading `+`.
    pub code: String,
    pub country: String,
}

/// A mobile carrier identified by the digits after the calling code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierPrefix {
    pub country_code: String,
    pub prefix: String,
    pub carrier: String,
    pub card_type: String,
}

impl Catalog {
    /// Exact, case-insensitive match on the email domain.
    pub fn email_provider(&self, domain: &str) -> Option<&EmailProvider> {
        self.email_providers
            .iter()
            .find(|p| p.domain.eq_ignore_ascii_case(domain))
    }

    /// First calling code (in table order) that prefixes the number.
    pub fn calling_code(&self, international: &str) -> Option<&CallingCode> {
        self.calling_codes
            .iter()
            .find(|c| international.starts_with(c.code.as_str()))
    }

    /// First carrier whose prefix starts the subscriber digits.
    pub fn carrier(&self, country_code: &str, subscriber: &str) -> Option<&CarrierPrefix> {
        self.carriers
            .iter()
            .filter(|c| c.country_code == country_code)
            .find(|c| subscriber.starts_with(c.prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let gmail = catalog.email_provider("Gmail.com").unwrap();
        assert_eq!(gmail.name, "Google Gmail");
        assert_eq!(gmail.country.as_deref(), Some("USA"));
        assert!(catalog.email_provider("example.com").is_none());
    }

    #[test]
    fn test_calling_code_lookup() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.calling_code("+14155551234").unwrap().country, "USA/Canada");
        assert_eq!(catalog.calling_code("+6281234567890").unwrap().country, "Indonesia");
        assert_eq!(catalog.calling_code("+6591234567").unwrap().country, "Singapore");
        assert!(catalog.calling_code("+49301234567").is_none());
    }

    #[test]
    fn test_calling_code_first_match_wins() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.calling_codes.insert(
            0,
            CallingCode {
                code: "+6".to_string(),
                country: "Shadowing".to_string(),
            },
        );
        assert_eq!(catalog.calling_code("+6281234567890").unwrap().country, "Shadowing");
    }

    #[test]
    fn test_carrier_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let carrier = catalog.carrier("+62", "81234567890").unwrap();
        assert_eq!(carrier.carrier, "Telkomsel");
        assert_eq!(carrier.card_type, "simPATI");
        assert_eq!(catalog.carrier("+62", "8881234567").unwrap().carrier, "Smartfren");
        assert!(catalog.carrier("+1", "81234567890").is_none());
        assert!(catalog.carrier("+62", "21345678").is_none());
    }
}
