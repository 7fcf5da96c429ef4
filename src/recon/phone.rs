//! Phone number lookup. Pure table lookups, no network.

use crate::catalog::{render_all, Catalog, Link};
use crate::types::PhoneNumber;
use serde::Serialize;

/// Minimum digit count for a plausible subscriber number.
pub const MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthCheck {
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneValidation {
    pub length: LengthCheck,
    pub digits: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneFindings {
    pub target: String,
    pub original: String,
    pub cleaned: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    pub validation: PhoneValidation,
    pub lookup_resources: Vec<Link>,
}

pub fn investigate(catalog: &Catalog, phone: &PhoneNumber) -> PhoneFindings {
    let calling_code = catalog.calling_code(&phone.normalized);

    let carrier = calling_code.and_then(|code| {
        phone
            .subscriber_part(&code.code)
            .filter(|digits| digits.len() >= 3)
            .and_then(|digits| catalog.carrier(&code.code, digits))
    });

    let digits = phone.digit_count();
    let phone_digits = phone.normalized.replace('+', "");
    let phone_escaped = phone.normalized.replace('+', "%2B");
    let lookup_resources = render_all(
        &catalog.resources.phone,
        &[
            ("phone_digits", phone_digits.as_str()),
            ("phone_escaped", phone_escaped.as_str()),
            ("phone", phone.normalized.as_str()),
        ],
    );

    PhoneFindings {
        target: phone.normalized.clone(),
        original: phone.original.clone(),
        cleaned: phone.cleaned.clone(),
        normalized: phone.normalized.clone(),
        country: calling_code.map(|c| c.country.clone()),
        country_code: calling_code.map(|c| c.code.clone()),
        provider: carrier.map(|c| c.carrier.clone()),
        card_type: carrier.map(|c| c.card_type.clone()),
        validation: PhoneValidation {
            length: if digits >= MIN_DIGITS {
                LengthCheck::Valid
            } else {
                LengthCheck::Invalid
            },
            digits,
        },
        lookup_resources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(raw: &str) -> PhoneFindings {
        let catalog = Catalog::builtin().unwrap();
        investigate(&catalog, &PhoneNumber::parse(raw).unwrap())
    }

    #[test]
    fn test_indonesian_local_number() {
        let findings = lookup("0812-3456-7890");
        assert_eq!(findings.normalized, "+6281234567890");
        assert_eq!(findings.country.as_deref(), Some("Indonesia"));
        assert_eq!(findings.country_code.as_deref(), Some("+62"));
        assert_eq!(findings.provider.as_deref(), Some("Telkomsel"));
        assert_eq!(findings.card_type.as_deref(), Some("simPATI"));
        assert_eq!(findings.validation.length, LengthCheck::Valid);
    }

    #[test]
    fn test_prefix_with_zero_digit() {
        // Subscriber digits after +62 start with 8, 0 must not be stripped.
        let findings = lookup("+62 895 0123 4567");
        assert_eq!(findings.provider.as_deref(), Some("Tri Indonesia"));
    }

    #[test]
    fn test_foreign_number_has_no_carrier() {
        let findings = lookup("+1 (415) 555-1234");
        assert_eq!(findings.country.as_deref(), Some("USA/Canada"));
        assert_eq!(findings.provider, None);
        assert_eq!(findings.validation.digits, 11);
    }

    #[test]
    fn test_short_number_is_invalid() {
        let findings = lookup("12345");
        assert_eq!(findings.validation.length, LengthCheck::Invalid);
        assert_eq!(findings.country, None);
    }

    #[test]
    fn test_lookup_links() {
        let findings = lookup("+6281234567890");
        let urls: Vec<_> = findings.lookup_resources.iter().map(|l| l.url.as_str()).collect();
        assert!(urls.contains(&"https://www.truecaller.com/search/%2B6281234567890"));
        assert!(urls.contains(&"https://wa.me/6281234567890"));
        assert!(urls.contains(&"https://www.numlookup.com/?phone=+6281234567890"));
    }
}
