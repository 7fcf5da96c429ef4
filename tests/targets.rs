//! Target normalization through the public API.

use lookout::error::ValidationError;
use lookout::types::{IpClass, Mode, Target};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_every_mode_normalizes() {
    let cases = [
        (Mode::Username, "  johndoe ", "johndoe"),
        (Mode::Email, "john.doe@example.com", "john.doe@example.com"),
        (Mode::Domain, "HTTPS://www.example.com/about", "example.com"),
        (Mode::Phone, "0812 3456 7890", "+6281234567890"),
        (Mode::Ip, " 192.168.1.10", "192.168.1.10"),
    ];

    for (mode, raw, expected) in cases {
        let target = Target::parse(mode, raw).unwrap();
        assert_eq!(target.mode(), mode);
        assert_eq!(target.normalized(), expected, "{} {:?}", mode, raw);
    }
}

#[test]
fn test_malformed_targets_are_refused() {
    assert!(matches!(
        Target::parse(Mode::Email, "john.doe"),
        Err(ValidationError::InvalidEmail(_))
    ));
    assert!(matches!(
        Target::parse(Mode::Ip, "10.0.0"),
        Err(ValidationError::InvalidIp(_))
    ));
    assert!(matches!(
        Target::parse(Mode::Phone, "n/a"),
        Err(ValidationError::InvalidPhone(_))
    ));
    assert!(matches!(
        Target::parse(Mode::Domain, "http://"),
        Err(ValidationError::Empty("domain"))
    ));
}

#[test]
fn test_photo_must_exist() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"not really an image").unwrap();

    let path = file.path().to_str().unwrap();
    assert!(matches!(Target::parse(Mode::Photo, path), Ok(Target::Photo(_))));

    let missing = format!("{}.missing", path);
    assert!(matches!(
        Target::parse(Mode::Photo, &missing),
        Err(ValidationError::PhotoNotFound(_))
    ));
}

#[test]
fn test_ip_class_is_reported_by_name() {
    let Target::Ip(ip) = Target::parse(Mode::Ip, "172.20.1.1").unwrap() else {
        panic!("expected an IP target");
    };

    assert_eq!(IpClass::of(ip), IpClass::PrivateB);
    assert_eq!(
        serde_json::to_value(IpClass::of(ip)).unwrap(),
        "Private (Class B)"
    );
}
