//! The persisted scan report envelope.

use crate::error::StorageResult;
use crate::probe::ProbeSummary;
use crate::recon::Findings;
use crate::types::{Mode, SessionId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tool name recorded in report metadata.
pub const TOOL_NAME: &str = "lookout";

/// Timestamp format used in artifact file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tool: String,
    pub version: String,
    /// Wall-clock duration, formatted as seconds (`"1.23s"`).
    pub scan_duration: String,
    pub probes: ProbeSummary,
}

/// One lookup against one target, assembled after every probe has finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub session_id: SessionId,
    pub timestamp: DateTime<Local>,
    pub mode: Mode,
    pub target: String,
    /// The full findings record.
    pub data: serde_json::Value,
    pub metadata: ReportMetadata,
}

impl ScanReport {
    /// Build the envelope for a finished lookup.
    pub fn new(session_id: SessionId, findings: &Findings, duration: Duration) -> StorageResult<Self> {
        Ok(Self {
            session_id,
            timestamp: Local::now(),
            mode: findings.mode(),
            target: findings.target().to_string(),
            data: serde_json::to_value(findings)?,
            metadata: ReportMetadata {
                tool: TOOL_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                scan_duration: format!("{:.2}s", duration.as_secs_f64()),
                probes: findings.summary(),
            },
        })
    }

    /// Timestamp component shared by the JSON and HTML file names.
    pub fn file_stamp(&self) -> String {
        self.timestamp.format(FILE_STAMP_FORMAT).to_string()
    }

    /// A one-line summary for history listings.
    pub fn summary(&self) -> String {
        format!(
            "{} {} [{}] {} found, {} errors in {}",
            self.mode,
            self.target,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.metadata.probes.found,
            self.metadata.probes.errors,
            self.metadata.scan_duration
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::catalog::Catalog;
    use crate::recon::phone;
    use crate::types::PhoneNumber;

    /// A report built from an offline phone lookup.
    pub fn phone_report() -> ScanReport {
        let catalog = Catalog::builtin().unwrap();
        let number = PhoneNumber::parse("081234567890").unwrap();
        let findings = Findings::Phone(phone::investigate(&catalog, &number));
        ScanReport::new(SessionId::new(), &findings, Duration::from_millis(1234)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::phone_report;

    #[test]
    fn test_envelope_keys() {
        let report = phone_report();
        let json = serde_json::to_value(&report).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(keys, vec!["data", "metadata", "mode", "session_id", "target", "timestamp"]);
        assert_eq!(json["mode"], "phone");
        assert_eq!(json["target"], "+6281234567890");
        assert_eq!(json["metadata"]["scan_duration"], "1.23s");
        assert_eq!(json["data"]["provider"], "Telkomsel");
    }

    #[test]
    fn test_file_stamp_shape() {
        let stamp = phone_report().file_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_report_reloads() {
        let report = phone_report();
        let json = serde_json::to_string(&report).unwrap();
        let parsed: super::ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.session_id, report.session_id);
        assert_eq!(parsed.metadata, report.metadata);
    }
}
