//! Report assembly and persistence.
//!
//! Writing artifacts never fails a lookup: a report that cannot be saved
//! is logged and reported as a missing path.

mod envelope;
pub mod html;
mod json_store;

pub use envelope::{ReportMetadata, ScanReport, FILE_STAMP_FORMAT, TOOL_NAME};
pub use html::HtmlReporter;
pub use json_store::ResultStore;

#[cfg(test)]
pub(crate) use envelope::fixtures;

use crate::config::Paths;
use std::path::PathBuf;

/// Paths of the artifacts written for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
}

/// Writes the JSON result and HTML report for each finished lookup.
#[derive(Debug, Clone)]
pub struct Reporter {
    results: ResultStore,
    html: HtmlReporter,
    enabled: bool,
}

impl Reporter {
    pub fn new(paths: &Paths) -> Self {
        Self {
            results: ResultStore::new(paths.results_dir()),
            html: HtmlReporter::new(paths.reports_dir()),
            enabled: true,
        }
    }

    /// Skip writing artifacts entirely.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn store(&self) -> &ResultStore {
        &self.results
    }

    /// Write both artifacts. Failures are logged and yield `None`.
    pub fn persist(&self, report: &ScanReport) -> Artifacts {
        if !self.enabled {
            return Artifacts::default();
        }

        let json = match self.results.save(report) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "results saved");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not save results");
                None
            }
        };

        let html = match self.html.save(report) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "HTML report generated");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not write HTML report");
                None
            }
        };

        Artifacts { json, html }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::envelope::fixtures::phone_report;
    use std::fs;

    #[test]
    fn test_persist_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(&Paths::at(dir.path(), dir.path()));

        let artifacts = reporter.persist(&phone_report());
        assert!(artifacts.json.unwrap().starts_with(dir.path().join("results")));
        assert!(artifacts.html.unwrap().starts_with(dir.path().join("reports")));
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the data root should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let reporter = Reporter::new(&Paths::at(dir.path(), &blocker));

        let artifacts = reporter.persist(&phone_report());
        assert_eq!(artifacts, Artifacts::default());
    }

    #[test]
    fn test_disabled_reporter_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(&Paths::at(dir.path(), dir.path())).disabled();

        assert_eq!(reporter.persist(&phone_report()), Artifacts::default());
        assert!(!dir.path().join("results").exists());
    }
}
