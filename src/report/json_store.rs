//! JSON-based scan result storage.
//!
//! Stores each report as a separate pretty-printed JSON file named
//! `<mode>_<YYYYmmdd_HHMMSS>.json`. Files are written once and only read
//! back for history listings.

use super::envelope::ScanReport;
use crate::error::{StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// JSON file-based result storage.
#[derive(Debug, Clone)]
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    /// Create a result store rooted at `results_dir`. The directory is
    /// created on first save.
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.results_dir
    }

    /// Save a report and return the file written.
    pub fn save(&self, report: &ScanReport) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.results_dir)
            .map_err(|e| StorageError::DirectoryError(e.to_string()))?;

        let stem = format!("{}_{}", report.mode, report.file_stamp());
        let file = unique_path(&self.results_dir, &stem, "json");
        let content = serde_json::to_string_pretty(report)?;

        fs::write(&file, content).map_err(|e| StorageError::SaveFailed(e.to_string()))?;
        Ok(file)
    }

    /// Load a saved report.
    pub fn load(&self, file: &Path) -> StorageResult<ScanReport> {
        let content =
            fs::read_to_string(file).map_err(|e| StorageError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StorageError::LoadFailed(e.to_string()))
    }

    /// List saved result files, most recent first. A missing directory is
    /// an empty history.
    pub fn list(&self) -> StorageResult<Vec<PathBuf>> {
        if !self.results_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();

        for entry in fs::read_dir(&self.results_dir)
            .map_err(|e| StorageError::DirectoryError(e.to_string()))?
        {
            let entry = entry.map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                files.push((modified, path));
            }
        }

        // Sort by date, most recent first
        files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    /// List the most recent `count` result files.
    pub fn list_recent(&self, count: usize) -> StorageResult<Vec<PathBuf>> {
        let mut files = self.list()?;
        files.truncate(count);
        Ok(files)
    }
}

/// `<dir>/<stem>.<ext>`, or `<stem>_<n>.<ext>` when that name is taken.
pub(crate) fn unique_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{}.{}", stem, ext));
    if !first.exists() {
        return first;
    }

    (1..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::envelope::fixtures::phone_report;

    #[test]
    fn test_save_names_file_by_mode_and_stamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results"));
        let report = phone_report();

        let file = store.save(&report).unwrap();
        let name = file.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(name, format!("phone_{}.json", report.file_stamp()));
        assert_eq!(store.load(&file).unwrap().target, report.target);
    }

    #[test]
    fn test_same_second_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        let report = phone_report();

        let first = store.save(&report).unwrap();
        let second = store.save(&report).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_recent_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        let report = phone_report();
        for _ in 0..3 {
            store.save(&report).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap().len(), 3);
        assert_eq!(store.list_recent(2).unwrap().len(), 2);
    }
}
