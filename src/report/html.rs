//! Static HTML report rendering.

use super::envelope::ScanReport;
use super::json_store::unique_path;
use crate::error::{StorageError, StorageResult};
use std::fs;
use std::path::PathBuf;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
.header { background: #2c3e50; color: white; padding: 20px; border-radius: 5px; }
.section { background: white; margin: 20px 0; padding: 20px; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
pre { white-space: pre-wrap; word-break: break-word; }";

/// Escape text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a report as a standalone HTML page.
pub fn render(report: &ScanReport) -> StorageResult<String> {
    let data = serde_json::to_string_pretty(&report.data)?;
    let mode = report.mode.as_str().to_uppercase();

    Ok(format!(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"utf-8\">
    <title>lookout report - {mode}</title>
    <style>
{style}
    </style>
</head>
<body>
    <div class=\"header\">
        <h1>lookout v{version} - OSINT report</h1>
        <p>Mode: {mode} | Target: {target} | Session: {session}</p>
        <p>Generated: {generated} | Duration: {duration}</p>
    </div>
    <div class=\"section\">
        <h2>Scan results</h2>
        <pre>{data}</pre>
    </div>
</body>
</html>
",
        mode = mode,
        style = STYLE,
        version = escape_html(&report.metadata.version),
        target = escape_html(&report.target),
        session = report.session_id,
        generated = report.timestamp.format("%Y-%m-%d %H:%M:%S"),
        duration = escape_html(&report.metadata.scan_duration),
        data = escape_html(&data),
    ))
}

/// Writes `<mode>_report_<YYYYmmdd_HHMMSS>.html` files.
#[derive(Debug, Clone)]
pub struct HtmlReporter {
    reports_dir: PathBuf,
}

impl HtmlReporter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn save(&self, report: &ScanReport) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.reports_dir)
            .map_err(|e| StorageError::DirectoryError(e.to_string()))?;

        let stem = format!("{}_report_{}", report.mode, report.file_stamp());
        let file = unique_path(&self.reports_dir, &stem, "html");

        fs::write(&file, render(report)?).map_err(|e| StorageError::SaveFailed(e.to_string()))?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::envelope::fixtures::phone_report;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_escapes_embedded_json() {
        let mut report = phone_report();
        report.target = "<b>".to_string();
        report.data = serde_json::json!({ "note": "<img src=x onerror=alert(1)>" });

        let html = render(&report).unwrap();
        assert!(!html.contains("<img"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("Mode: PHONE"));
    }

    #[test]
    fn test_save_names_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = phone_report();

        let file = HtmlReporter::new(dir.path()).save(&report).unwrap();
        let name = file.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, format!("phone_report_{}.html", report.file_stamp()));
    }
}
