//! JSON output formatting.

use crate::report::ScanReport;
use std::io::{self, Write};

/// Write the full report envelope as pretty JSON.
pub fn write_json<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
