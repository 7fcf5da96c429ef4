//! Output formatting module.
//!
//! Renders finished lookups to stdout as plain text, JSON or CSV, and
//! provides the status-line helpers used by the CLI.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_info, print_lookup_header, print_warning, write_plain,
};

use crate::cli::OutputFormat;
use crate::recon::Findings;
use crate::report::{Artifacts, ScanReport};
use std::io;

/// Format and print a finished lookup according to the specified format.
pub fn format_results(
    findings: &Findings,
    report: &ScanReport,
    artifacts: &Artifacts,
    format: OutputFormat,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Plain => write_plain(&mut out, findings, report, artifacts),
        OutputFormat::Json => write_json(&mut out, report),
        OutputFormat::Csv => write_csv(&mut out, findings),
    }
}
