//! Lookup subcommands.
//!
//! Handles `lookout <mode> <target>` and every lookup started from the
//! interactive menu.

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output;
use crate::recon::{self, ReconContext};
use crate::report::{Reporter, ScanReport};
use crate::types::{Mode, SessionId, Target};
use clap::Parser;
use std::time::Instant;

/// Run a lookup against a single target.
#[derive(Parser, Debug)]
pub struct LookupCommand {
    /// Target to investigate
    ///
    /// Examples:
    ///   lookout username johndoe
    ///   lookout email john@example.com
    ///   lookout domain https://www.example.com/
    ///   lookout phone 081234567890
    ///   lookout ip 8.8.8.8
    ///   lookout photo ./IMG_0001.jpg
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// State shared by every lookup of one process.
pub struct Session {
    id: SessionId,
    ctx: ReconContext,
    reporter: Reporter,
    format: OutputFormat,
    quiet: bool,
}

impl Session {
    pub fn new(ctx: ReconContext, reporter: Reporter, format: OutputFormat, quiet: bool) -> Self {
        let show_progress = format == OutputFormat::Plain && !quiet;

        Self {
            id: SessionId::new(),
            ctx: ctx.with_progress(show_progress),
            reporter,
            format,
            quiet,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Validate the raw target, run the lookup, save and print the report.
    pub async fn lookup(&self, mode: Mode, raw: &str) -> CliResult<ScanReport> {
        let target = Target::parse(mode, raw)?;

        // Print the header only for plain output so JSON/CSV stay parseable
        if !self.quiet && self.format == OutputFormat::Plain {
            output::print_lookup_header(mode, &target.normalized());
        }

        let started = Instant::now();
        let findings = recon::investigate(&self.ctx, &target).await?;
        let report = ScanReport::new(self.id, &findings, started.elapsed())?;

        let artifacts = self.reporter.persist(&report);
        output::format_results(&findings, &report, &artifacts, self.format)?;

        Ok(report)
    }
}
