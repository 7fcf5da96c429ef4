//! History subcommand implementation.
//!
//! Handles `lookout history`, listing saved result files newest first.

use crate::error::CliResult;
use crate::output;
use crate::report::ResultStore;
use clap::Parser;
use console::style;
use std::io::{self, Write};

/// View saved results.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct HistoryCommand {
    /// Number of recent results to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Show a summary line for each result
    #[arg(short, long)]
    pub detailed: bool,
}

impl Default for HistoryCommand {
    fn default() -> Self {
        Self {
            count: 10,
            detailed: false,
        }
    }
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(&self, store: &ResultStore) -> CliResult<()> {
        let stdout = io::stdout();
        self.write(&mut stdout.lock(), store)
    }

    fn write<W: Write>(&self, out: &mut W, store: &ResultStore) -> CliResult<()> {
        let total = store.list()?.len();
        if total == 0 {
            output::print_info(&format!("No saved results in {}", store.dir().display()));
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", style("Recent results").bold())?;

        for path in store.list_recent(self.count)? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if !self.detailed {
                writeln!(out, "  {} {}", style("•").cyan(), name)?;
                continue;
            }

            match store.load(&path) {
                Ok(report) => {
                    writeln!(out, "  {} {}  {}", style("•").cyan(), name, style(report.summary()).dim())?
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable result file");
                    writeln!(out, "  {} {}  {}", style("•").cyan(), name, style("(unreadable)").red())?
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "Total: {} saved results", total)?;
        Ok(())
    }
}
