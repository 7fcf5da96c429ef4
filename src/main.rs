//! lookout - An OSINT reconnaissance tool.
//!
//! Entry point: parses the command line, sets up logging and dispatches to
//! a lookup, the history listing or the interactive menu.

use anyhow::Context;
use clap::Parser;
use lookout::catalog::Catalog;
use lookout::cli::{menu, Cli, Commands, Session};
use lookout::config::Paths;
use lookout::logging::{self, LogOptions};
use lookout::output;
use lookout::recon::ReconContext;
use lookout::report::Reporter;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = match Paths::resolve(cli.output_dir.as_deref()) {
        Ok(paths) => paths,
        Err(e) => {
            output::print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let _guard = logging::init(&LogOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        logs_dir: paths.logs_dir(),
    });

    match run(cli, paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "fatal error");
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, paths: Paths) -> anyhow::Result<()> {
    let settings = cli.settings(&paths).context("failed to load settings")?;
    let catalog = Catalog::load(Some(&paths.catalog_dir())).context("failed to load catalog")?;

    let reporter = if settings.save_results {
        Reporter::new(&paths)
    } else {
        Reporter::new(&paths).disabled()
    };

    tracing::debug!(
        config_dir = %paths.config_dir.display(),
        data_dir = %paths.data_dir.display(),
        "paths resolved"
    );

    if let Some(Commands::History(ref cmd)) = cli.command {
        cmd.execute(reporter.store())?;
        return Ok(());
    }

    let ctx = ReconContext::new(settings, catalog).context("failed to initialize probes")?;
    let session = Session::new(ctx, reporter, cli.output, cli.quiet);
    tracing::info!(session = %session.id(), "session started");

    match cli.command.as_ref().and_then(Commands::lookup) {
        Some((mode, cmd)) => {
            session
                .lookup(mode, &cmd.target)
                .await
                .with_context(|| format!("{} lookup failed", mode))?;
        }
        None => menu::run(&session).await?,
    }

    Ok(())
}
