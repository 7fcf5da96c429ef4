//! Tracing subscriber setup.
//!
//! Two sinks: warnings on stderr (unless quiet) and every enabled event in
//! an append-only daily file under the logs directory. `RUST_LOG` overrides
//! the default filter.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// File name prefix of the daily log.
pub const LOG_FILE_PREFIX: &str = "lookout.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub verbose: bool,
    pub quiet: bool,
    pub logs_dir: PathBuf,
}

impl LogOptions {
    /// The filter used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "lookout=debug"
        } else {
            "lookout=info"
        }
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered log lines are flushed.
pub fn init(options: &LogOptions) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    let stderr_layer = (!options.quiet).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN)
    });

    let (file_layer, guard) = match fs::create_dir_all(&options.logs_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&options.logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        return None;
    }
    if guard.is_none() {
        tracing::warn!(dir = %options.logs_dir.display(), "log directory unavailable, file logging disabled");
    }

    guard
}
