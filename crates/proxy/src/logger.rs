use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const LOG_PREFIX: &str = "quote-proxy";

/// Keeps the non-blocking writers flushing until dropped; hold it in `main`.
pub struct TracingGuards {
    _stdout: WorkerGuard,
    _file: Option<WorkerGuard>,
}

/// stdout logging, plus a daily file under `log_dir` when given.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(log_dir: Option<&Path>) -> io::Result<TracingGuards> {
    let (stdout_writer, stdout_guard) = non_blocking(io::stdout());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = daily_file_writer(dir, LOG_PREFIX)?;
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(stdout_writer).with_ansi(true))
        .init();

    Ok(TracingGuards {
        _stdout: stdout_guard,
        _file: file_guard,
    })
}

/// `{dir}/{prefix}.2025-11-29.log`
pub fn daily_log_path(dir: &Path, prefix: &str) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    dir.join(format!("{prefix}.{date}.log"))
}

fn daily_file_writer(dir: &Path, prefix: &str) -> io::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(daily_log_path(dir, prefix))?;
    Ok(non_blocking(file))
}
