//! aurquery binary entrypoint kept minimal. The console host lives in `app`.

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

use aurquery::{app, args::Args, config, util};

struct AurqueryTimer;

impl tracing_subscriber::fmt::time::FormatTime for AurqueryTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
        let s = util::ts_to_date(secs); // "YYYY-MM-DD HH:MM:SS"
        w.write_str(&s.replacen(' ', "T", 1))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `<config>/logs/aurquery.log`, or stderr when the file cannot be opened.
///
/// Inputs:
/// - `level`: Default filter directive; `RUST_LOG` overrides it
fn init_logging(level: &str) {
    let mut log_path = config::logs_dir();
    log_path.push("aurquery.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AurqueryTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(AurqueryTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();
    init_logging(args.log_filter());

    tracing::info!(query = %args.query_text(), "aurquery starting");
    let code = match app::run(args).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Application error");
            eprintln!("aurquery: {err}");
            std::process::ExitCode::FAILURE
        }
    };
    tracing::info!("aurquery exited");
    code
}
