//! File-based logging for the TUI.
//!
//! The TUI owns the terminal, so log output goes to a rolling JSON file
//! under the user data directory. Standard `log` macros are bridged into
//! `tracing` so the whole crate can log with `log::info!` etc.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("trendpulse").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize file-only logging for the TUI and return the flush guard.
/// The guard must be held for the lifetime of the process.
pub fn init_tui() -> WorkerGuard {
    let log_dir = log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {e}");
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "trendpulse.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer — the TUI owns the terminal.
    tracing_subscriber::registry().with(file_layer).init();

    // Redirect standard `log` macros to `tracing`.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {e}");
    }

    guard
}
