//! Logging initialization and configuration.
//!
//! Logs are written to files in a `logs/` directory next to the executable
//! so they never interleave with the interactive prompt. Each run creates a
//! fresh timestamped file.
//!
//! # Configuration
//!
//! The log level is controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - Show debug and higher level logs
//! - `RUST_LOG=info` - Show info and higher level logs (default)
//! - `RUST_LOG=warn` - Show warnings and errors only
//! - `RUST_LOG=error` - Show errors only

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize file-based logging for this run.
///
/// Creates `logs/nlsh.<timestamp>.log` in the executable's directory and
/// routes all `tracing` output there through a non-blocking writer. Logging
/// setup failures are reported to stderr and otherwise ignored - the
/// assistant must keep working without a log file.
pub fn init_logging() {
    let log_dir = match std::env::current_exe() {
        Ok(exe_path) => exe_path
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs")),
        Err(_) => PathBuf::from("logs"),
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
        return;
    }

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("nlsh.{}.log", timestamp));

    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {}", e);
            return;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the non-blocking writer alive for the whole program lifetime.
    std::mem::forget(guard);

    tracing::info!("Logging initialized - writing to {}", log_path.display());
}
