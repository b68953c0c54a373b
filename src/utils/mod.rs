//! Utility modules for common functionality.
//!
//! This module contains utility functions and helpers used throughout
//! the application, including logging configuration and path helpers.

pub mod logger;

use std::path::PathBuf;

/// Resolve the user's home directory from `$HOME`.
///
/// Falls back to the current directory so path expansion stays usable in
/// stripped-down environments (containers, CI).
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The application's state directory: `~/.nlsh`.
pub fn app_dir() -> PathBuf {
    home_dir().join(".nlsh")
}
