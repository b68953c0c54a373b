//! Command history logging.
//!
//! Executed commands are appended to a plain-text file as
//! `[YYYY-MM-DD HH:MM:SS] command` lines, trimmed to a maximum entry count
//! after each append. History is a convenience - any failure here is logged
//! and swallowed so it can never break command execution.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

use crate::utils;

pub struct HistoryLog {
    path: PathBuf,
    max_entries: usize,
    enabled: bool,
}

impl HistoryLog {
    pub fn new(path: PathBuf, max_entries: usize, enabled: bool) -> Self {
        Self {
            path,
            max_entries,
            enabled,
        }
    }

    /// History file under the app directory: `~/.nlsh/command_history.txt`.
    pub fn default_path() -> PathBuf {
        utils::app_dir().join("command_history.txt")
    }

    /// Append a command with a timestamp, then trim the file.
    pub fn record(&self, command: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.append(command) {
            warn!("failed to record command history: {e}");
            return;
        }
        if let Err(e) = self.trim() {
            warn!("failed to trim command history: {e}");
        }
    }

    fn append(&self, command: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{timestamp}] {command}")?;
        Ok(())
    }

    fn trim(&self) -> std::io::Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        let lines: Vec<&str> = content.lines().collect();
        if lines.len() <= self.max_entries {
            return Ok(());
        }
        let keep = &lines[lines.len() - self.max_entries..];
        write_atomic(&self.path, &(keep.join("\n") + "\n"))
    }

    /// The most recent `limit` history lines, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(limit);
        lines[start..].iter().map(|s| s.to_string()).collect()
    }
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("txt.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_in(dir: &Path, max: usize) -> HistoryLog {
        HistoryLog::new(dir.join("history.txt"), max, true)
    }

    #[test]
    fn test_record_and_recent() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path(), 100);

        log.record("ls -la");
        log.record("pwd");

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with("ls -la"));
        assert!(recent[1].ends_with("pwd"));
        // Entries carry a bracketed timestamp.
        assert!(recent[0].starts_with('['));
    }

    #[test]
    fn test_trim_keeps_newest_entries() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path(), 3);

        for i in 0..6 {
            log.record(&format!("cmd{i}"));
        }

        let recent = log.recent(10);
        assert_eq!(recent.len(), 3);
        assert!(recent[0].ends_with("cmd3"));
        assert!(recent[2].ends_with("cmd5"));
    }

    #[test]
    fn test_recent_limit() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path(), 100);
        for i in 0..5 {
            log.record(&format!("cmd{i}"));
        }
        assert_eq!(log.recent(2).len(), 2);
    }

    #[test]
    fn test_disabled_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join("history.txt"), 100, false);
        log.record("ls");
        assert!(log.recent(10).is_empty());
    }

    #[test]
    fn test_recent_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(dir.path(), 100);
        assert!(log.recent(10).is_empty());
    }
}
