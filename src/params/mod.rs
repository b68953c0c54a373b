//! Parameter extraction and path validation.
//!
//! Extraction pulls categorized substrings (files, paths, numbers, option
//! flags) out of raw text without executing anything. Validation re-scans a
//! resolved command for path-like tokens and checks that they exist on
//! disk, except for creation commands where a missing target is the whole
//! point. Warnings are advisory; they never block a command.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils;

/// Categorized substrings extracted from one piece of text.
///
/// Each list preserves order of appearance and keeps duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBundle {
    pub files: Vec<String>,
    pub paths: Vec<String>,
    pub numbers: Vec<String>,
    pub options: Vec<String>,
}

/// Result of validating the paths referenced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True only when no missing-path warnings were produced.
    pub valid: bool,
    pub warnings: Vec<String>,
}

// Pattern literals are compile-time constants.
#[allow(clippy::unwrap_used)]
mod patterns {
    use super::*;

    pub static FILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\w-]+\.\w+").unwrap());
    pub static PATHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[~/][\w./-]+").unwrap());
    pub static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
    pub static OPTIONS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:^|\s)(-{1,2}[\w][\w-]*)").unwrap());

    /// The three shapes a path-like token can take in a command: absolute
    /// or home-anchored, relative dot-path, or a bare filename at a token
    /// boundary.
    pub static CANDIDATES: [&Lazy<Regex>; 3] = [&ABSOLUTE, &RELATIVE, &BARE_FILE];
    pub static ABSOLUTE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:^|\s)([~/][\w./-]*)").unwrap());
    pub static RELATIVE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:^|\s)(\.{1,2}/[\w./-]+)").unwrap());
    pub static BARE_FILE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:^|\s)([\w-]+\.\w+)(?:\s|$)").unwrap());
}

/// Extract all four parameter categories from raw text.
pub fn extract(text: &str) -> ParameterBundle {
    let collect = |re: &Regex, group: usize| {
        re.captures_iter(text)
            .filter_map(|c| c.get(group).map(|m| m.as_str().to_string()))
            .collect::<Vec<_>>()
    };
    ParameterBundle {
        files: collect(&patterns::FILES, 0),
        paths: collect(&patterns::PATHS, 0),
        numbers: collect(&patterns::NUMBERS, 0),
        options: collect(&patterns::OPTIONS, 1),
    }
}

/// Commands whose targets are expected to be absent.
const CREATION_MARKERS: &[&str] = &["mkdir", "touch", "create", ">", "echo"];

fn is_creation_command(command: &str) -> bool {
    CREATION_MARKERS.iter().any(|m| command.contains(m))
}

/// Expand `~` against the home directory and anchor relative candidates at
/// the current working directory.
fn expand_candidate(candidate: &str) -> PathBuf {
    if candidate == "~" {
        return utils::home_dir();
    }
    if let Some(rest) = candidate.strip_prefix("~/") {
        return utils::home_dir().join(rest);
    }
    let path = Path::new(candidate);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Check that the paths a command references exist.
///
/// Creation commands are exempt: `mkdir backups` must not warn that
/// `backups` is missing.
pub fn validate(command: &str) -> ValidationReport {
    if is_creation_command(command) {
        return ValidationReport {
            valid: true,
            warnings: Vec::new(),
        };
    }

    let mut candidates: Vec<String> = Vec::new();
    for re in patterns::CANDIDATES {
        for caps in re.captures_iter(command) {
            if let Some(m) = caps.get(1) {
                let token = m.as_str();
                if matches!(token, "." | ".." | "/" | "~") {
                    continue;
                }
                if !candidates.iter().any(|c| c == token) {
                    candidates.push(token.to_string());
                }
            }
        }
    }

    let mut warnings = Vec::new();
    for candidate in candidates {
        if !expand_candidate(&candidate).exists() {
            warnings.push(format!("path does not exist: {candidate}"));
        }
    }

    ValidationReport {
        valid: warnings.is_empty(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_extract_files() {
        let params = extract("复制文件 test.txt 到 backup.txt");
        assert_eq!(params.files, vec!["test.txt", "backup.txt"]);
    }

    #[test]
    fn test_extract_preserves_order_and_duplicates() {
        let params = extract("cp a.txt b.txt a.txt");
        assert_eq!(params.files, vec!["a.txt", "b.txt", "a.txt"]);
    }

    #[test]
    fn test_extract_paths() {
        let params = extract("创建目录 /home/user/test");
        assert!(params.paths.iter().any(|p| p.contains("/home/user/test")));

        let params = extract("进入 ~/documents");
        assert!(params.paths.iter().any(|p| p.starts_with('~')));
    }

    #[test]
    fn test_extract_numbers() {
        let params = extract("查看文件最后 20 行");
        assert_eq!(params.numbers, vec!["20"]);
    }

    #[test]
    fn test_extract_options() {
        let params = extract("使用 -la 选项列出文件");
        assert_eq!(params.options, vec!["-la"]);

        let params = extract("ls --all -h");
        assert_eq!(params.options, vec!["--all", "-h"]);
    }

    #[test]
    fn test_extract_empty_input() {
        assert_eq!(extract(""), ParameterBundle::default());
        assert_eq!(extract("列出所有文件").files.len(), 0);
    }

    #[test]
    fn test_validate_missing_file_warns() {
        let report = validate("cat definitely_not_here_9321.txt");
        assert!(!report.valid);
        assert!(report.warnings.iter().any(|w| {
            w.contains("path does not exist") && w.contains("definitely_not_here_9321.txt")
        }));
    }

    #[test]
    fn test_validate_existing_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("present.txt");
        let mut f = std::fs::File::create(&file).unwrap();
        writeln!(f, "data").unwrap();

        let report = validate(&format!("cat {}", file.display()));
        assert!(report.valid, "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_creation_commands_skip_validation() {
        let report = validate("mkdir definitely_not_here_9321");
        assert!(report.valid);
        assert!(report.warnings.is_empty());

        let report = validate("touch definitely_not_here_9321.txt");
        assert!(report.valid);

        let report = validate("echo hi > definitely_not_here_9321.txt");
        assert!(report.valid);
    }

    #[test]
    fn test_validate_ignores_bare_literals() {
        // ".", "..", "/", "~" are never reported.
        let report = validate("ls /");
        assert!(report.valid, "warnings: {:?}", report.warnings);

        let report = validate("cd ~");
        assert!(report.valid, "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_tilde_expansion() {
        let expanded = expand_candidate("~/somewhere");
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.is_absolute() || expanded.starts_with("."));
    }
}
