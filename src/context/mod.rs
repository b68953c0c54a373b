//! Ambient system context for AI requests.
//!
//! Captures the handful of facts that make model suggestions concrete:
//! working directory, username, OS name, and architecture. Each field is
//! collected independently and degrades to an `Error: ...` sentinel string
//! rather than failing the capture, so a partially broken environment still
//! produces a usable hint.

use serde::{Deserialize, Serialize};

/// A snapshot of the ambient environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemContext {
    pub current_directory: String,
    pub username: String,
    pub os_name: String,
    pub architecture: String,
}

impl SystemContext {
    /// Capture all four facts from the current process.
    pub fn capture() -> Self {
        Self {
            current_directory: current_directory(),
            username: username(),
            os_name: std::env::consts::OS.to_string(),
            architecture: std::env::consts::ARCH.to_string(),
        }
    }

    /// Compact one-line rendering handed to the model as a hint.
    pub fn hint(&self) -> String {
        format!(
            "User: {}, Dir: {}, OS: {}, Arch: {}",
            self.username, self.current_directory, self.os_name, self.architecture
        )
    }
}

fn current_directory() -> String {
    match std::env::current_dir() {
        Ok(path) => path.to_string_lossy().to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

fn username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "Error: could not determine user".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_produces_non_empty_fields() {
        let ctx = SystemContext::capture();
        assert!(!ctx.os_name.is_empty());
        assert!(!ctx.architecture.is_empty());
        assert!(!ctx.current_directory.is_empty());
    }

    #[test]
    fn test_hint_format() {
        let ctx = SystemContext {
            current_directory: "/home/user".to_string(),
            username: "user".to_string(),
            os_name: "linux".to_string(),
            architecture: "x86_64".to_string(),
        };
        assert_eq!(
            ctx.hint(),
            "User: user, Dir: /home/user, OS: linux, Arch: x86_64"
        );
    }

    #[test]
    fn test_hint_tolerates_sentinels() {
        let ctx = SystemContext {
            current_directory: "Error: permission denied".to_string(),
            username: "Error: could not determine user".to_string(),
            os_name: "linux".to_string(),
            architecture: "x86_64".to_string(),
        };
        let hint = ctx.hint();
        assert!(hint.contains("Error: permission denied"));
        assert!(hint.contains("Error: could not determine user"));
    }
}
