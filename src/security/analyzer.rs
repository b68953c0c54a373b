//! Dangerous-pattern and interactive-prefix classification.

use once_cell::sync::Lazy;
use regex::Regex;

/// The two independent classification results for a command.
///
/// A command can be both dangerous and interactive (e.g. `sudo su` followed
/// by destructive work); the flags never influence each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAssessment {
    pub dangerous: bool,
    pub interactive: bool,
}

/// Patterns that warrant an extra warning before execution. Matching is
/// advisory only - it never blocks the command.
const DANGEROUS_PATTERNS: &[&str] = &[
    r"rm\s+-rf\s+/",
    r"rm\s+-rf\s+\*",
    r"dd\s+if=.*of=/dev/",
    r"mkfs\.",
    r":\(\)\{.*\};:", // fork bomb
    r"chmod\s+-R\s+777\s+/",
    r">.*/dev/sda",
];

// Pattern literals are compile-time constants.
#[allow(clippy::unwrap_used)]
static DANGEROUS: Lazy<Vec<Regex>> = Lazy::new(|| {
    DANGEROUS_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Programs that need a real terminal: privilege-switching shells,
/// editors, pagers, the manual viewer, remote shells, REPL interpreters,
/// live monitors, and interactive database clients.
///
/// Multi-word entries match at the start of the command; single words match
/// any whitespace-delimited token.
const INTERACTIVE_PREFIXES: &[&str] = &[
    "sudo su",
    "su",
    "nano",
    "vi",
    "vim",
    "top",
    "htop",
    "less",
    "more",
    "man",
    "ssh",
    "mysql",
    "python",
    "python3",
    "node",
    "redis-cli",
    "mongo",
];

/// True when the command matches any dangerous pattern; first match wins.
pub fn is_dangerous(command: &str) -> bool {
    DANGEROUS.iter().any(|re| re.is_match(command))
}

/// True when the command invokes a known interactive program.
pub fn is_interactive(command: &str) -> bool {
    let trimmed = command.trim();
    for prefix in INTERACTIVE_PREFIXES {
        if prefix.contains(' ') {
            if trimmed == *prefix || trimmed.starts_with(&format!("{prefix} ")) {
                return true;
            }
        } else if trimmed.split_whitespace().any(|token| token == *prefix) {
            return true;
        }
    }
    false
}

/// Run both classifications.
pub fn assess(command: &str) -> CommandAssessment {
    CommandAssessment {
        dangerous: is_dangerous(command),
        interactive: is_interactive(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangerous_commands() {
        assert!(is_dangerous("rm -rf /"));
        assert!(is_dangerous("rm -rf *"));
        assert!(is_dangerous("sudo rm -rf /var"));
        assert!(is_dangerous(":(){ :|:& };:"));
        assert!(is_dangerous("dd if=/dev/zero of=/dev/sda"));
        assert!(is_dangerous("mkfs.ext4 /dev/sdb1"));
        assert!(is_dangerous("chmod -R 777 /"));
        assert!(is_dangerous("cat image.iso > /dev/sda"));
    }

    #[test]
    fn test_safe_commands() {
        assert!(!is_dangerous("ls -la"));
        assert!(!is_dangerous("pwd"));
        assert!(!is_dangerous("rm notes.txt"));
        assert!(!is_dangerous("df -h"));
    }

    #[test]
    fn test_interactive_commands() {
        assert!(is_interactive("sudo su"));
        assert!(is_interactive("nano file.txt"));
        assert!(is_interactive("top"));
        assert!(is_interactive("vim /etc/hosts"));
        assert!(is_interactive("man grep"));
        assert!(is_interactive("ssh user@host"));
        assert!(is_interactive("python3"));
        assert!(is_interactive("mysql -u root"));
    }

    #[test]
    fn test_non_interactive_commands() {
        assert!(!is_interactive("pwd"));
        assert!(!is_interactive("ls -la"));
        assert!(!is_interactive("cat file.txt"));
        assert!(!is_interactive("grep error app.log"));
    }

    #[test]
    fn test_interactive_token_anywhere() {
        // An interactive program reached through sudo still needs a
        // terminal.
        assert!(is_interactive("sudo nano /etc/fstab"));
    }

    #[test]
    fn test_flags_are_independent() {
        let both = assess("sudo su");
        assert!(both.interactive);
        assert!(!both.dangerous);

        let danger = assess("rm -rf /");
        assert!(danger.dangerous);
        assert!(!danger.interactive);

        let neither = assess("pwd");
        assert!(!neither.dangerous);
        assert!(!neither.interactive);
    }
}
