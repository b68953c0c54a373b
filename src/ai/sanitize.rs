//! Sanitization of raw model replies into a single executable command line.
//!
//! Models wrap commands in code fences, prepend explanations, or tack on
//! punctuation. The cleaning steps below run in a fixed order and are
//! idempotent: a command that is already clean passes through unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

// Pattern literals are compile-time constants.
#[allow(clippy::unwrap_used)]
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:bash|sh|shell)?\s*\n?(.*?)\n?```$").unwrap());

/// Bilingual explanatory prefixes models like to prepend.
#[allow(clippy::unwrap_used)]
static PREFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^命令[是为][:：]\s*",
        r"^(?i)the command is[:：]\s*",
        r"^(?i)command[:：]\s*",
        r"^执行[:：]\s*",
        r"^(?i)run[:：]\s*",
        r"^使用[:：]\s*",
        r"^(?i)use[:：]\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

#[allow(clippy::unwrap_used)]
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。，、；.,:;]+$").unwrap());

/// Clean a raw model reply down to one executable line.
///
/// Returns an empty string when nothing usable remains; the caller decides
/// whether that is an error.
pub fn sanitize(raw: &str) -> String {
    let mut command = raw.trim().to_string();

    // A reply that is entirely one fenced block unwraps to its body.
    let unwrapped = CODE_BLOCK
        .captures(&command)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string());
    if let Some(body) = unwrapped {
        command = body;
    }

    // A single pair of wrapping backticks.
    if command.len() >= 2 && command.starts_with('`') && command.ends_with('`') {
        command = command[1..command.len() - 1].trim().to_string();
    }

    // Leading explanatory prefixes ("命令是：", "run:", ...).
    for prefix in PREFIXES.iter() {
        command = prefix.replace(&command, "").into_owned();
    }

    // Keep only the first line.
    if let Some(first_line) = command.lines().next() {
        command = first_line.trim().to_string();
    } else {
        command.clear();
    }

    // Trailing sentence punctuation, ASCII and full-width.
    command = TRAILING_PUNCT.replace(&command, "").into_owned();

    command.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_command_passes_through() {
        assert_eq!(sanitize("ls -la"), "ls -la");
        assert_eq!(sanitize("  df -h  "), "df -h");
    }

    #[test]
    fn test_strips_bash_code_block() {
        assert_eq!(sanitize("```bash\nls -la\n```"), "ls -la");
        assert_eq!(sanitize("```sh\ndf -h\n```"), "df -h");
        assert_eq!(sanitize("```\npwd\n```"), "pwd");
    }

    #[test]
    fn test_strips_wrapping_backticks() {
        assert_eq!(sanitize("`ls -la`"), "ls -la");
    }

    #[test]
    fn test_strips_chinese_prefix() {
        assert_eq!(sanitize("命令是：ls -la"), "ls -la");
        assert_eq!(sanitize("执行：df -h"), "df -h");
        assert_eq!(sanitize("使用：free -h"), "free -h");
    }

    #[test]
    fn test_strips_english_prefix() {
        assert_eq!(sanitize("The command is: ls -la"), "ls -la");
        assert_eq!(sanitize("Command: pwd"), "pwd");
        assert_eq!(sanitize("run: uname -a"), "uname -a");
    }

    #[test]
    fn test_keeps_first_line_only() {
        assert_eq!(sanitize("ls -la\nextra explanation"), "ls -la");
        assert_eq!(sanitize("ls -la\n\n这个命令会列出所有文件"), "ls -la");
    }

    #[test]
    fn test_strips_trailing_punctuation() {
        assert_eq!(sanitize("ls -la。"), "ls -la");
        assert_eq!(sanitize("ls -la."), "ls -la");
        assert_eq!(sanitize("df -h；"), "df -h");
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("``````"), "");
        assert_eq!(sanitize("。。。"), "");
    }

    #[test]
    fn test_combined_wrapping() {
        assert_eq!(sanitize("```bash\n命令是：ls -la\n```"), "ls -la");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "ls -la",
            "```bash\nls -la\n```",
            "`pwd`",
            "命令是：ls -la。",
            "The command is: df -h.\nmore text",
            "",
            "run: echo 'hi'",
        ];
        for raw in inputs {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
