//! Scenario instruction templates for model requests.
//!
//! Each scenario has a plain-text instruction file under the prompts
//! directory; a missing or unreadable file falls back to the built-in
//! constant for that scenario so translation can never hard-fail on a lost
//! template. The ambient-context string, when present, is appended as a
//! hint - it is information for the model, never an instruction.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::scenario::Scenario;

/// Baseline instruction used for the default scenario.
pub const COMMAND_GENERATION: &str = "\
你是一个专业的 Linux 命令助手。将用户的自然语言描述转换为准确的 Linux 命令。
只返回命令本身，不要返回任何解释、说明或额外文字。
不要使用 markdown 代码块标记。
You are a Linux command assistant. Convert the user's request into exactly
one shell command. Reply with the command only - no explanation, no code
fences.";

pub const FILE_OPERATIONS: &str = "\
你是一个专业的 Linux 文件操作助手。将用户的自然语言描述转换为准确的文件操作命令
（如 mkdir、rm、cp、mv、find、ls）。
只返回命令本身，不要返回任何解释或 markdown 标记。
注意保留用户给出的文件名和路径，不要改写它们。
Reply with exactly one file-operation command, nothing else.";

pub const SYSTEM_MANAGEMENT: &str = "\
你是一个专业的 Linux 系统管理助手。将用户的自然语言描述转换为准确的系统管理命令
（如 ps、top、systemctl、useradd、kill、df、free）。
只返回命令本身，不要返回任何解释或 markdown 标记。
需要特权时使用 sudo 前缀。
Reply with exactly one system-management command, nothing else.";

pub const NETWORK_OPERATIONS: &str = "\
你是一个专业的 Linux 网络操作助手。将用户的自然语言描述转换为准确的网络命令
（如 ping、curl、wget、ssh、scp、ip、netstat）。
只返回命令本身，不要返回任何解释或 markdown 标记。
保留用户给出的 URL 和主机名。
Reply with exactly one network command, nothing else.";

pub const TEXT_PROCESSING: &str = "\
你是一个专业的 Linux 文本处理助手。将用户的自然语言描述转换为准确的文本处理命令
（如 cat、grep、sed、awk、head、tail、nano）。
只返回命令本身，不要返回任何解释或 markdown 标记。
Reply with exactly one text-processing command, nothing else.";

fn builtin(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::FileOperations => FILE_OPERATIONS,
        Scenario::SystemManagement => SYSTEM_MANAGEMENT,
        Scenario::NetworkOperations => NETWORK_OPERATIONS,
        Scenario::TextProcessing => TEXT_PROCESSING,
        Scenario::CommandGeneration => COMMAND_GENERATION,
    }
}

/// Load the instruction for a scenario, preferring the on-disk template.
pub fn load_instruction(prompts_dir: &Path, scenario: Scenario) -> String {
    let path = prompts_dir.join(format!("{}.txt", scenario.name()));
    match fs::read_to_string(&path) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            debug!("prompt file {} is empty, using built-in", path.display());
            builtin(scenario).to_string()
        }
        Err(e) => {
            debug!(
                "prompt file {} not readable ({}), using built-in",
                path.display(),
                e
            );
            builtin(scenario).to_string()
        }
    }
}

/// Append the ambient-context hint to an instruction.
pub fn with_context_hint(instruction: &str, context_hint: Option<&str>) -> String {
    match context_hint {
        Some(hint) if !hint.trim().is_empty() => {
            format!("{instruction}\n\n当前环境（仅供参考）/ Environment hint: {hint}")
        }
        _ => instruction.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let text = load_instruction(dir.path(), Scenario::FileOperations);
        assert_eq!(text, FILE_OPERATIONS);
    }

    #[test]
    fn test_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network_operations.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "custom network instruction").unwrap();

        let text = load_instruction(dir.path(), Scenario::NetworkOperations);
        assert_eq!(text, "custom network instruction");
    }

    #[test]
    fn test_empty_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("text_processing.txt"), "  \n").unwrap();
        let text = load_instruction(dir.path(), Scenario::TextProcessing);
        assert_eq!(text, TEXT_PROCESSING);
    }

    #[test]
    fn test_context_hint_appended() {
        let composed = with_context_hint("instruction", Some("User: bob, Dir: /tmp"));
        assert!(composed.starts_with("instruction"));
        assert!(composed.contains("User: bob, Dir: /tmp"));

        assert_eq!(with_context_hint("instruction", None), "instruction");
        assert_eq!(with_context_hint("instruction", Some("  ")), "instruction");
    }
}
