//! AI-assisted diagnosis of failed commands.
//!
//! When a command exits nonzero, the model is asked for a short labeled
//! analysis (原因 / 解决方案 / 替代命令). If the model is unavailable or the
//! call fails, a fixed table of common failure signatures answers instead;
//! diagnosis must never make a bad situation worse.

use tracing::warn;

use super::ModelClient;

const DIAGNOSIS_TEMPERATURE: f32 = 0.3;
const DIAGNOSIS_MAX_TOKENS: u32 = 500;

const DIAGNOSIS_INSTRUCTION: &str = "\
你是一个 Linux 系统专家。你的任务是分析命令执行错误并提供解决方案。

分析错误时请：
1. 简明扼要地说明错误原因（1-2句话）
2. 提供具体的解决方案
3. 如果需要，提供替代命令

请用中文回复，格式如下：
原因：[错误原因]
解决方案：[具体步骤]
替代命令：[如果有替代命令就提供，没有就写\"无\"]";

/// Parsed diagnosis of one failed command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDiagnosis {
    pub analysis: String,
    pub suggestion: String,
    pub alternative_command: Option<String>,
}

/// Diagnose a failure, falling back to the built-in table when the model
/// call fails.
pub async fn diagnose(
    client: Option<&ModelClient>,
    command: &str,
    error_output: &str,
    return_code: i32,
) -> ErrorDiagnosis {
    if let Some(client) = client {
        let user_message = format!(
            "命令：{command}\n错误输出：{error_output}\n返回码：{return_code}\n\n请分析这个错误并提供解决方案。"
        );
        match client
            .generate(
                DIAGNOSIS_INSTRUCTION,
                &user_message,
                DIAGNOSIS_TEMPERATURE,
                DIAGNOSIS_MAX_TOKENS,
            )
            .await
        {
            Ok(reply) => return parse_reply(&reply),
            Err(e) => warn!("AI error diagnosis failed, using basic analysis: {e}"),
        }
    }
    basic_diagnosis(command, error_output, return_code)
}

/// Parse the labeled reply format. Continuation lines are appended to the
/// most recent field; an unparseable reply becomes the analysis verbatim.
fn parse_reply(reply: &str) -> ErrorDiagnosis {
    let mut result = ErrorDiagnosis::default();
    let mut current: Option<usize> = None; // 0=analysis, 1=suggestion, 2=alternative

    let mut alternative = String::new();
    for line in reply.lines() {
        let line = line.trim();
        if let Some(rest) = strip_label(line, "原因") {
            result.analysis = rest.to_string();
            current = Some(0);
        } else if let Some(rest) = strip_label(line, "解决方案") {
            result.suggestion = rest.to_string();
            current = Some(1);
        } else if let Some(rest) = strip_label(line, "替代命令") {
            alternative = rest.to_string();
            current = Some(2);
        } else if !line.is_empty() {
            match current {
                Some(0) => {
                    result.analysis.push(' ');
                    result.analysis.push_str(line);
                }
                Some(1) => {
                    result.suggestion.push(' ');
                    result.suggestion.push_str(line);
                }
                Some(2) => {
                    alternative.push(' ');
                    alternative.push_str(line);
                }
                _ => {}
            }
        }
    }

    let alternative = alternative.trim().to_string();
    if !alternative.is_empty() && alternative != "无" && alternative.to_lowercase() != "none" {
        result.alternative_command = Some(alternative);
    }

    if result.analysis.is_empty() && result.suggestion.is_empty() {
        result.analysis = reply.trim().to_string();
    }
    result
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    for sep in ["：", ":"] {
        if let Some(rest) = line.strip_prefix(&format!("{label}{sep}")) {
            return Some(rest.trim());
        }
    }
    None
}

/// Fixed-table analysis for when the model cannot be reached.
fn basic_diagnosis(command: &str, error_output: &str, return_code: i32) -> ErrorDiagnosis {
    let lower = error_output.to_lowercase();
    let (analysis, suggestion) = if lower.contains("command not found") {
        (
            "命令不存在 (command not found)".to_string(),
            "检查命令拼写，或先安装对应的软件包".to_string(),
        )
    } else if lower.contains("permission denied") {
        (
            "权限不足 (permission denied)".to_string(),
            format!("尝试使用 sudo 运行：sudo {command}"),
        )
    } else if lower.contains("no such file or directory") {
        (
            "文件或目录不存在 (no such file or directory)".to_string(),
            "检查路径是否正确，使用 ls 确认文件存在".to_string(),
        )
    } else {
        (
            format!("命令以返回码 {return_code} 失败"),
            "检查上面的错误输出了解详细原因".to_string(),
        )
    };

    ErrorDiagnosis {
        analysis,
        suggestion,
        alternative_command: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_reply() {
        let reply = "原因：文件不存在\n解决方案：先创建文件\n替代命令：touch test.txt";
        let d = parse_reply(reply);
        assert_eq!(d.analysis, "文件不存在");
        assert_eq!(d.suggestion, "先创建文件");
        assert_eq!(d.alternative_command.as_deref(), Some("touch test.txt"));
    }

    #[test]
    fn test_parse_none_alternative() {
        let reply = "原因：权限不足\n解决方案：使用 sudo\n替代命令：无";
        let d = parse_reply(reply);
        assert_eq!(d.alternative_command, None);

        let reply = "原因：x\n解决方案：y\n替代命令：None";
        assert_eq!(parse_reply(reply).alternative_command, None);
    }

    #[test]
    fn test_parse_continuation_lines() {
        let reply = "原因：磁盘已满\n无法写入新文件\n解决方案：清理磁盘空间";
        let d = parse_reply(reply);
        assert_eq!(d.analysis, "磁盘已满 无法写入新文件");
        assert_eq!(d.suggestion, "清理磁盘空间");
    }

    #[test]
    fn test_parse_unstructured_reply_becomes_analysis() {
        let reply = "这个命令看起来没有问题，可能是环境问题。";
        let d = parse_reply(reply);
        assert_eq!(d.analysis, reply);
        assert!(d.suggestion.is_empty());
    }

    #[test]
    fn test_parse_ascii_colon_labels() {
        let reply = "原因: x\n解决方案: y\n替代命令: ls -la";
        let d = parse_reply(reply);
        assert_eq!(d.analysis, "x");
        assert_eq!(d.suggestion, "y");
        assert_eq!(d.alternative_command.as_deref(), Some("ls -la"));
    }

    #[test]
    fn test_basic_diagnosis_signatures() {
        let d = basic_diagnosis("foo", "sh: foo: command not found", 127);
        assert!(d.analysis.contains("command not found"));

        let d = basic_diagnosis("cat /etc/shadow", "cat: /etc/shadow: Permission denied", 1);
        assert!(d.analysis.contains("permission denied"));
        assert!(d.suggestion.contains("sudo cat /etc/shadow"));

        let d = basic_diagnosis("cat gone.txt", "cat: gone.txt: No such file or directory", 1);
        assert!(d.analysis.contains("no such file or directory"));

        let d = basic_diagnosis("false", "", 1);
        assert!(d.analysis.contains('1'));
    }

    #[tokio::test]
    async fn test_diagnose_without_client_uses_basic_table() {
        let d = diagnose(None, "foo", "sh: foo: command not found", 127).await;
        assert!(d.analysis.contains("command not found"));
        assert!(d.alternative_command.is_none());
    }
}
