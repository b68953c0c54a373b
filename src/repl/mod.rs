//! The interactive read-eval loop.
//!
//! Reads natural-language requests line by line, pushes them through the
//! translation pipeline, asks for confirmation (with a louder warning for
//! dangerous commands), and hands the result to the executor. Special
//! inputs (`help`, `history`, `config`, `exit`) are handled here and never
//! reach the translator.

use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::ai::{diagnose, AiTranslator, ModelClient};
use crate::config::{Settings, TranslationMode};
use crate::context::SystemContext;
use crate::exec::{ExecError, Executor};
use crate::history::HistoryLog;
use crate::params;
use crate::security;
use crate::translator::{Strategy, TranslateError, Translator};

pub struct Repl {
    settings: Settings,
    translator: Translator,
    /// Separate handle for error diagnosis so a diagnosis request never
    /// competes with translation state.
    diagnosis_client: Option<ModelClient>,
    executor: Executor,
    history: HistoryLog,
    editor: DefaultEditor,
    running: bool,
}

impl Repl {
    pub fn new(settings: Settings) -> Result<Self> {
        let model_client = ModelClient::from_settings(&settings);
        if settings.mode == TranslationMode::Ai && model_client.is_none() {
            warn!("AI mode configured but no API key available; running rule-only");
            println!(
                "{}",
                "提示: 未配置 API 密钥，仅使用规则翻译。使用 'config set api_key <KEY>' 启用 AI。"
                    .yellow()
            );
        }

        let diagnosis_client = model_client.clone();
        let ai = model_client.map(|c| AiTranslator::new(c, settings.prompts_dir.clone()));
        let translator = Translator::new(settings.mode, ai);
        let executor = Executor::new(Duration::from_secs(settings.command_timeout_secs));
        let history = HistoryLog::new(
            HistoryLog::default_path(),
            settings.max_history_entries,
            settings.enable_history,
        );
        let editor = DefaultEditor::new()?;

        Ok(Self {
            settings,
            translator,
            diagnosis_client,
            executor,
            history,
            editor,
            running: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        while self.running {
            let prompt = format!("\n{} ", "nlsh>".green().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _added = self.editor.add_history_entry(line.as_str());
                    self.process_input(&line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "使用 'exit' 退出程序".yellow());
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "再见！".cyan());
                    break;
                }
                Err(e) => {
                    eprintln!("{}", format!("输入错误: {e}").red());
                    break;
                }
            }
        }
        Ok(())
    }

    async fn process_input(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" | "退出" => {
                self.running = false;
                println!("{}", "再见！".cyan());
                return;
            }
            "help" | "帮助" | "h" | "?" => {
                self.print_help();
                return;
            }
            "history" | "历史" => {
                self.print_history();
                return;
            }
            _ => {}
        }

        if let Some(rest) = input.strip_prefix("config") {
            if rest.is_empty() || rest.starts_with(' ') {
                let args: Vec<&str> = rest.split_whitespace().collect();
                self.handle_config(&args);
                return;
            }
        }

        self.handle_utterance(input).await;
    }

    async fn handle_utterance(&mut self, utterance: &str) {
        let hint = SystemContext::capture().hint();

        let translation = match self.translator.translate(utterance, Some(&hint)).await {
            Ok(t) => t,
            Err(TranslateError::NoMatch) => {
                println!("{}", "抱歉，我不理解这个命令。".red());
                println!("{}", "提示: 输入 'help' 查看常用命令示例".yellow());
                return;
            }
            Err(e) => {
                println!("{}", format!("翻译失败: {e}").red());
                return;
            }
        };

        let provenance = match (translation.strategy, translation.scenario) {
            (Strategy::Ai, Some(s)) => format!("AI · {}", s.name()),
            _ => "规则匹配".to_string(),
        };
        println!(
            "\n{} {}  {}",
            "我将执行命令:".yellow(),
            translation.command.as_str().white().bold(),
            format!("({provenance})").dark_grey()
        );

        // Advisory path warnings; they never block the command.
        let report = params::validate(&translation.command);
        for warning in &report.warnings {
            println!("{}", format!("警告: {warning}").yellow());
        }

        let assessment = security::assess(&translation.command);
        if assessment.dangerous {
            println!("{}", "⚠️  警告: 这是一个危险命令！".red().bold());
            println!("{}", "此命令可能会造成数据丢失或系统损坏！".red());
        }

        if !self.confirm() {
            println!("{}", "已取消执行".yellow());
            return;
        }

        self.execute(&translation.command, assessment.interactive)
            .await;
    }

    fn confirm(&mut self) -> bool {
        loop {
            match self.editor.readline(&format!("{} ", "是否继续？(y/n):".cyan())) {
                Ok(answer) => match answer.trim().to_lowercase().as_str() {
                    "y" | "yes" | "是" | "ok" => return true,
                    "n" | "no" | "否" | "cancel" => return false,
                    _ => println!("{}", "请输入 y 或 n".red()),
                },
                Err(_) => return false,
            }
        }
    }

    async fn execute(&mut self, command: &str, interactive: bool) {
        if interactive {
            println!("{}", "执行交互式命令...".cyan());
        }

        self.history.record(command);

        match self.executor.run(command, interactive).await {
            Ok(output) if output.success => {
                if !interactive && !output.stdout.is_empty() {
                    println!("\n{}", "执行成功:".green());
                    println!("{}", output.stdout);
                }
            }
            Ok(output) => {
                println!("\n{}", "执行失败:".red());
                if !output.stderr.is_empty() {
                    println!("{}", output.stderr.as_str().red());
                }
                if output.return_code != 0 {
                    println!("{}", format!("返回码: {}", output.return_code).red());
                }
                self.print_diagnosis(command, &output.stderr, output.return_code)
                    .await;
            }
            Err(e @ ExecError::Timeout(_)) => {
                println!("{}", format!("执行失败: {e}").red());
                println!(
                    "{}",
                    "提示: 使用 'config set command_timeout_secs <N>' 调整超时".dark_grey()
                );
            }
            Err(e) => {
                println!("{}", format!("执行失败: {e}").red());
            }
        }
    }

    async fn print_diagnosis(&self, command: &str, stderr: &str, return_code: i32) {
        let diagnosis =
            diagnose::diagnose(self.diagnosis_client.as_ref(), command, stderr, return_code).await;

        if !diagnosis.analysis.is_empty() {
            println!("{} {}", "原因:".cyan(), diagnosis.analysis);
        }
        if !diagnosis.suggestion.is_empty() {
            println!("{} {}", "解决方案:".cyan(), diagnosis.suggestion);
        }
        if let Some(alternative) = &diagnosis.alternative_command {
            println!("{} {}", "替代命令:".cyan(), alternative.as_str().bold());
        }
    }

    fn handle_config(&mut self, args: &[&str]) {
        match args.first().copied() {
            None | Some("show") | Some("view") => {
                let show_secrets = args.contains(&"--secrets") || args.contains(&"-s");
                println!("\n{}", "当前配置:".cyan());
                println!("{}", self.settings.display(show_secrets));
                if !show_secrets {
                    println!("{}", "提示: 使用 'config show --secrets' 显示完整的敏感信息".dark_grey());
                }
            }
            Some("set") => {
                if args.len() < 3 {
                    println!("{}", "用法: config set KEY VALUE".red());
                    return;
                }
                let key = args[1];
                let value = args[2..].join(" ");
                match self.settings.set_value(key, &value) {
                    Ok(()) => {
                        println!("{}", format!("✓ 已更新配置: {key}={value}").green());
                        println!("{}", "部分设置在重启后生效".dark_grey());
                    }
                    Err(e) => println!("{}", format!("错误: {e:#}").red()),
                }
            }
            Some("help") | Some("-h") | Some("--help") => self.print_config_help(),
            Some(other) => {
                println!("{}", format!("未知的 config 命令: {other}").red());
                self.print_config_help();
            }
        }
    }

    fn print_config_help(&self) {
        println!("\n{}", "配置命令:".cyan());
        println!("  config                - 显示当前配置");
        println!("  config show --secrets - 显示配置（包含敏感信息）");
        println!("  config set KEY VALUE  - 设置配置项 (provider, api_key, model, mode, ...)");
        println!("\n示例:");
        println!("  config set provider openai");
        println!("  config set api_key sk-xxx");
        println!("  config set mode rules");
    }

    fn print_welcome(&self) {
        println!("{}", "=".repeat(70).cyan());
        println!("{}", "  nlsh - 自然语言终端助手".cyan().bold());
        println!("{}", "  Translate natural language into shell commands".cyan());
        println!("{}", "=".repeat(70).cyan());
        println!("{}", "使用说明:".yellow());
        println!("  - 用中文或英文描述你想做的操作");
        println!("  - 输入 'help' 查看常用命令");
        println!("  - 输入 'history' 查看命令历史");
        println!("  - 输入 'config' 查看配置");
        println!("  - 输入 'exit' 或 'quit' 退出程序");
        if self.translator.ai_enabled() {
            println!("{}", "AI 翻译已启用".green());
        } else {
            println!("{}", "仅使用规则翻译 (rules mode)".yellow());
        }
    }

    fn print_help(&self) {
        println!("\n{}", "常用命令示例:".cyan());
        println!("{}", "系统管理:".green());
        println!("  切换到管理员 / switch to administrator");
        println!("  查看当前目录 / show current directory");
        println!("  查看磁盘空间 / disk space");
        println!("  查看内存使用 / memory usage");
        println!("{}", "文件操作:".green());
        println!("  列出文件 / list files");
        println!("  创建文件夹 test / create folder test");
        println!("  删除文件 test.txt / remove file test.txt");
        println!("  查找文件 test.txt / find file test.txt");
        println!("{}", "进程管理:".green());
        println!("  查看进程 / show processes");
        println!("  系统监控 / monitor system");
        println!("{}", "网络:".green());
        println!("  查看网络 / show ip");
        println!("  ping测试 / test network");
    }

    fn print_history(&self) {
        let entries = self.history.recent(20);
        if entries.is_empty() {
            println!("{}", "暂无命令历史".yellow());
            return;
        }
        println!("\n{}", "最近执行的命令:".cyan());
        for entry in entries {
            println!("  {entry}");
        }
    }
}
