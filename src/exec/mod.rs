//! Command execution.
//!
//! Two modes, chosen by the interactivity classifier upstream:
//! - captured: run through `sh -c`, collect stdout/stderr, enforce a
//!   timeout so a hung command cannot wedge the assistant;
//! - interactive: inherit the terminal and wait for the user to finish
//!   (editors, pagers, REPLs). No timeout - the user is in control.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Outcome of one command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub return_code: i32,
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// The captured command exceeded the configured timeout. Reported
    /// separately from ordinary failure so callers can tell the two apart.
    #[error("命令执行超时 (command timed out after {0:?})")]
    Timeout(Duration),
    #[error("无法启动命令 (failed to run command): {0}")]
    Spawn(#[from] std::io::Error),
}

/// Runs resolved commands through the user's shell.
#[derive(Debug, Clone)]
pub struct Executor {
    timeout: Duration,
}

impl Executor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute a command, capturing output unless it needs a terminal.
    pub async fn run(&self, command: &str, interactive: bool) -> Result<CommandOutput, ExecError> {
        debug!(command, interactive, "executing");
        if interactive {
            self.run_interactive(command).await
        } else {
            self.run_captured(command).await
        }
    }

    async fn run_captured(&self, command: &str) -> Result<CommandOutput, ExecError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(result) => result?,
            Err(_) => return Err(ExecError::Timeout(self.timeout)),
        };

        let return_code = output.status.code().unwrap_or(-1);
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            return_code,
        })
    }

    async fn run_interactive(&self, command: &str) -> Result<CommandOutput, ExecError> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        let return_code = status.code().unwrap_or(-1);
        Ok(CommandOutput {
            success: status.success(),
            stdout: String::new(),
            stderr: String::new(),
            return_code,
        })
    }
}
