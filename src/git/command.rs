//! The git queries commitgen issues, and the executor that runs them.
//!
//! All queries shell out to the system `git` binary so the user's own
//! configuration applies. Nothing here writes to the repository.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// A read-only git query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitCommand {
    /// `git --no-pager diff --staged`
    StagedDiff,
    /// `git --no-pager log -<n>`
    DetailedLog(usize),
    /// `git --no-pager log -<n> --oneline`
    OnelineLog(usize),
}

impl GitCommand {
    /// Arguments passed to `git`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--no-pager".to_string()];
        match self {
            GitCommand::StagedDiff => {
                args.push("diff".to_string());
                args.push("--staged".to_string());
            }
            GitCommand::DetailedLog(count) => {
                args.push("log".to_string());
                args.push(format!("-{count}"));
            }
            GitCommand::OnelineLog(count) => {
                args.push("log".to_string());
                args.push(format!("-{count}"));
                args.push("--oneline".to_string());
            }
        }
        args
    }

    /// Short description used in error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            GitCommand::StagedDiff => "diff --staged",
            GitCommand::DetailedLog(_) => "log",
            GitCommand::OnelineLog(_) => "log --oneline",
        }
    }
}

/// Trait for running git queries.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run the query and return its stdout, untrimmed.
    async fn run(&self, command: GitCommand) -> Result<String, GitError>;
}

/// Executor that calls the real `git` CLI.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    working_dir: Option<PathBuf>,
}

impl GitCli {
    /// Create an executor rooted at `working_dir`, or the process's current
    /// directory when `None`.
    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self { working_dir }
    }
}

#[async_trait]
impl GitExecutor for GitCli {
    async fn run(&self, command: GitCommand) -> Result<String, GitError> {
        if which::which("git").is_err() {
            return Err(GitError::NotInstalled);
        }

        let operation = command.operation();
        let mut cmd = Command::new("git");
        cmd.args(command.args())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(?command, dir = ?self.working_dir, "running git");

        let output = cmd
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed { operation, source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(GitError::NonZeroExit {
                operation,
                code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
