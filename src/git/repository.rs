//! Gathering a best-effort repository snapshot for prompting.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{ContextError, GitError};

use super::command::{GitCli, GitCommand, GitExecutor};
use super::context::RepositoryContext;
use super::history::{HISTORY_DEPTH, HISTORY_TIERS, HistoryOutcome, HistoryTier, non_empty_history};

/// A local repository read through a [`GitExecutor`].
#[derive(Debug, Clone)]
pub struct GitRepository<E = GitCli> {
    executor: E,
}

impl GitRepository<GitCli> {
    /// Open the repository at `working_dir`, or the current directory when
    /// `None`. No git command runs until a query is made.
    pub fn open(working_dir: Option<PathBuf>) -> Self {
        Self {
            executor: GitCli::new(working_dir),
        }
    }
}

impl<E: GitExecutor> GitRepository<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Whether anything is staged, ignoring whitespace-only diffs.
    pub async fn has_staged_changes(&self) -> Result<bool, GitError> {
        let diff = self.staged_diff().await?;
        Ok(!diff.trim().is_empty())
    }

    /// Raw `git diff --staged` output.
    pub async fn staged_diff(&self) -> Result<String, GitError> {
        self.executor.run(GitCommand::StagedDiff).await
    }

    /// The last `count` commits with full metadata.
    ///
    /// Returns `GitError::NoHistory` when the log ran but printed nothing.
    pub async fn detailed_history(&self, count: usize) -> Result<String, GitError> {
        let output = self.executor.run(GitCommand::DetailedLog(count)).await?;
        non_empty_history(output)
    }

    /// The last `count` commits, one line each.
    pub async fn summary_history(&self, count: usize) -> Result<String, GitError> {
        let output = self.executor.run(GitCommand::OnelineLog(count)).await?;
        non_empty_history(output)
    }

    /// Ask a single history source.
    pub async fn history(&self, tier: HistoryTier, count: usize) -> HistoryOutcome {
        let result = match tier {
            HistoryTier::Detailed => self.detailed_history(count).await,
            HistoryTier::Summary => self.summary_history(count).await,
        };
        HistoryOutcome::from_result(result)
    }

    /// Walk the history sources in order and return the first that yields.
    async fn resolve_history(&self) -> Option<String> {
        for tier in HISTORY_TIERS {
            let outcome = self.history(tier, HISTORY_DEPTH).await;
            match &outcome {
                HistoryOutcome::Found(_) => debug!(%tier, "using git history"),
                HistoryOutcome::Empty => debug!(%tier, "history source returned no commits"),
                HistoryOutcome::Failed(e) => debug!(%tier, error = %e, "history source failed"),
            }
            if let Some(text) = outcome.into_found() {
                return Some(text);
            }
        }
        None
    }

    /// Collect the staged diff and recent history.
    ///
    /// Fails with `NoStagedChanges` before touching the diff or the log when
    /// nothing is staged. Missing history only degrades the context.
    pub async fn gather_context(&self) -> Result<RepositoryContext, ContextError> {
        let staged = self
            .has_staged_changes()
            .await
            .map_err(ContextError::StagedCheck)?;
        if !staged {
            return Err(ContextError::NoStagedChanges);
        }

        let diff = self.staged_diff().await.map_err(ContextError::Diff)?;
        // The index may have changed since the check.
        if diff.trim().is_empty() {
            return Err(ContextError::NoStagedChanges);
        }

        let context = match self.resolve_history().await {
            Some(history) => RepositoryContext::new(diff, history, true),
            None => RepositoryContext::new(diff, String::new(), false),
        };
        Ok(context)
    }
}
