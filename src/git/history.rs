//! Ordered history sources and their tagged outcomes.

use std::fmt;

use crate::error::GitError;

/// Number of commits requested from each history source.
pub const HISTORY_DEPTH: usize = 10;

/// A history source, from richest to poorest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTier {
    /// Full `git log` output with author, date and body.
    Detailed,
    /// One line per commit.
    Summary,
}

impl HistoryTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryTier::Detailed => "detailed",
            HistoryTier::Summary => "summary",
        }
    }
}

impl fmt::Display for HistoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sources tried in order until one yields history.
pub const HISTORY_TIERS: [HistoryTier; 2] = [HistoryTier::Detailed, HistoryTier::Summary];

/// Result of asking one source for history.
#[derive(Debug)]
pub enum HistoryOutcome {
    /// The query ran and produced history.
    Found(String),
    /// The query ran but there were no commits.
    Empty,
    /// The query could not run.
    Failed(GitError),
}

impl HistoryOutcome {
    /// Classify a history query result.
    pub fn from_result(result: Result<String, GitError>) -> Self {
        match result {
            Ok(text) => HistoryOutcome::Found(text),
            Err(GitError::NoHistory) => HistoryOutcome::Empty,
            Err(e) => HistoryOutcome::Failed(e),
        }
    }

    pub fn into_found(self) -> Option<String> {
        match self {
            HistoryOutcome::Found(text) => Some(text),
            HistoryOutcome::Empty | HistoryOutcome::Failed(_) => None,
        }
    }
}

/// Turn raw log output into history, treating blank output as no history.
pub(crate) fn non_empty_history(output: String) -> Result<String, GitError> {
    if output.trim().is_empty() {
        return Err(GitError::NoHistory);
    }
    Ok(output)
}
