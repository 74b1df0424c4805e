//! Error types for commitgen modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from running the `git` CLI.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to run git to {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("No git history found")]
    NoHistory,
}

impl GitError {
    /// Whether the query itself could not run (as opposed to running and
    /// returning nothing).
    pub fn is_io_failure(&self) -> bool {
        !matches!(self, GitError::NoHistory)
    }
}

/// Errors from gathering repository context.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("No staged changes found. Stage your changes with 'git add' first.")]
    NoStagedChanges,

    #[error("Failed to check for staged changes: {0}")]
    StagedCheck(#[source] GitError),

    #[error("Failed to get staged diff: {0}")]
    Diff(#[source] GitError),
}

/// Errors from a single call to the text-completion endpoint.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Generation API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Generation API returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Client has been closed")]
    Closed,
}

/// Errors from constructing or running the message generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("API key not provided in options or GOOGLE_API_KEY environment variable")]
    MissingCredential,

    #[error("Failed to create AI client: {0}")]
    EndpointInit(#[source] CompletionError),

    #[error("Failed to generate commit message: {0}")]
    EndpointCall(#[source] CompletionError),
}

/// Errors surfaced by the [`crate::CommitGen`] facade.
#[derive(Error, Debug)]
pub enum CommitGenError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl CommitGenError {
    /// True when the repository simply has nothing staged.
    pub fn is_no_staged_changes(&self) -> bool {
        matches!(self, CommitGenError::Context(ContextError::NoStagedChanges))
    }
}
