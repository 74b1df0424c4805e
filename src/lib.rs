//! commitgen - generate conventional commit messages from staged changes.
//!
//! # Overview
//!
//! commitgen reads the staged diff and recent history of a git repository,
//! formats them into a prompt, and asks a Gemini model for a commit message.
//! When the repository has no usable history, bundled example messages are
//! sent instead so the model still has a style reference.
//!
//! ```no_run
//! # async fn run() -> Result<(), commitgen::CommitGenError> {
//! let message = commitgen::quick_generate("your-api-key").await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod generator;
pub mod git;

// Re-export commonly used types
pub use config::{GeneratorConfig, Options};
pub use error::{CommitGenError, CompletionError, ContextError, GeneratorError, GitError};
pub use facade::{CommitGen, quick_generate, quick_generate_short, quick_generate_with_options};
pub use generator::{CompletionClient, GeminiClient, MessageGenerator, MessageStyle};
pub use git::{GitRepository, RepositoryContext};
