//! Read-only repository inspection through the git CLI.

pub mod command;
pub mod context;
pub mod history;
pub mod repository;

pub use command::{GitCli, GitCommand, GitExecutor};
pub use context::RepositoryContext;
pub use history::{HISTORY_DEPTH, HISTORY_TIERS, HistoryOutcome, HistoryTier};
pub use repository::GitRepository;
