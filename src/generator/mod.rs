//! Commit message generation through a remote text-completion endpoint.

pub mod client;
pub mod message;
pub mod prompt;

pub use client::{CompletionClient, GeminiClient};
pub use message::MessageGenerator;
pub use prompt::{
    DEFAULT_COMMIT_EXAMPLES, FULL_SYSTEM_INSTRUCTION, MessageStyle, SHORT_SYSTEM_INSTRUCTION,
    build_prompt,
};
