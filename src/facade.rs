//! Single entry point wiring repository inspection to message generation.

use crate::config::Options;
use crate::error::{CommitGenError, ContextError};
use crate::generator::{CompletionClient, GeminiClient, MessageGenerator, MessageStyle};
use crate::git::{GitCli, GitExecutor, GitRepository, RepositoryContext};

/// High-level commit message generator for a repository.
pub struct CommitGen<E = GitCli, C = GeminiClient> {
    repository: GitRepository<E>,
    generator: MessageGenerator<C>,
}

impl CommitGen<GitCli, GeminiClient> {
    /// Build a generator from options.
    ///
    /// The API key comes from `options.api_key` or `GOOGLE_API_KEY`.
    pub fn new(options: Options) -> Result<Self, CommitGenError> {
        let config = options.to_config();
        let generator = MessageGenerator::new(config, options.style)?;
        let repository = GitRepository::open(options.working_dir);
        Ok(Self {
            repository,
            generator,
        })
    }
}

impl<E: GitExecutor, C: CompletionClient> CommitGen<E, C> {
    pub fn from_parts(repository: GitRepository<E>, generator: MessageGenerator<C>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Generate a message for what is currently staged.
    pub async fn generate(&self) -> Result<String, CommitGenError> {
        let context = self.repository.gather_context().await?;
        Ok(self.generator.generate(&context).await?)
    }

    /// Generate a message from caller-supplied diff and history.
    ///
    /// Does not touch the repository. An empty `history` means the bundled
    /// examples are used instead.
    pub async fn generate_from_diff(
        &self,
        diff: &str,
        history: &str,
    ) -> Result<String, CommitGenError> {
        let context = RepositoryContext::from_supplied(diff, history);
        Ok(self.generator.generate(&context).await?)
    }

    pub async fn has_staged_changes(&self) -> Result<bool, CommitGenError> {
        self.repository
            .has_staged_changes()
            .await
            .map_err(|e| ContextError::StagedCheck(e).into())
    }

    /// The context that [`CommitGen::generate`] would send, without sending it.
    pub async fn git_info(&self) -> Result<RepositoryContext, CommitGenError> {
        Ok(self.repository.gather_context().await?)
    }

    pub fn generator(&self) -> &MessageGenerator<C> {
        &self.generator
    }

    /// Release the generator's client. Safe to call more than once.
    pub fn close(&mut self) {
        self.generator.close();
    }
}

/// Generate a full commit message for the current directory.
pub async fn quick_generate(api_key: &str) -> Result<String, CommitGenError> {
    quick_generate_with_options(Options {
        api_key: Some(api_key.to_string()),
        ..Default::default()
    })
    .await
}

/// Generate a single-line commit message for the current directory.
pub async fn quick_generate_short(api_key: &str) -> Result<String, CommitGenError> {
    quick_generate_with_options(Options {
        api_key: Some(api_key.to_string()),
        style: MessageStyle::Short,
        ..Default::default()
    })
    .await
}

/// Construct, generate once, and close.
pub async fn quick_generate_with_options(options: Options) -> Result<String, CommitGenError> {
    let mut commit_gen = CommitGen::new(options)?;
    let result = commit_gen.generate().await;
    commit_gen.close();
    result
}
