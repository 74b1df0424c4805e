//! The repository snapshot handed to the message generator.

/// Staged diff plus recent history, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    staged_diff: String,
    recent_history: String,
    has_history: bool,
}

impl RepositoryContext {
    pub fn new(
        staged_diff: impl Into<String>,
        recent_history: impl Into<String>,
        has_history: bool,
    ) -> Self {
        Self {
            staged_diff: staged_diff.into(),
            recent_history: recent_history.into(),
            has_history,
        }
    }

    /// Build a context from caller-supplied text.
    ///
    /// History counts as present only when it is non-empty.
    pub fn from_supplied(staged_diff: impl Into<String>, recent_history: impl Into<String>) -> Self {
        let recent_history = recent_history.into();
        let has_history = !recent_history.is_empty();
        Self::new(staged_diff, recent_history, has_history)
    }

    /// Unified diff of staged changes, untrimmed.
    pub fn staged_diff(&self) -> &str {
        &self.staged_diff
    }

    pub fn recent_history(&self) -> &str {
        &self.recent_history
    }

    /// Whether history was obtained from the repository (or supplied).
    pub fn has_history(&self) -> bool {
        self.has_history
    }

    /// The history text to show the model, if there is any usable history.
    pub fn usable_history(&self) -> Option<&str> {
        (self.has_history && !self.recent_history.is_empty()).then_some(&self.recent_history)
    }
}
