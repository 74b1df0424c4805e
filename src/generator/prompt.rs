//! System instructions and user-prompt construction.
//!
//! The instruction texts and the prompt template are part of the observable
//! behavior of the generator; edits here change what the model produces.

use crate::git::RepositoryContext;

/// Instruction for a full commit message (subject and body).
pub const FULL_SYSTEM_INSTRUCTION: &str = r#"You are a git commit message generator. Analyze the provided git diff and recent git log to create a complete commit message with both subject and body.

Format:
- Subject line: type(scope): brief description (max 50 chars)
- Blank line
- Body: Detailed explanation of WHAT, HOW, and WHY (wrap at 72 chars)

Rules for Subject:
1. Use Conventional Commits format: type(scope): description
2. Common types: feat, fix, refactor, chore, docs, style, test, perf, ci, build
3. Keep under 50 characters
4. Use imperative mood (e.g., "add feature" not "added feature")

Rules for Body:
1. Explain WHAT changed (summary of changes)
2. Explain HOW it was implemented (approach/method)
3. Explain WHY it was necessary (motivation/context)
4. Wrap lines at 72 characters
5. Use bullet points for multiple changes
6. Reference issues/tickets if relevant

Example:
feat(auth): add JWT-based user authentication

- Implement JWT token generation and validation
- Add middleware for protecting authenticated routes
- Create user login/logout endpoints with secure session handling

This change enables secure user sessions and replaces the previous
cookie-based authentication which had security vulnerabilities.
The new system provides better scalability and follows industry
best practices for API authentication.

Match the style and tone of recent commits in the git log.
Output only the commit message, nothing else."#;

/// Instruction for a single subject line.
pub const SHORT_SYSTEM_INSTRUCTION: &str = r#"You are a git commit message generator. Analyze the provided git diff and create a single-line commit message.

Rules:
1. Use Conventional Commits format: type(scope): description
2. Common types: feat, fix, refactor, chore, docs, style, test, perf, ci, build
3. Keep under 50 characters total
4. Use imperative mood (e.g., "add feature" not "added feature")
5. Be concise but descriptive
6. NO body text, NO explanations, just the subject line

Examples:
feat(auth): add JWT authentication
fix(db): resolve connection timeout
refactor(api): simplify error handling
docs(readme): update installation steps
test(user): add login validation tests

Output ONLY the commit subject line, nothing else."#;

/// Example messages shown in place of history when the repository has none.
pub const DEFAULT_COMMIT_EXAMPLES: &str = r#"Example commit messages for reference:

feat(auth): add JWT-based user authentication

- Implement JWT token generation and validation
- Add middleware for protecting authenticated routes
- Create secure login/logout endpoints

This enables secure user sessions and improves API security
by replacing cookie-based auth with industry-standard JWT tokens.

fix(db): resolve connection timeout issues

- Increase connection pool size from 10 to 50
- Add retry logic for failed connections
- Implement connection health checks

Fixes frequent timeout errors during peak usage periods
that were causing 500 errors for users.

refactor(api): simplify error handling across endpoints

- Create centralized error handler middleware
- Standardize error response format
- Remove duplicate error handling code

Improves code maintainability and provides consistent
error messages to frontend clients."#;

/// Length of commit message to ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageStyle {
    /// Subject line plus an explanatory body.
    #[default]
    Full,
    /// Subject line only.
    Short,
}

impl MessageStyle {
    pub fn from_short_flag(short: bool) -> Self {
        if short {
            MessageStyle::Short
        } else {
            MessageStyle::Full
        }
    }

    /// The fixed system instruction for this style.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            MessageStyle::Full => FULL_SYSTEM_INSTRUCTION,
            MessageStyle::Short => SHORT_SYSTEM_INSTRUCTION,
        }
    }
}

/// Build the user message for a context.
///
/// Falls back to [`DEFAULT_COMMIT_EXAMPLES`] when the context carries no
/// usable history, so the model always has a style reference.
pub fn build_prompt(context: &RepositoryContext) -> String {
    let history = context.usable_history().unwrap_or(DEFAULT_COMMIT_EXAMPLES);
    format!(
        "Recent git log:\n{}\n\nGit diff:\n{}\n",
        history,
        context.staged_diff()
    )
}
