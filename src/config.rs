//! Generator configuration and caller-facing options.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::generator::MessageStyle;

/// Fast, low-latency model used when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite-preview-06-17";

/// Default deadline for a single generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable to override the default timeout (in seconds).
pub const TIMEOUT_ENV_VAR: &str = "COMMITGEN_TIMEOUT";

/// Immutable configuration for a [`crate::MessageGenerator`].
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub model: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The API key, if one is present and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Options accepted by [`crate::CommitGen::new`].
///
/// Every field is optional; unset values fall back to the defaults in
/// [`GeneratorConfig`] and the environment.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Repository directory (`None` for the current directory).
    pub working_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
    pub style: MessageStyle,
    /// Base URL of the generation API (defaults to Google's endpoint).
    pub endpoint: Option<String>,
}

impl Options {
    /// Resolve these options into a generator configuration.
    ///
    /// The API key falls back to `GOOGLE_API_KEY` and the timeout to
    /// `COMMITGEN_TIMEOUT` when not given explicitly. A zero timeout falls back
    /// to the default.
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();

        config.api_key = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(api_key_from_env);

        if let Some(model) = self.model.as_ref().filter(|m| !m.is_empty()) {
            config.model = model.clone();
        }

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }

        config.timeout = match self.timeout {
            Some(timeout) if timeout.is_zero() => {
                warn!(
                    "Invalid timeout of 0s, using default {}s",
                    DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
            Some(timeout) => timeout,
            None => timeout_from_env(),
        };
        config
    }
}

/// Read the API key from `GOOGLE_API_KEY`, ignoring empty values.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty())
}

/// Get the configured timeout duration.
///
/// Reads from `COMMITGEN_TIMEOUT` if set, otherwise uses the default of
/// 10 seconds. Invalid values log a warning and fall back to the default.
pub fn timeout_from_env() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
