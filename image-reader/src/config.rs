//! Process-wide configuration.
//!
//! [`VisionConfig`] is resolved once from the environment and shared by every
//! tool invocation. The API key is optional at load time so the server can
//! still start and answer `help`; it is checked per call through
//! [`VisionConfig::api_key`].

use std::sync::Arc;
use std::time::Duration;

/// Default OpenAI-compatible API base URL.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable overriding the model identifier.
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Environment variable setting the per-request transport timeout in seconds.
pub const TIMEOUT_VAR: &str = "IMAGE_READER_TIMEOUT_SECS";

/// Errors raised while loading or using configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `OPENAI_API_KEY` is absent or empty.
    #[error("OPENAI_API_KEY is not set. Put it in your environment or a .env file.")]
    MissingApiKey,

    /// A variable is set to a value that cannot be used.
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Immutable settings for the vision pipeline.
#[derive(Clone)]
pub struct VisionConfig {
    api_key: Option<Arc<str>>,
    base_url: Arc<str>,
    model: Arc<str>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl VisionConfig {
    /// Create a new config builder.
    #[must_use]
    pub fn builder() -> VisionConfigBuilder {
        VisionConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENAI_API_KEY`: the API key (checked per call, not here)
    /// - `OPENAI_BASE_URL` (optional): custom base URL
    /// - `OPENAI_MODEL` (optional): model identifier, default `gpt-4o-mini`
    /// - `IMAGE_READER_TIMEOUT_SECS` (optional): request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the timeout is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the timeout is not a positive
    /// integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();

        if let Some(api_key) = get(API_KEY_VAR) {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = get(BASE_URL_VAR) {
            builder = builder.base_url(base_url);
        }
        if let Some(model) = get(MODEL_VAR) {
            builder = builder.model(model.trim());
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            builder = builder.timeout_secs(parse_timeout(&raw)?);
        }

        Ok(builder.build())
    }

    /// The API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no key was configured.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The per-request transport timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Build the HTTP client shared by downloads and model calls.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the client cannot be built.
    pub fn build_http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(ConfigError::HttpClient)
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: TIMEOUT_VAR,
        value: raw.to_owned(),
        reason: reason.to_owned(),
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Builder for [`VisionConfig`].
#[derive(Debug, Default)]
pub struct VisionConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

impl VisionConfigBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL.
    ///
    /// Useful for Azure `OpenAI`, local models, or proxies.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = Some(timeout);
        self
    }

    /// Build the config.
    #[must_use]
    pub fn build(self) -> VisionConfig {
        let base_url = self
            .base_url
            .as_deref()
            .map(str::trim)
            .unwrap_or(OPENAI_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();

        VisionConfig {
            api_key: self.api_key.map(Into::into),
            base_url: base_url.into(),
            model: self.model.as_deref().unwrap_or(DEFAULT_MODEL).into(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
