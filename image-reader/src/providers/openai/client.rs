//! `OpenAI` API client.
//!
//! Works against OpenAI's official API as well as compatible APIs like Azure
//! OpenAI, local proxies, and third-party providers.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use super::completion::VisionModel;
use crate::config::{ConfigError, OPENAI_API_BASE_URL, VisionConfig};

/// `OpenAI` API client for creating vision models.
///
/// # Example
///
/// ```rust,ignore
/// use image_reader::providers::openai::OpenAIClient;
///
/// let client = OpenAIClient::builder()
///     .api_key("sk-...")
///     .base_url("https://my-openai-proxy.com/v1")
///     .build()?;
/// let model = client.vision_model("gpt-4o-mini");
/// ```
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: reqwest::Client,
    api_key: Arc<str>,
    base_url: Arc<str>,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> OpenAIClientBuilder {
        OpenAIClientBuilder::default()
    }

    /// Create a client from the process configuration, reusing an existing
    /// HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key is configured.
    pub fn from_config(
        config: &VisionConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .api_key(config.api_key()?)
            .base_url(config.base_url())
            .http_client(http_client)
            .build()
    }

    /// Create a vision model with the specified model ID.
    #[must_use]
    pub fn vision_model(&self, model_id: impl Into<String>) -> VisionModel {
        VisionModel::new(self.clone(), model_id)
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Full URL of an API path such as `/chat/completions`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);

        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Builder for [`OpenAIClient`].
#[derive(Debug, Default)]
pub struct OpenAIClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl OpenAIClientBuilder {
    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a custom base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Reuse an existing HTTP client.
    #[must_use]
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if the API key is absent or
    /// empty, and [`ConfigError::HttpClient`] if a default HTTP client cannot
    /// be built.
    pub fn build(self) -> Result<OpenAIClient, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| OPENAI_API_BASE_URL.to_string());
        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(ConfigError::HttpClient)?,
        };

        Ok(OpenAIClient {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}
