//! The resolve → complete pipeline behind every image tool.

use std::sync::Arc;

use tracing::instrument;

use crate::config::{ConfigError, VisionConfig};
use crate::error::Result;
use crate::image::{ImageInput, ImageResolver};
use crate::providers::openai::{OpenAIClient, VisionModel, VisionRequest};

/// Reads images with a vision model.
///
/// Cheap to clone; the configuration and HTTP client are shared.
#[derive(Debug, Clone)]
pub struct ImageReader {
    config: Arc<VisionConfig>,
    http_client: reqwest::Client,
    resolver: ImageResolver,
}

impl ImageReader {
    /// Create a reader from configuration.
    ///
    /// A missing API key is not an error here; it surfaces on the first
    /// [`read`](Self::read).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: VisionConfig) -> std::result::Result<Self, ConfigError> {
        let http_client = config.build_http_client()?;
        Ok(Self {
            config: Arc::new(config),
            resolver: ImageResolver::new(http_client.clone()),
            http_client,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Build the model for one invocation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key is configured.
    pub fn vision_model(&self) -> std::result::Result<VisionModel, ConfigError> {
        let client = OpenAIClient::from_config(&self.config, self.http_client.clone())?;
        Ok(client.vision_model(self.config.model()))
    }

    /// Resolve `image` and ask the model to apply `instruction` to it.
    ///
    /// The API key is checked before any file or network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) without an API key,
    /// [`Error::Input`](crate::Error::Input) for a bad image source and
    /// [`Error::Upstream`](crate::Error::Upstream) if the model call fails.
    #[instrument(skip_all, fields(model = %self.config.model()))]
    pub async fn read(&self, image: ImageInput, instruction: Option<String>) -> Result<String> {
        let model = self.vision_model()?;

        let detail = image.detail;
        let source = image.into_source()?;
        let image = self.resolver.resolve(source).await?;

        let request = VisionRequest::new(image)
            .with_instruction(instruction)
            .with_detail(detail);

        Ok(model.complete(&request).await?)
    }
}
