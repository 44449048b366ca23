//! Single-turn vision chat completions.
//!
//! One [`VisionRequest`] becomes exactly one `POST /chat/completions` with a
//! single user message holding a text part and an `image_url` part. No retry.

use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::client::OpenAIClient;
use super::errors::UpstreamError;
use crate::image::{Detail, ImageRef};

/// Instruction used when the caller supplies none.
pub const DEFAULT_INSTRUCTION: &str = "Describe this image.";

/// Returned when the model answers successfully but without text.
pub const NO_TEXT_PLACEHOLDER: &str = "(No text returned by model.)";

/// Upper bound on generated tokens per request.
pub const MAX_OUTPUT_TOKENS: u32 = 700;

/// One image plus the instruction to apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRequest {
    image: ImageRef,
    instruction: Option<String>,
    detail: Option<Detail>,
}

impl VisionRequest {
    /// Create a request with the default instruction and no detail hint.
    #[must_use]
    pub const fn new(image: ImageRef) -> Self {
        Self {
            image,
            instruction: None,
            detail: None,
        }
    }

    /// Set the instruction. Blank instructions fall back to the default.
    #[must_use]
    pub fn with_instruction(mut self, instruction: Option<String>) -> Self {
        self.instruction = instruction;
        self
    }

    /// Set the detail hint.
    #[must_use]
    pub const fn with_detail(mut self, detail: Option<Detail>) -> Self {
        self.detail = detail;
        self
    }

    /// The image reference.
    #[must_use]
    pub const fn image(&self) -> &ImageRef {
        &self.image
    }

    /// The trimmed instruction, or [`DEFAULT_INSTRUCTION`].
    #[must_use]
    pub fn instruction(&self) -> &str {
        self.instruction
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_INSTRUCTION)
    }

    /// The detail hint, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<Detail> {
        self.detail
    }
}

/// A vision-capable chat completion model.
#[derive(Clone)]
pub struct VisionModel {
    client: OpenAIClient,
    model_id: String,
    max_tokens: u32,
}

impl std::fmt::Debug for VisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionModel")
            .field("model_id", &self.model_id)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl VisionModel {
    pub(crate) fn new(client: OpenAIClient, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// The model identifier sent with each request.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Build the request body for the API.
    #[must_use]
    pub fn build_request_body(&self, request: &VisionRequest) -> Value {
        let mut image_url = json!({ "url": request.image().as_str() });
        if let Some(detail) = request.detail() {
            image_url["detail"] = json!(detail.as_str());
        }

        json!({
            "model": self.model_id,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": request.instruction() },
                    { "type": "image_url", "image_url": image_url }
                ]
            }],
            "max_tokens": self.max_tokens
        })
    }

    /// Extract the first choice's text.
    fn parse_response(json: &Value) -> String {
        json["choices"][0]["message"]["content"]
            .as_str()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_TEXT_PLACEHOLDER)
            .to_owned()
    }

    /// Send the request and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, a non-success status or
    /// an undecodable body.
    #[instrument(skip(self, request), fields(model = %self.model_id, detail = ?request.detail()))]
    pub async fn complete(&self, request: &VisionRequest) -> Result<String, UpstreamError> {
        let body = self.build_request_body(request);
        let url = self.client.endpoint("chat/completions");

        debug!(image = ?request.image(), "Sending request to model API");

        let response = self
            .client
            .http_client()
            .post(&url)
            .headers(self.client.auth_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|err| {
                debug!(error = %err, "Failed to read error body");
                String::new()
            });
            return Err(UpstreamError::Status { status, body });
        }

        let json: Value = response.json().await?;
        debug!(usage = %json["usage"], "Model API response");
        Ok(Self::parse_response(&json))
    }
}
