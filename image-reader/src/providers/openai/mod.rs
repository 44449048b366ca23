//! OpenAI-compatible vision completions.

pub mod client;
pub mod completion;
pub mod errors;

pub use client::{OpenAIClient, OpenAIClientBuilder};
pub use completion::{
    DEFAULT_INSTRUCTION, MAX_OUTPUT_TOKENS, NO_TEXT_PLACEHOLDER, VisionModel, VisionRequest,
};
pub use errors::UpstreamError;
