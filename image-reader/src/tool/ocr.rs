//! `ocr_image`: text extraction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::templates;
use super::traits::VisionTool;
use crate::image::ImageInput;

/// Shape of the OCR answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OcrFormat {
    /// Plain text in reading order.
    #[default]
    Text,
    /// A JSON object with the full text and individual lines.
    Json,
}

impl OcrFormat {
    /// Template option name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Arguments of [`OcrImageTool`].
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OcrArgs {
    /// The image to read.
    #[serde(flatten)]
    pub image: ImageInput,

    /// Output format. 'text' returns plain text. 'json' asks the model to
    /// return a JSON object with lines.
    #[serde(default)]
    pub format: Option<OcrFormat>,
}

/// Extracts visible text from an image.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcrImageTool;

impl VisionTool for OcrImageTool {
    const NAME: &'static str = "ocr_image";
    const DESCRIPTION: &'static str = "Extract visible text from an image (OCR-like). Returns text in reading order; best-effort.";

    type Args = OcrArgs;

    fn prepare(&self, args: OcrArgs) -> (ImageInput, Option<String>) {
        let format = args.format.unwrap_or_default();
        (args.image, templates::render(Self::NAME, format.as_str()))
    }
}
