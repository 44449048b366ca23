//! `help`: static usage text.

use async_trait::async_trait;

use super::schema::empty_object_schema;
use super::traits::{ImageTool, JsonObject};
use crate::error::Result;
use crate::reader::ImageReader;

/// Usage text returned by [`HelpTool`].
pub const HELP_TEXT: &str = "\
mcp-image-reader (MCP server)

Available tools:
- describe_image: quick natural-language description / caption.
- ocr_image: extract visible text from an image.
- extract_receipt: extract common receipt fields as JSON (best-effort).
- read_image: advanced/custom prompt for arbitrary image analysis.

Image input:
- Provide exactly one of imagePath OR imageBase64 OR imageUrl.
- imageBase64 may be raw base64 or a full data URL.
- imageUrl can be passed through directly (urlMode=direct) or downloaded then converted to a data URL (urlMode=download).

Environment:
- OPENAI_API_KEY (required)
- OPENAI_BASE_URL (optional, for OpenAI-compatible providers)
- OPENAI_MODEL (optional, default: gpt-4o-mini)
- IMAGE_READER_TIMEOUT_SECS (optional, per-request timeout in seconds)";

/// Returns [`HELP_TEXT`]. Needs no API key and ignores its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpTool;

impl HelpTool {
    /// Registered tool name.
    pub const NAME: &'static str = "help";
}

#[async_trait]
impl ImageTool for HelpTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Show usage, environment variables, and tool guidance for this MCP server."
    }

    fn input_schema(&self) -> JsonObject {
        empty_object_schema()
    }

    async fn call(&self, _reader: &ImageReader, _arguments: JsonObject) -> Result<String> {
        Ok(HELP_TEXT.to_owned())
    }
}
