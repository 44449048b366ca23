//! `read_image`: free-form prompted analysis.

use schemars::JsonSchema;
use serde::Deserialize;

use super::traits::VisionTool;
use crate::image::ImageInput;

/// Arguments of [`ReadImageTool`].
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadImageArgs {
    /// The image to read.
    #[serde(flatten)]
    pub image: ImageInput,

    /// Instruction for what to extract (e.g. 'OCR the receipt', 'Describe the
    /// UI and list buttons'). If omitted, the model will describe the image.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Applies a caller-supplied prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadImageTool;

impl VisionTool for ReadImageTool {
    const NAME: &'static str = "read_image";
    const DESCRIPTION: &'static str = "Read/understand an image using a custom prompt. Use this when you need a specific instruction beyond basic describe/OCR.";

    type Args = ReadImageArgs;

    fn prepare(&self, args: ReadImageArgs) -> (ImageInput, Option<String>) {
        (args.image, args.prompt)
    }
}
