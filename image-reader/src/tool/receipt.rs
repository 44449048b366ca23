//! `extract_receipt`: structured receipt fields as JSON.

use schemars::JsonSchema;
use serde::Deserialize;

use super::templates::{self, DEFAULT_OPTION};
use super::traits::VisionTool;
use crate::image::ImageInput;

/// Arguments of [`ExtractReceiptTool`].
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptArgs {
    /// The image to read.
    #[serde(flatten)]
    pub image: ImageInput,

    /// Optional hint like 'USD' or 'EUR' to help normalization.
    #[serde(default)]
    pub currency_hint: Option<String>,
}

/// Extracts merchant, date, totals and line items from a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractReceiptTool;

impl VisionTool for ExtractReceiptTool {
    const NAME: &'static str = "extract_receipt";
    const DESCRIPTION: &'static str = "Extract common receipt fields (merchant, date, total, currency, items) from an image. Best-effort; returns JSON.";

    type Args = ReceiptArgs;

    fn prepare(&self, args: ReceiptArgs) -> (ImageInput, Option<String>) {
        let hint = args
            .currency_hint
            .as_deref()
            .map(str::trim)
            .filter(|hint| !hint.is_empty());

        let instruction = templates::render(Self::NAME, DEFAULT_OPTION).map(|mut text| {
            if let Some(hint) = hint {
                text.push_str("\nCurrency hint: ");
                text.push_str(hint);
            }
            text
        });

        (args.image, instruction)
    }
}
