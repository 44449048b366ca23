//! `describe_image`: a caption-style description.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::templates;
use super::traits::VisionTool;
use crate::image::ImageInput;

/// How verbose a description should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DescribeStyle {
    /// Short scene summary, key objects and visible text.
    #[default]
    Concise,
    /// Scene summary, main objects, attributes and visible text.
    Detailed,
}

impl DescribeStyle {
    /// Template option name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Detailed => "detailed",
        }
    }
}

/// Arguments of [`DescribeImageTool`].
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescribeArgs {
    /// The image to read.
    #[serde(flatten)]
    pub image: ImageInput,

    /// How verbose the description should be.
    #[serde(default)]
    pub style: Option<DescribeStyle>,
}

/// Describes an image in a concise or detailed style.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeImageTool;

impl VisionTool for DescribeImageTool {
    const NAME: &'static str = "describe_image";
    const DESCRIPTION: &'static str = "Generate a concise, agent-friendly description of an image (scene summary + notable objects + any visible text).";

    type Args = DescribeArgs;

    fn prepare(&self, args: DescribeArgs) -> (ImageInput, Option<String>) {
        let style = args.style.unwrap_or_default();
        (args.image, templates::render(Self::NAME, style.as_str()))
    }
}
