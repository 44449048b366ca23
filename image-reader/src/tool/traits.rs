//! Tool traits.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::schema::input_schema;
use crate::error::Result;
use crate::image::ImageInput;
use crate::reader::ImageReader;

/// JSON object carrying tool arguments or schemas.
pub type JsonObject = serde_json::Map<String, Value>;

/// Object-safe tool interface used by [`ToolSet`](super::ToolSet).
#[async_trait]
pub trait ImageTool: Send + Sync {
    /// The name the tool is registered and called under.
    fn name(&self) -> &'static str;

    /// Description shown to the calling model.
    fn description(&self) -> &'static str;

    /// JSON schema of the argument object.
    fn input_schema(&self) -> JsonObject;

    /// Decode `arguments` and run the tool.
    async fn call(&self, reader: &ImageReader, arguments: JsonObject) -> Result<String>;
}

/// A tool that applies a fixed or caller-supplied instruction to one image.
pub trait VisionTool: Send + Sync {
    /// The name the tool is registered and called under.
    const NAME: &'static str;

    /// Description shown to the calling model.
    const DESCRIPTION: &'static str;

    /// Decoded arguments.
    type Args: DeserializeOwned + JsonSchema + Send;

    /// Split arguments into the image input and the instruction to send.
    ///
    /// `None` leaves the model's default instruction in place.
    fn prepare(&self, args: Self::Args) -> (ImageInput, Option<String>);
}

#[async_trait]
impl<T> ImageTool for T
where
    T: VisionTool,
{
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> JsonObject {
        input_schema::<T::Args>()
    }

    async fn call(&self, reader: &ImageReader, arguments: JsonObject) -> Result<String> {
        let args: T::Args = serde_json::from_value(Value::Object(arguments))?;
        let (image, instruction) = self.prepare(args);
        reader.read(image, instruction).await
    }
}
