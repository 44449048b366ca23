//! Ordered collection of tools.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::describe::DescribeImageTool;
use super::help::HelpTool;
use super::ocr::OcrImageTool;
use super::read::ReadImageTool;
use super::receipt::ExtractReceiptTool;
use super::traits::{ImageTool, JsonObject};
use crate::error::{Error, Result};
use crate::reader::ImageReader;

/// Tools in registration order.
///
/// [`ToolSet::default`] holds the five built-in tools: `help`, `read_image`,
/// `describe_image`, `ocr_image` and `extract_receipt`.
#[derive(Clone)]
pub struct ToolSet {
    tools: Vec<Arc<dyn ImageTool>>,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names())
            .finish()
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        let mut tools = Self::new();
        tools.add_tool(HelpTool);
        tools.add_tool(ReadImageTool);
        tools.add_tool(DescribeImageTool);
        tools.add_tool(OcrImageTool);
        tools.add_tool(ExtractReceiptTool);
        tools
    }
}

impl ToolSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Add a tool. A tool with the same name is replaced in place.
    pub fn add_tool(&mut self, tool: impl ImageTool + 'static) {
        let tool: Arc<dyn ImageTool> = Arc::new(tool);
        match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            Some(slot) => *slot = tool,
            None => self.tools.push(tool),
        }
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ImageTool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| &**tool)
    }

    /// Whether a tool with `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ImageTool> {
        self.tools.iter().map(|tool| &**tool)
    }

    /// Tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|tool| tool.name()).collect()
    }

    /// Number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the tool called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] for an unregistered name, otherwise
    /// whatever the tool returns.
    #[instrument(skip(self, reader, arguments))]
    pub async fn call(
        &self,
        reader: &ImageReader,
        name: &str,
        arguments: JsonObject,
    ) -> Result<String> {
        let tool = self.get(name).ok_or_else(|| Error::unknown_tool(name))?;
        debug!(arguments = arguments.len(), "Dispatching tool");
        tool.call(reader, arguments).await
    }
}
