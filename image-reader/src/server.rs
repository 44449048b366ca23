//! MCP server exposing the image tools.
//!
//! Dispatch is manual rather than macro-routed so the tool list stays a
//! runtime [`ToolSet`]. Failures while running a tool are reported inside the
//! tool result (`isError: true`); only an unknown tool name or undecodable
//! arguments become protocol errors.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use tracing::{info, instrument, warn};

use crate::reader::ImageReader;
use crate::tool::ToolSet;

/// Name reported in `initialize`.
pub const SERVER_NAME: &str = "mcp-image-reader";

const INSTRUCTIONS: &str = "Image understanding tools backed by an OpenAI-compatible vision model. \
Every tool except 'help' takes exactly one of imagePath, imageBase64 or imageUrl \
(with urlMode 'direct' or 'download') plus an optional detail of 'low' or 'high'. \
Call 'help' for usage and configuration.";

/// MCP server handler.
#[derive(Debug, Clone)]
pub struct ImageReaderServer {
    reader: ImageReader,
    tools: Arc<ToolSet>,
}

impl ImageReaderServer {
    /// Serve the built-in tools.
    #[must_use]
    pub fn new(reader: ImageReader) -> Self {
        Self::with_tools(reader, ToolSet::default())
    }

    /// Serve a custom tool set.
    #[must_use]
    pub fn with_tools(reader: ImageReader, tools: ToolSet) -> Self {
        if tools.is_empty() {
            warn!("Serving an empty tool set");
        }
        Self {
            reader,
            tools: Arc::new(tools),
        }
    }

    /// The served tools.
    #[must_use]
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Protocol definitions of the served tools, in registration order.
    #[must_use]
    pub fn tool_definitions(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|tool| Tool::new(tool.name(), tool.description(), Arc::new(tool.input_schema())))
            .collect()
    }

    /// Run one tool call and map the outcome onto the protocol.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params [`ErrorData`] for an unknown tool or
    /// undecodable arguments. Every other failure is a tool result with
    /// `is_error` set.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        info!(tool = name, "Tool called");

        match self
            .tools
            .call(&self.reader, name, arguments.unwrap_or_default())
            .await
        {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) if err.kind().is_protocol() => {
                warn!(tool = name, kind = %err.kind(), error = %err, "Rejected tool call");
                Err(ErrorData::invalid_params(err.to_string(), None))
            }
            Err(err) => {
                warn!(tool = name, kind = %err.kind(), error = %err, "Tool failed");
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

impl ServerHandler for ImageReaderServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_owned();
        server_info.version = env!("CARGO_PKG_VERSION").to_owned();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(INSTRUCTIONS.to_owned()),
        }
    }

    async fn list_tools(
        &self,
        _: Option<PaginatedRequestParams>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_definitions(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&request.name, request.arguments).await
    }
}
