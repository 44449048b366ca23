//! Image tools exposed over MCP.
//!
//! [`VisionTool`] is the typed interface for tools that run the image
//! pipeline: decoded arguments in, image input plus instruction out. Every
//! `VisionTool` is also an [`ImageTool`], the object-safe form stored in a
//! [`ToolSet`] and driven by the server. Tools that do not touch an image,
//! like [`HelpTool`], implement [`ImageTool`] directly.

pub mod describe;
pub mod help;
pub mod ocr;
pub mod read;
pub mod receipt;
pub mod schema;
pub mod templates;
pub mod toolset;
pub mod traits;

pub use describe::{DescribeArgs, DescribeImageTool, DescribeStyle};
pub use help::{HELP_TEXT, HelpTool};
pub use ocr::{OcrArgs, OcrFormat, OcrImageTool};
pub use read::{ReadImageArgs, ReadImageTool};
pub use receipt::{ExtractReceiptTool, ReceiptArgs};
pub use toolset::ToolSet;
pub use traits::{ImageTool, JsonObject, VisionTool};
