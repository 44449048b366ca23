#![cfg_attr(docsrs, feature(doc_cfg))]
//! Image understanding tools served over the Model Context Protocol.
//!
//! The crate turns one of three image inputs (a local path, inline base64 or a
//! remote URL) into a single canonical image reference, sends it with an
//! instruction to an OpenAI-compatible vision model, and returns the model's
//! text. Four canned operations and a help tool sit on top of that pipeline:
//!
//! ```text
//! tools/call ──► ToolSet ──► ImageReader::read
//!                              ├── VisionConfig::api_key   (ConfigError)
//!                              ├── ImageInput::into_source (InputError)
//!                              ├── ImageResolver::resolve  (InputError)
//!                              └── VisionModel::complete   (UpstreamError)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use image_reader::{ImageInput, ImageReader, VisionConfig};
//!
//! let reader = ImageReader::new(VisionConfig::from_env()?)?;
//! let text = reader
//!     .read(ImageInput::path("receipt.jpg"), Some("OCR the receipt".into()))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod providers;
pub mod reader;
pub mod server;
pub mod tool;

pub use config::{ConfigError, VisionConfig};
pub use error::{Error, ErrorKind, Result};
pub use image::{Detail, ImageError, ImageInput, ImageRef, ImageResolver, ImageSource, UrlMode};
pub use providers::openai::{OpenAIClient, UpstreamError, VisionModel, VisionRequest};
pub use reader::ImageReader;
pub use server::ImageReaderServer;
pub use tool::{ImageTool, ToolSet, VisionTool};
