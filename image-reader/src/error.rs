//! Unified error type for image reader operations.
//!
//! Each stage of the pipeline owns its error enum; this module folds them
//! into one [`Error`] and classifies it with [`ErrorKind`].

use crate::config::ConfigError;
use crate::image::ImageError;
use crate::providers::openai::UpstreamError;

/// Result type alias for image reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the image reader.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The image source was missing, conflicting, unreadable or out of bounds.
    #[error(transparent)]
    Input(#[from] ImageError),

    /// Required configuration is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The model API call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Tool arguments could not be decoded.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// No tool is registered under the requested name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Input`].
    Input,
    /// See [`Error::Config`].
    Config,
    /// See [`Error::Upstream`].
    Upstream,
    /// See [`Error::InvalidArguments`].
    InvalidArguments,
    /// See [`Error::UnknownTool`].
    UnknownTool,
}

impl ErrorKind {
    /// Stable lowercase name, used as a log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Config => "config",
            Self::Upstream => "upstream",
            Self::InvalidArguments => "invalid_arguments",
            Self::UnknownTool => "unknown_tool",
        }
    }

    /// Whether the failure was caused by the request shape rather than by
    /// executing it.
    #[must_use]
    pub const fn is_protocol(self) -> bool {
        matches!(self, Self::InvalidArguments | Self::UnknownTool)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::Config(_) => ErrorKind::Config,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::InvalidArguments(_) => ErrorKind::InvalidArguments,
            Self::UnknownTool(_) => ErrorKind::UnknownTool,
        }
    }

    /// Create an unknown tool error.
    #[must_use]
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}
