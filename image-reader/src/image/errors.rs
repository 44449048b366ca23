//! Error types for the image module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating or resolving an image source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageError {
    /// None of the image source fields was provided.
    #[error("Provide exactly one of 'imagePath', 'imageBase64', or 'imageUrl'.")]
    NoSource,

    /// More than one image source field was provided.
    #[error("Provide only one of 'imagePath', 'imageBase64', or 'imageUrl', not multiple.")]
    MultipleSources,

    /// The local file could not be read.
    #[error("Failed to read image file '{}': {source}", path.display())]
    Read {
        /// Absolute path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The remote URL could not be parsed.
    #[error("imageUrl is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Download mode only accepts http and https URLs.
    #[error("imageUrl must be http(s), got scheme '{0}'.")]
    UnsupportedScheme(String),

    /// The image host answered with a non-success status.
    #[error("Failed to download imageUrl ({status}).")]
    DownloadStatus {
        /// Status returned by the image host.
        status: reqwest::StatusCode,
    },

    /// The downloaded body exceeded [`MAX_DOWNLOAD_BYTES`](super::MAX_DOWNLOAD_BYTES).
    #[error("Downloaded image is too large ({bytes} bytes). Limit is {limit} bytes.")]
    TooLarge {
        /// Bytes received (or announced) when the limit was crossed.
        bytes: usize,
        /// The fixed limit.
        limit: usize,
    },

    /// The download failed at the transport level.
    #[error("Failed to download imageUrl: {0}")]
    Download(#[source] reqwest::Error),
}
