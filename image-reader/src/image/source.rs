//! Image source types.

use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::errors::ImageError;

/// How a remote `imageUrl` is handed to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrlMode {
    /// Pass the URL to the model provider unchanged.
    #[default]
    Direct,
    /// Fetch the image and inline it as a data URL.
    Download,
}

/// Vision detail hint forwarded to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Cheaper, lower resolution analysis.
    Low,
    /// Higher resolution analysis.
    High,
}

impl Detail {
    /// Wire value of the hint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Image arguments shared by every image tool.
///
/// Exactly one of `image_path`, `image_base64` and `image_url` must be
/// non-empty; [`ImageInput::into_source`] enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ImageInput {
    /// Path to an image file on disk (png/jpg/webp/gif). Provide this OR imageBase64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Image bytes as base64, or a full data URL like data:image/png;base64,....
    /// Provide this OR imagePath.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,

    /// Remote image URL (http/https). Provide this OR imagePath OR imageBase64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// If imageUrl is provided: 'direct' passes the URL to the model provider;
    /// 'download' fetches the image and converts it to a data URL. Default: direct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_mode: Option<UrlMode>,

    /// Vision detail level (if supported by your provider/model).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

impl ImageInput {
    /// Input pointing at a local file.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            image_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Input carrying inline base64 or a data URL.
    #[must_use]
    pub fn base64(data: impl Into<String>) -> Self {
        Self {
            image_base64: Some(data.into()),
            ..Self::default()
        }
    }

    /// Input pointing at a remote URL.
    #[must_use]
    pub fn url(url: impl Into<String>, mode: UrlMode) -> Self {
        Self {
            image_url: Some(url.into()),
            url_mode: Some(mode),
            ..Self::default()
        }
    }

    /// Set the detail hint.
    #[must_use]
    pub const fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Narrow the input to a single source.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NoSource`] when no source field is set and
    /// [`ImageError::MultipleSources`] when more than one is.
    pub fn into_source(self) -> Result<ImageSource, ImageError> {
        let Self {
            image_path,
            image_base64,
            image_url,
            url_mode,
            detail: _,
        } = self;

        let provided = |field: Option<String>| field.filter(|value| !value.is_empty());

        match (
            provided(image_path),
            provided(image_base64),
            provided(image_url),
        ) {
            (Some(path), None, None) => Ok(ImageSource::Path(PathBuf::from(path))),
            (None, Some(data), None) => Ok(ImageSource::InlineBytes(data)),
            (None, None, Some(url)) => Ok(ImageSource::RemoteUrl {
                url,
                mode: url_mode.unwrap_or_default(),
            }),
            (None, None, None) => Err(ImageError::NoSource),
            _ => Err(ImageError::MultipleSources),
        }
    }
}

impl TryFrom<ImageInput> for ImageSource {
    type Error = ImageError;

    fn try_from(input: ImageInput) -> Result<Self, Self::Error> {
        input.into_source()
    }
}

/// Exactly one image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file, relative paths resolve against the working directory.
    Path(PathBuf),
    /// Raw base64 or an already formed data URL.
    InlineBytes(String),
    /// Remote image.
    RemoteUrl {
        /// The URL as given.
        url: String,
        /// Whether to pass it through or download it.
        mode: UrlMode,
    },
}

impl ImageSource {
    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::InlineBytes(_) => "inline",
            Self::RemoteUrl {
                mode: UrlMode::Direct,
                ..
            } => "url_direct",
            Self::RemoteUrl {
                mode: UrlMode::Download,
                ..
            } => "url_download",
        }
    }
}

/// Canonical image reference: a remote URL or a base64 data URL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an already canonical reference.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The reference as sent to the model.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the image is inlined as a data URL.
    #[must_use]
    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// The MIME segment of a data URL.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
    }
}

impl fmt::Debug for ImageRef {
    // Data URLs can be megabytes long.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_data_url() {
            write!(
                f,
                "ImageRef(data:{}, {} bytes)",
                self.mime_type().unwrap_or_default(),
                self.0.len()
            )
        } else {
            f.debug_tuple("ImageRef").field(&self.0).finish()
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
