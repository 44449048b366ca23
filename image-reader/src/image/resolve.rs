//! Resolution of an [`ImageSource`] into an [`ImageRef`].

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

use super::errors::ImageError;
use super::mime::{DEFAULT_IMAGE_MIME, data_url, mime_from_content_type, mime_from_path};
use super::source::{ImageRef, ImageSource, UrlMode};

/// Hard ceiling on downloaded image size: 12 MiB.
pub const MAX_DOWNLOAD_BYTES: usize = 12 * 1024 * 1024;

/// Turns image sources into canonical references.
///
/// Holds the HTTP client used for `download` mode; the other variants never
/// touch the network.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    http_client: reqwest::Client,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl ImageResolver {
    /// Create a resolver using the given HTTP client for downloads.
    #[must_use]
    pub const fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Resolve a source into a reference the model API can consume.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the file cannot be read, the URL is not
    /// http(s), the download fails, or the download exceeds
    /// [`MAX_DOWNLOAD_BYTES`].
    #[instrument(skip_all, fields(source = source.kind()))]
    pub async fn resolve(&self, source: ImageSource) -> Result<ImageRef, ImageError> {
        match source {
            ImageSource::Path(path) => read_path(&path).await,
            ImageSource::InlineBytes(data) => Ok(normalize_inline(&data)),
            ImageSource::RemoteUrl {
                url,
                mode: UrlMode::Direct,
            } => Ok(ImageRef::new(url)),
            ImageSource::RemoteUrl {
                url,
                mode: UrlMode::Download,
            } => self.download(&url).await,
        }
    }

    async fn download(&self, url: &str) -> Result<ImageRef, ImageError> {
        let url = Url::parse(url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImageError::UnsupportedScheme(url.scheme().to_owned()));
        }

        debug!(%url, "Downloading image");

        let mut response = self
            .http_client
            .get(url.as_str())
            .send()
            .await
            .map_err(ImageError::Download)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::DownloadStatus { status });
        }

        if let Some(announced) = response.content_length() {
            let announced = usize::try_from(announced).unwrap_or(usize::MAX);
            if announced > MAX_DOWNLOAD_BYTES {
                return Err(ImageError::TooLarge {
                    bytes: announced,
                    limit: MAX_DOWNLOAD_BYTES,
                });
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(ImageError::Download)? {
            body.extend_from_slice(&chunk);
            if body.len() > MAX_DOWNLOAD_BYTES {
                return Err(ImageError::TooLarge {
                    bytes: body.len(),
                    limit: MAX_DOWNLOAD_BYTES,
                });
            }
        }

        let mime = mime_from_content_type(content_type.as_deref());
        debug!(mime, bytes = body.len(), "Downloaded image");
        Ok(ImageRef::new(data_url(mime, &body)))
    }
}

async fn read_path(path: &Path) -> Result<ImageRef, ImageError> {
    let absolute = std::path::absolute(path).map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = tokio::fs::read(&absolute)
        .await
        .map_err(|source| ImageError::Read {
            path: absolute.clone(),
            source,
        })?;

    let mime = mime_from_path(&absolute);
    debug!(path = %absolute.display(), mime, bytes = bytes.len(), "Read image file");
    Ok(ImageRef::new(data_url(mime, &bytes)))
}

/// Wrap raw base64 in a PNG data URL; pass existing data URLs through.
fn normalize_inline(data: &str) -> ImageRef {
    let trimmed = data.trim();
    if trimmed.starts_with("data:") {
        ImageRef::new(trimmed)
    } else {
        ImageRef::new(format!("data:{DEFAULT_IMAGE_MIME};base64,{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_inline_data_url_passthrough() {
        let image = normalize_inline("data:image/gif;base64,AAAA");
        assert_eq!(image.as_str(), "data:image/gif;base64,AAAA");
    }

    #[test]
    fn test_inline_raw_base64_wrapped() {
        assert_eq!(
            normalize_inline("AAAA").as_str(),
            "data:image/png;base64,AAAA"
        );
        assert_eq!(
            normalize_inline("  AAAA\n").as_str(),
            "data:image/png;base64,AAAA"
        );
    }

    #[tokio::test]
    async fn test_direct_url_passthrough() {
        let resolver = ImageResolver::default();
        let image = resolver
            .resolve(ImageSource::RemoteUrl {
                url: "https://example.invalid/cat.png?size=large".into(),
                mode: UrlMode::Direct,
            })
            .await
            .unwrap();
        assert_eq!(image.as_str(), "https://example.invalid/cat.png?size=large");
    }

    #[tokio::test]
    async fn test_path_jpeg() {
        let file = assert_fs::NamedTempFile::new("photo.jpg").unwrap();
        file.write_binary(b"GIF8").unwrap();

        let image = ImageResolver::default()
            .resolve(ImageSource::Path(file.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(image.as_str(), "data:image/jpeg;base64,R0lGOA==");
        assert_eq!(image.mime_type(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_path_unknown_extension() {
        let file = assert_fs::NamedTempFile::new("scan.heic").unwrap();
        file.write_binary(&[0u8, 1, 2]).unwrap();

        let image = ImageResolver::default()
            .resolve(ImageSource::Path(file.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(image.mime_type(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = assert_fs::TempDir::new().unwrap();
        let missing = dir.child("missing.png");

        let err = ImageResolver::default()
            .resolve(ImageSource::Path(missing.path().to_path_buf()))
            .await
            .unwrap_err();

        match err {
            ImageError::Read { path, source } => {
                assert!(path.is_absolute());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relative_path_resolves_against_working_dir() {
        // Tests run from the package root.
        let image = ImageResolver::default()
            .resolve(ImageSource::Path("Cargo.toml".into()))
            .await
            .unwrap();
        assert_eq!(image.mime_type(), Some("image/png"));

        let err = ImageResolver::default()
            .resolve(ImageSource::Path("no-such-dir/cat.png".into()))
            .await
            .unwrap_err();
        match err {
            ImageError::Read { path, .. } => {
                assert!(path.is_absolute());
                assert_eq!(
                    path,
                    std::env::current_dir().unwrap().join("no-such-dir/cat.png")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_download_rejects_other_schemes() {
        let err = ImageResolver::default()
            .resolve(ImageSource::RemoteUrl {
                url: "ftp://example.invalid/cat.png".into(),
                mode: UrlMode::Download,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[tokio::test]
    async fn test_download_rejects_unparsable_url() {
        let err = ImageResolver::default()
            .resolve(ImageSource::RemoteUrl {
                url: "not a url".into(),
                mode: UrlMode::Download,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::InvalidUrl(_)));
    }
}
