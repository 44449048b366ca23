//! Download-mode resolution against a local HTTP server.

mod test_utils;

use image_reader::image::MAX_DOWNLOAD_BYTES;
use image_reader::{ImageError, ImageResolver, ImageSource, UrlMode};
use test_utils::{MockResponse, MockServer};

fn download(url: String) -> ImageSource {
    ImageSource::RemoteUrl {
        url,
        mode: UrlMode::Download,
    }
}

#[tokio::test]
async fn test_download_inlines_body() {
    let host = MockServer::start(MockResponse::image("image/jpeg", b"GIF8".to_vec())).await;

    let image = ImageResolver::default()
        .resolve(download(format!("{}/cat.jpg", host.url())))
        .await
        .unwrap();

    assert_eq!(image.as_str(), "data:image/jpeg;base64,R0lGOA==");
    let request = host.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/cat.jpg");
}

#[tokio::test]
async fn test_content_type_parameters_are_dropped() {
    let host = MockServer::start(MockResponse::image(
        "image/jpeg; charset=binary",
        b"GIF8".to_vec(),
    ))
    .await;

    let image = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap();
    assert_eq!(image.mime_type(), Some("image/jpeg"));
}

#[tokio::test]
async fn test_non_image_content_type_falls_back_to_png() {
    let host = MockServer::start(MockResponse::image("text/html", b"<html>".to_vec())).await;
    let image = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap();
    assert_eq!(image.mime_type(), Some("image/png"));

    let host = MockServer::start(MockResponse::new(200, b"GIF8".to_vec())).await;
    let image = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap();
    assert_eq!(image.mime_type(), Some("image/png"));
}

#[tokio::test]
async fn test_error_status() {
    let host = MockServer::start(MockResponse::new(404, "missing")).await;

    let err = ImageResolver::default()
        .resolve(download(format!("{}/gone.png", host.url())))
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::DownloadStatus { status } if status.as_u16() == 404));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_announced_size_over_limit() {
    let body = vec![0u8; MAX_DOWNLOAD_BYTES + 1];
    let host = MockServer::start(MockResponse::image("image/png", body)).await;

    let err = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Downloaded image is too large (12582913 bytes). Limit is 12582912 bytes."
    );
}

#[tokio::test]
async fn test_streamed_size_over_limit() {
    let body = vec![0u8; MAX_DOWNLOAD_BYTES + 1];
    let host = MockServer::start(MockResponse::image("image/png", body).without_length()).await;

    let err = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap_err();

    match err {
        ImageError::TooLarge { bytes, limit } => {
            assert_eq!(limit, MAX_DOWNLOAD_BYTES);
            assert!(bytes > MAX_DOWNLOAD_BYTES);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_exactly_at_limit_is_accepted() {
    let body = vec![0u8; MAX_DOWNLOAD_BYTES];
    let host = MockServer::start(MockResponse::image("image/webp", body)).await;

    let image = ImageResolver::default()
        .resolve(download(host.url()))
        .await
        .unwrap();
    assert_eq!(image.mime_type(), Some("image/webp"));
}

#[tokio::test]
async fn test_direct_mode_makes_no_request() {
    let host = MockServer::start(MockResponse::image("image/png", b"GIF8".to_vec())).await;
    let url = format!("{}/cat.png", host.url());

    let image = ImageResolver::default()
        .resolve(ImageSource::RemoteUrl {
            url: url.clone(),
            mode: UrlMode::Direct,
        })
        .await
        .unwrap();

    assert_eq!(image.as_str(), url);
    assert!(host.requests().is_empty());
}

#[tokio::test]
async fn test_download_follows_redirects() {
    let host = MockServer::builder()
        .route("/old.png", MockResponse::redirect("/img.png"))
        .route("/img.png", MockResponse::image("image/gif", b"GIF8".to_vec()))
        .start()
        .await;

    let image = ImageResolver::default()
        .resolve(download(format!("{}/old.png", host.url())))
        .await
        .unwrap();

    assert_eq!(image.as_str(), "data:image/gif;base64,R0lGOA==");
    assert_eq!(host.paths(), ["/old.png", "/img.png"]);
}

#[tokio::test]
async fn test_redirect_to_missing_image_fails() {
    let host = MockServer::builder()
        .route("/old.png", MockResponse::redirect("/gone.png"))
        .start()
        .await;

    let err = ImageResolver::default()
        .resolve(download(format!("{}/old.png", host.url())))
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::DownloadStatus { status } if status.as_u16() == 404));
}
