//! In-process HTTP server for integration tests.
//!
//! Each path maps to a canned response and every request is recorded, so
//! tests can assert on outbound traffic without network access.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use image_reader::{ImageReader, ImageReaderServer, VisionConfig};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const STREAM_CHUNK: usize = 64 * 1024;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    /// Instruction text of a chat completion request.
    pub fn instruction(&self) -> String {
        self.json()["messages"][0]["content"][0]["text"]
            .as_str()
            .expect("text part")
            .to_owned()
    }

    /// `image_url` object of a chat completion request.
    pub fn image_url(&self) -> Value {
        self.json()["messages"][0]["content"][1]["image_url"].clone()
    }
}

/// Canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: Option<String>,
    location: Option<String>,
    body: Bytes,
    chunked: bool,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type: None,
            location: None,
            body: body.into(),
            chunked: false,
        }
    }

    pub fn image(content_type: &str, body: impl Into<Bytes>) -> Self {
        Self::new(200, body).content_type(content_type)
    }

    /// `302 Found` pointing at `location`.
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(302, Bytes::new());
        response.location = Some(location.to_owned());
        response
    }

    /// A chat completion whose first choice says `content`.
    pub fn completion(content: Value) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        });
        Self::new(200, body.to_string()).content_type("application/json")
    }

    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_owned());
        self
    }

    /// Stream the body chunked, without `Content-Length`.
    pub fn without_length(mut self) -> Self {
        self.chunked = true;
        self
    }

    fn to_response(&self) -> Response {
        let mut builder = Response::builder().status(self.status);
        if let Some(content_type) = &self.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(location) = &self.location {
            builder = builder.header(LOCATION, location);
        }

        let body = if self.chunked {
            let chunks: Vec<Result<Bytes, Infallible>> = self
                .body
                .chunks(STREAM_CHUNK)
                .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
                .collect();
            Body::from_stream(futures::stream::iter(chunks))
        } else {
            Body::from(self.body.clone())
        };

        builder.body(body).expect("valid response")
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            method,
            path: uri.path().to_owned(),
            headers,
            body,
        });

    state
        .routes
        .get(uri.path())
        .or(state.fallback.as_ref())
        .map_or_else(|| StatusCode::NOT_FOUND.into_response(), MockResponse::to_response)
}

/// Builder for [`MockServer`].
#[derive(Debug, Default)]
pub struct MockServerBuilder {
    routes: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
}

impl MockServerBuilder {
    /// Answer requests for `path` with `response`.
    pub fn route(mut self, path: &str, response: MockResponse) -> Self {
        self.routes.insert(path.to_owned(), response);
        self
    }

    /// Answer every other path with `response` instead of 404.
    pub fn fallback(mut self, response: MockResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    pub async fn start(self) -> MockServer {
        let state = Arc::new(MockState {
            routes: self.routes,
            fallback: self.fallback,
            requests: Mutex::default(),
        });
        let app = Router::new()
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockServer { addr, state, task }
    }
}

/// HTTP server bound to an ephemeral loopback port.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    /// Answer every path with `response`.
    pub async fn start(response: MockResponse) -> Self {
        Self::builder().fallback(response).start().await
    }

    /// Base URL without a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.path).collect()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("one request")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Server backed by a model API at `api`.
pub fn server_for(api: &MockServer) -> ImageReaderServer {
    let config = VisionConfig::builder()
        .api_key("sk-test")
        .base_url(format!("{}/v1", api.url()))
        .build();
    ImageReaderServer::new(ImageReader::new(config).expect("reader"))
}

pub fn args(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

pub fn result_text(result: &CallToolResult) -> &str {
    result.content[0]
        .raw
        .as_text()
        .map(|text| text.text.as_str())
        .expect("text content")
}
