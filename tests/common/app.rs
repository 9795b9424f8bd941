//! In-process application fixture
//!
//! Builds the full router (auth gate, CORS, routes) over a fresh in-memory
//! store and a temporary image directory, and sends requests through it
//! without opening a socket.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use quillfeed::backend::build_app;
use quillfeed::backend::store::memory::MemoryStore;
use quillfeed::shared::AppConfig;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Signing secret used by every test application
pub const TEST_SECRET: &str = "integration-test-secret";

/// Page size used by every test application
pub const TEST_PAGE_SIZE: u32 = 2;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub images: TempDir,
}

/// Response with the body parsed as JSON
///
/// Non-JSON bodies are kept as a JSON string; an empty body is `Null`.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let images = tempfile::tempdir().expect("Failed to create image dir");
        let config = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            // Lowest cost bcrypt accepts
            .bcrypt_cost(4)
            .images_dir(images.path())
            .posts_per_page(TEST_PAGE_SIZE)
            .build()
            .expect("Invalid test configuration");

        let store = Arc::new(MemoryStore::new());
        let router = build_app(&config, store.clone(), store.clone()).expect("Failed to build app");

        Self {
            router,
            store,
            images,
        }
    }

    /// Send a request, optionally with a bearer token and a JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
