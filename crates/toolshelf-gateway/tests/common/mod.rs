#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use toolshelf_catalog::ClickConfig;
use toolshelf_gateway::{App, AppState, GatewayConfig};
use toolshelf_storage::{DocumentRepository, MemoryDocument};

pub type TestRepository = Arc<DocumentRepository<MemoryDocument>>;

/// Three tools spread over two platforms.
pub const SEED_DOCUMENT: &str = r#"// seeded for tests
export const toolsData = [
  {
    id: '1',
    name: 'Shop Helper',
    description: 'Storefront setup',
    platforms: ['douyin'],
    tags: ['shop'],
    clicks: 5
  },
  {
    id: '2',
    name: 'Batch Uploader',
    description: 'Upload many products at once',
    platforms: ['douyin', 'taobao'],
    categories: ['project_research'],
    tags: ['batch', 'upload'],
    clicks: 50
  },
  {
    id: '3',
    name: 'Analytics',
    description: 'Stats dashboard',
    platforms: ['taobao'],
    tags: ['analytics'],
    clicks: 20
  },
];
"#;

pub fn build_test_app(document: &str, config: GatewayConfig) -> (Router, TestRepository) {
    let repository = Arc::new(DocumentRepository::new(MemoryDocument::new(document)));
    let state = AppState::from_repository(repository.clone(), ClickConfig::default(), config);
    (App::router(state), repository)
}

pub fn seeded_app() -> (Router, TestRepository) {
    build_test_app(SEED_DOCUMENT, GatewayConfig::default())
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub fn json_request(
    method: Method,
    uri: &str,
    body: &Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["id"].as_str().unwrap().to_string())
        .collect()
}
