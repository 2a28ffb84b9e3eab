//! Shared harness for HTTP-level tests: a temporary asset root plus the
//! production router built over it.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mwres_api::config::{LogFormat, ServerConfig};
use mwres_api::router::build_app_router;
use mwres_api::state::AppState;
use mwres_core::pool::TypeInferenceRules;
use mwres_store::DataLayout;
use tempfile::TempDir;
use tower::ServiceExt;

/// A temporary asset root with the conventional layout.
pub struct TestEnv {
    pub dir: TempDir,
    pub layout: DataLayout,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::from_base_dir(dir.path());
        fs::create_dir_all(&layout.data_dir).unwrap();
        fs::create_dir_all(&layout.image_dir).unwrap();
        Self { dir, layout }
    }

    /// Build a test `ServerConfig` rooted at this environment.
    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5000".to_string()],
            request_timeout_secs: 30,
            log_format: LogFormat::Pretty,
            layout: self.layout.clone(),
            type_rules_file: None,
        }
    }

    /// The full application router, same middleware stack as production.
    pub fn app(&self) -> Router {
        let config = self.config();
        let state = AppState::new(config.clone(), TypeInferenceRules::default());
        build_app_router(state, &config)
    }

    pub fn csv(&self, rel_path: &str, content: &str) -> &Self {
        write(&self.layout.data_dir.join(rel_path), content.as_bytes());
        self
    }

    pub fn sprite(&self, folder: &str, file_name: &str) -> &Self {
        write(&self.layout.image_dir.join(folder).join(file_name), b"png");
        self
    }

    /// Write a file relative to the asset root.
    pub fn file(&self, rel_path: &str, bytes: &[u8]) -> &Self {
        write(&self.layout.base_dir.join(rel_path), bytes);
        self
    }

    pub fn new_data_config(&self, json: &str) -> &Self {
        write(&self.layout.new_data_config_file, json.as_bytes());
        self
    }

    pub fn item_type_mapping(&self, json: &str) -> &Self {
        write(&self.layout.item_type_mapping_file, json.as_bytes());
        self
    }

    pub fn activity(&self, kind: &str, id: &str, json: &str) -> &Self {
        write(
            &self.layout.activity_dir.join(kind).join(format!("{id}.json")),
            json.as_bytes(),
        );
        self
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
