#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use url::Url;
use vitibrasil_api::config::Config;
use vitibrasil_api::db::Storage;
use vitibrasil_api::router::{AppState, app_router};

/// A router backed by a throwaway SQLite file, removed on drop.
pub struct TestApp {
    pub router: Router,
    pub storage: Storage,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

pub fn test_config() -> Config {
    Config {
        secret_key: "test-secret".to_string(),
        bcrypt_cost: 4,
        ..Config::default()
    }
}

pub async fn spawn_app(tag: &str) -> TestApp {
    spawn_app_with(tag, test_config()).await
}

pub async fn spawn_app_with(tag: &str, cfg: Config) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "vitibrasil-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let storage = Storage::connect(&database_url)
        .await
        .expect("failed to open test database");
    let state = AppState::new(storage.clone(), &cfg).expect("failed to build state");
    TestApp {
        router: app_router(state),
        storage,
        path,
    }
}

pub fn config_with_source(base: Url) -> Config {
    Config {
        source_base_url: base,
        download_rate_per_minute: 600,
        ..test_config()
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed")
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        let resp = self.send(req).await;
        read_json(resp).await
    }

    /// Register `username` and log in, returning the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, _) = self
            .json(
                "POST",
                "/auth/users",
                None,
                Some(serde_json::json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.token(username, password).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn token(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let form = format!("grant_type=password&username={username}&password={password}");
        let req = Request::builder()
            .method("POST")
            .uri("/auth/token")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("failed to build request");
        read_json(self.send(req).await).await
    }
}

pub async fn read_json(resp: Response<Body>) -> (StatusCode, Value) {
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).expect("response body was not json");
    (status, value)
}
