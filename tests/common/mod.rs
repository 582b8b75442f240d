#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use expense_api::{
    app::{build_router, build_state},
    config::Config,
    repos::MemoryExpenseStore,
    state::AppState,
};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "s3cret-pass";
pub const BASE_URL: &str = "http://localhost:3000";

pub fn config_with(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("JWT_SECRET", "test-secret-that-is-at-least-32-bytes-long"),
        ("AUTH_USERNAME", USERNAME),
        ("AUTH_PASSWORD", PASSWORD),
        ("PUBLIC_BASE_URL", BASE_URL),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    Config::from_source(|key| vars.get(key).cloned()).expect("test config")
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn app() -> TestApp {
    app_with(&[])
}

pub fn app_with(extra: &[(&str, &str)]) -> TestApp {
    let config = config_with(extra);
    let state = build_state(&config, Arc::new(MemoryExpenseStore::new())).expect("test state");
    let router = build_router(state.clone(), &config);
    TestApp { router, state }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::ACCEPT, "application/json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// POST /expenses with a valid body; returns the created detail.
    pub async fn create(&self, title: &str) -> Value {
        let res = self
            .send_json(Method::POST, "/expenses", &expense_body(title))
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.json()
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/login")
                .header(header::AUTHORIZATION, basic(username, password))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn secure(&self, authorization: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method(Method::GET).uri("/secure");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }
}

pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn expense_body(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "Albert Heijn",
        "amount": "45.30",
        "date": "2026-01-19",
        "category": "Food",
    })
}

/// Path part of an absolute link (`http://localhost:3000/expenses/x` -> `/expenses/x`).
pub fn path_of(href: &str) -> &str {
    href.strip_prefix(BASE_URL).unwrap_or(href)
}
