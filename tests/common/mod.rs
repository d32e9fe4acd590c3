#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use hoopcast::{
    config::{AppConfig, CommandSpec},
    error::{HoopcastError, Result},
    explain::TextGenerator,
    ml::ModelRunner,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Model runner whose two executables are inline `sh -c` scripts.
/// The JSON payload arrives as `$0`.
pub fn script_runner(matchup_script: &str, features_script: &str) -> ModelRunner {
    let mut config = AppConfig::default_config().model;
    config.matchup = CommandSpec::new("sh", &["-c", matchup_script]);
    config.features = CommandSpec::new("sh", &["-c", features_script]);
    config.timeout_secs = 5;
    ModelRunner::from_config(&config)
}

/// Runner for tests that must never reach a model
pub fn unreachable_runner() -> ModelRunner {
    script_runner(
        "echo 'matchup model should not run' >&2",
        "echo 'feature model should not run' >&2",
    )
}

/// Text generator that records prompts and replies with a fixed text
#[derive(Default)]
pub struct CannedGenerator {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| HoopcastError::Explainer("connection refused".to_string()))
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw)
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json response body")
    };
    (status, value)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}
