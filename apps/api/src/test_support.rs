//! In-process stand-in for the Gemini API, used by unit tests.

use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: Option<String>,
    /// Value of the `x-goog-api-key` header, if sent.
    pub api_key: Option<String>,
    pub body: Value,
}

pub struct StubUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubUpstream {
    pub fn last_request(&self) -> Option<SeenRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Starts a server on an ephemeral port that answers every request with
/// `status` and the JSON `body`, recording what it received.
pub async fn spawn_upstream(status: StatusCode, body: Value) -> StubUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let handler = move |uri: Uri, headers: HeaderMap, payload: String| {
        let recorded = recorded.clone();
        let body = body.clone();
        async move {
            recorded.lock().unwrap().push(SeenRequest {
                path: uri.path().to_string(),
                query: uri.query().map(str::to_string),
                api_key: headers
                    .get("x-goog-api-key")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_str(&payload).unwrap_or(Value::Null),
            });
            (status, Json(body))
        }
    };

    let app = Router::new().fallback(handler);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Base URL of a local port with nothing listening on it.
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A `generateContent` success envelope whose first candidate carries `text`.
pub fn upstream_text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": text}], "role": "model"}, "finishReason": "STOP"}
        ],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 80}
    })
}
