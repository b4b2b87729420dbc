//! In-process mock of the school platform API.
//!
//! Each path answers with a queue of scripted responses; the last one
//! repeats once the queue is down to it. Every request is recorded so tests
//! can assert exact call counts and the bearer header each call carried.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use okulpanel::App;
use okulpanel_config::ApiConfig;
use okulpanel_storage::MemoryStorage;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

#[allow(dead_code)]
impl MockResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: Some(body),
        }
    }

    pub fn unauthorized() -> Self {
        Self::status(401, json!({"message": "Unauthorized"}))
    }
}

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct MockState {
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

pub struct MockServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn upload_url(&self) -> String {
        format!("http://{}/uploads", self.addr)
    }

    /// Scripts the responses for `path`, answered in order.
    pub fn respond(&self, path: &str, responses: Vec<MockResponse>) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), responses.into());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls_to(path).len()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api")
        .unwrap_or(uri.path())
        .to_string();

    state.calls.lock().unwrap().push(RecordedCall {
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let response = {
        let mut routes = state.routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    };

    match response {
        Some(MockResponse {
            status,
            body: Some(body),
        }) => (status, axum::Json(body)).into_response(),
        Some(MockResponse { status, body: None }) => status.into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"message": "route not scripted"})),
        )
            .into_response(),
    }
}

/// An application wired to the mock server with in-memory storage.
#[allow(dead_code)]
pub fn test_app(server: &MockServer) -> (App, Arc<MemoryStorage>) {
    let backend = Arc::new(MemoryStorage::new());
    let config = ApiConfig::new(&server.api_url(), &server.upload_url()).unwrap();
    let app = App::new(config, backend.clone());
    (app, backend)
}
