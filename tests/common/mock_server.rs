//! Local HTTP server speaking the Jules API
//!
//! Serves the canned payloads from [`super::fixtures`] under `/v1alpha`,
//! rejects requests without the API key header and records every request.
//! Individual paths can be made to fail.
//! Created sessions and sent messages are applied to its state so refetches
//! observe them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};

use super::fixtures;

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below `/v1alpha`, without the leading slash.
    pub path: String,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

struct ServerState {
    api_key: String,
    sessions: Mutex<Vec<Value>>,
    activities: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    failures: Mutex<HashMap<String, (StatusCode, String)>>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl MockServer {
    /// Bind to an ephemeral port and serve in the background.
    pub async fn start() -> Self {
        let sessions = fixtures::sessions()["sessions"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let s1 = fixtures::activities()["activities"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let state = Arc::new(ServerState {
            api_key: fixtures::API_KEY.to_string(),
            sessions: Mutex::new(sessions),
            activities: Mutex::new(HashMap::from([("s1".to_string(), s1)])),
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1alpha", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    /// Requests to `path` (below `/v1alpha/`), any method.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }

    /// Answer every request to `path` with `status` and `body`.
    pub fn fail(&self, path: &str, status: StatusCode, body: &str) {
        self.state
            .failures
            .lock()
            .insert(path.to_string(), (status, body.to_string()));
    }
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let Some(path) = uri.path().strip_prefix("/v1alpha/").map(str::to_string) else {
        return (StatusCode::NOT_FOUND, "unknown API version").into_response();
    };
    let request = RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        api_key: header_value("x-goog-api-key"),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    state.requests.lock().push(request.clone());

    if request.api_key.as_deref() != Some(state.api_key.as_str()) {
        return (StatusCode::UNAUTHORIZED, "API key not valid").into_response();
    }
    if let Some((status, body)) = state.failures.lock().get(&path).cloned() {
        return (status, body).into_response();
    }

    match (method, path.as_str()) {
        (Method::GET, "sources") => json_response(fixtures::sources()),
        (Method::GET, "sessions") => {
            let sessions = state.sessions.lock().clone();
            json_response(json!({ "sessions": sessions }))
        }
        (Method::POST, "sessions") => create_session(&state, request.json()),
        (Method::GET, path) if path.starts_with("sources/") => match fixtures::source_detail(path) {
            Some(source) => json_response(source),
            None => (StatusCode::NOT_FOUND, "source not found").into_response(),
        },
        (Method::GET, path) => match path
            .strip_prefix("sessions/")
            .and_then(|rest| rest.strip_suffix("/activities"))
        {
            Some(id) => {
                let feed = state.activities.lock().get(id).cloned().unwrap_or_default();
                json_response(json!({ "activities": feed }))
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        (Method::POST, path) => match path
            .strip_prefix("sessions/")
            .and_then(|rest| rest.strip_suffix(":sendMessage"))
        {
            Some(id) => send_message(&state, id, request.json()),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

fn json_response(value: Value) -> Response {
    (StatusCode::OK, axum::Json(value)).into_response()
}

fn create_session(state: &ServerState, body: Value) -> Response {
    let prompt = body["prompt"].as_str().unwrap_or_default();
    if prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Request contains an invalid argument.",
        )
            .into_response();
    }

    let mut sessions = state.sessions.lock();
    let id = format!("new{}", sessions.len() + 1);
    let session = json!({
        "name": format!("sessions/{}", id),
        "id": id,
        "state": "QUEUED",
        "prompt": prompt,
        "sourceContext": { "source": body["sourceContext"]["source"] }
    });
    sessions.insert(0, session.clone());
    json_response(session)
}

/// Appends the message to the feed and answers with an empty body.
fn send_message(state: &ServerState, id: &str, body: Value) -> Response {
    let mut activities = state.activities.lock();
    let feed = activities.entry(id.to_string()).or_default();
    let number = feed.len() + 1;
    feed.push(json!({
        "name": format!("sessions/{}/activities/sent{}", id, number),
        "id": format!("sent{}", number),
        "createTime": "2025-05-02T08:00:00Z",
        "originator": "user",
        "userMessaged": { "userMessage": body["prompt"] }
    }));
    StatusCode::OK.into_response()
}
