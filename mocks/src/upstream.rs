//! Mock implementation of the upstream Matrix REST API
//!
//! Runs a real HTTP server on a loopback port with:
//! - Scripted responses per method and path
//! - Error injection for the next request
//! - Request recording for verification
//! - Optional response delays to exercise concurrent calls

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A canned response returned by the mock server
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl MockResponse {
    /// JSON response with the given status
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    /// Plain text response, for exercising non-JSON bodies
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "text/plain",
            delay: None,
        }
    }

    /// Delay the response before it is sent
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string, exactly as sent
    pub path: String,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub raw_body: String,
}

impl RecordedRequest {
    /// Parsed JSON body, if the request carried one
    pub fn json_body(&self) -> Option<Value> {
        if self.raw_body.is_empty() {
            return None;
        }
        serde_json::from_str(&self.raw_body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), MockResponse>>,
    error_injection: Mutex<Option<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock Matrix API server for testing
///
/// Unscripted routes answer `404 {"error":"not found"}`. The server stops when
/// the handle is dropped.
pub struct MockMatrixApi {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockMatrixApi {
    /// Start a mock server on an ephemeral loopback port
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle_request)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                tracing::error!(error = %error, "Mock Matrix API stopped");
            }
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL to hand to the client under test
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Script the response for `method` + `path` (path without query string)
    pub fn respond(&self, method: &str, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .insert((method.to_ascii_uppercase(), path.to_string()), response);
    }

    /// Script a JSON response
    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond(method, path, MockResponse::json(status, body));
    }

    /// Fail the next request regardless of route, then clear
    pub fn inject_error(&self, response: MockResponse) {
        *self.state.error_injection.lock() = Some(response);
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    /// Clear recorded requests
    pub fn clear_history(&self) {
        self.state.requests.lock().clear();
    }

    /// Assert that exactly one request with this method and full path was received
    pub fn assert_requested_once(&self, method: &str, path: &str) -> RecordedRequest {
        let requests = self.state.requests.lock();
        let matching: Vec<_> = requests
            .iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect();
        assert_eq!(
            matching.len(),
            1,
            "Expected exactly one {method} {path}. Received: {:?}",
            requests
                .iter()
                .map(|r| format!("{} {}", r.method, r.path))
                .collect::<Vec<_>>()
        );
        matching[0].clone()
    }
}

impl Drop for MockMatrixApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    state.requests.lock().push(RecordedRequest {
        method: method.as_str().to_string(),
        path,
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        raw_body: String::from_utf8_lossy(&body).into_owned(),
    });

    let injected = state.error_injection.lock().take();
    let response = injected.unwrap_or_else(|| {
        state
            .routes
            .lock()
            .get(&(method.as_str().to_string(), uri.path().to_string()))
            .cloned()
            .unwrap_or_else(|| MockResponse::json(404, json!({"error": "not found"})))
    });

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_request_helpers() {
        let request = RecordedRequest {
            method: "PATCH".to_string(),
            path: "/api/task/7".to_string(),
            headers: HashMap::from([("x-api-key".to_string(), "k".to_string())]),
            raw_body: r#"{"status":"done"}"#.to_string(),
        };

        assert_eq!(request.header("X-API-KEY"), Some("k"));
        assert_eq!(request.json_body(), Some(json!({"status": "done"})));
    }

    #[test]
    fn test_mock_response_builders() {
        let response = MockResponse::text(502, "Bad Gateway").delayed(Duration::from_millis(5));
        assert_eq!(response.content_type, "text/plain");
        assert_eq!(response.delay, Some(Duration::from_millis(5)));
        assert_eq!(MockResponse::json(200, json!([])).body, "[]");
    }
}
