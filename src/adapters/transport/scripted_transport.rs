//! Scripted transport for testing.
//!
//! Answers requests from canned responses keyed by method and path, and
//! records every request for later assertions.
//!
//! # Features
//!
//! - Responses consumed in order per route; the last one repeats
//! - Simulated latency per response, for out-of-order completion tests
//! - Transport failure injection
//!
//! # Example
//!
//! ```ignore
//! let transport = ScriptedTransport::new()
//!     .with_route(Method::GET, "/books/5", ScriptedResponse::data(json!({"book_id": 5})));
//!
//! let gateway = ApiGateway::new(base_url, Arc::new(transport.clone()), tokens);
//! gateway.request(Method::GET, "/books/5", RequestOptions::new()).await?;
//! assert_eq!(transport.requests_to("/books/5").len(), 1);
//! ```

use async_trait::async_trait;
use http::{Method, StatusCode, Uri};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{HttpTransport, TransportError, TransportRequest, TransportResponse};

/// A canned outcome plus the latency before it is delivered.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    outcome: Result<TransportResponse, TransportError>,
    delay: Duration,
}

impl ScriptedResponse {
    /// Any JSON body with any status.
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self::raw(status, body.to_string())
    }

    /// A body that is not necessarily JSON.
    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(TransportResponse::new(status, body)),
            delay: Duration::ZERO,
        }
    }

    /// `200 {"success": true, "data": data}`.
    pub fn data(data: Value) -> Self {
        Self::json(StatusCode::OK, json!({ "success": true, "data": data }))
    }

    /// `200 {"success": true, "message": message}` with no data.
    pub fn message(message: &str) -> Self {
        Self::json(StatusCode::OK, json!({ "success": true, "message": message }))
    }

    /// `{"success": false, "message": message}` with the given status.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, json!({ "success": false, "message": message }))
    }

    /// The request never reaches a server.
    pub fn failure(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the transport saw it, with the bearer token exposed for
/// assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// First value of query parameter `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn path(&self) -> String {
        url_path(&self.url)
    }
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    responses: VecDeque<ScriptedResponse>,
}

impl Route {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && path_matches(path, &self.path)
    }

    fn next_response(&mut self) -> Option<ScriptedResponse> {
        if self.responses.len() > 1 {
            self.responses.pop_front()
        } else {
            self.responses.front().cloned()
        }
    }
}

fn url_path(url: &str) -> String {
    url.parse::<Uri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

/// `route` matches `path` exactly or as a suffix, so routes can be written
/// relative to the API base.
fn path_matches(path: &str, route: &str) -> bool {
    path == route || (route.starts_with('/') && path.ends_with(route))
}

/// Transport that replays scripted responses.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ScriptedTransport::respond`].
    pub fn with_route(self, method: Method, path: &str, response: ScriptedResponse) -> Self {
        self.respond(method, path, response);
        self
    }

    /// Queues `response` for `method path`.
    pub fn respond(&self, method: Method, path: &str, response: ScriptedResponse) {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.responses.push_back(response);
            return;
        }
        routes.push(Route {
            method,
            path: path.to_string(),
            responses: VecDeque::from([response]),
        });
    }

    /// Drops queued responses for `method path` and scripts `response` instead.
    pub fn replace(&self, method: Method, path: &str, response: ScriptedResponse) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|r| !(r.method == method && r.path == path));
        self.respond(method, path, response);
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests whose path matches `path` the way routes do.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| path_matches(&r.path(), path))
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn next_response(&self, method: &Method, path: &str) -> Option<ScriptedResponse> {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        // Longest route first so `/books/similar/5` wins over `/5`-style suffixes.
        routes
            .iter_mut()
            .filter(|r| r.matches(method, path))
            .max_by_key(|r| r.path.len())
            .and_then(Route::next_response)
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let recorded = RecordedRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            query: request.query.clone(),
            bearer: request
                .bearer
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
            body: request.body.clone(),
        };
        let path = recorded.path();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(recorded);

        let Some(response) = self.next_response(&request.method, &path) else {
            return Ok(TransportResponse::new(
                StatusCode::NOT_FOUND,
                json!({
                    "success": false,
                    "message": format!("No scripted route for {} {}", request.method, path),
                })
                .to_string(),
            ));
        };

        if !response.delay.is_zero() {
            sleep(response.delay).await;
        }
        response.outcome
    }
}
