//! Test support: an in-process stand-in for the Staple backend.
//!
//! Routes are canned per (method, path). Every request is recorded so tests
//! can assert on exactly what the client sent.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::alert::Alerter;
use crate::api::StapleClient;
use crate::config::ApiConfig;
use crate::session::SessionContext;
use crate::views::ViewContext;

/// Keeps every alert in memory, in order
#[derive(Debug, Default)]
pub struct RecordingAlerter {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().ok().and_then(|m| m.last().cloned())
    }
}

impl Alerter for RecordingAlerter {
    fn alert(&self, message: &str) {
        tracing::debug!(message, "Alert");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// A request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    delays: Mutex<HashMap<String, Duration>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock backend listening on an ephemeral local port
pub struct MockBackend {
    url: String,
    inner: Arc<Inner>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let inner = Arc::new(Inner::default());
        let app = Router::new().fallback(handle).with_state(inner.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            inner,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.inner.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Canned {
                status,
                body: Some(body),
            },
        );
    }

    /// Answer `method path` with `status` and no body
    pub fn respond_empty(&self, method: Method, path: &str, status: u16) {
        self.inner
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Canned { status, body: None });
    }

    /// Hold every answer on `path` for `delay`
    pub fn delay(&self, path: &str, delay: Duration) {
        self.inner
            .delays
            .lock()
            .unwrap()
            .insert(path.to_string(), delay);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    /// Client pointed at this backend
    pub fn client(&self, session: SessionContext) -> StapleClient {
        let config = ApiConfig {
            base_url: self.url.clone(),
            request_timeout_secs: 5,
        };
        StapleClient::new(&config, session).unwrap()
    }
}

async fn handle(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    inner.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: header_value(header::AUTHORIZATION.as_str()),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        request_id: header_value("x-request-id"),
        body: serde_json::from_slice(&body).ok(),
    });

    let delay = inner.delays.lock().unwrap().get(&path).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let canned = inner
        .routes
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned();

    match canned {
        Some(Canned { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap();
            match body {
                Some(body) => (status, axum::Json(body)).into_response(),
                None => status.into_response(),
            }
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// View context with no session, plus the alerts it raises
pub fn signed_out_context(backend: &MockBackend) -> (ViewContext, Arc<RecordingAlerter>) {
    let alerts = Arc::new(RecordingAlerter::new());
    let client = backend.client(SessionContext::in_memory());
    (ViewContext::new(client, alerts.clone()), alerts)
}

/// View context holding the token `secret`
pub fn signed_in_context(backend: &MockBackend) -> (ViewContext, Arc<RecordingAlerter>) {
    let (ctx, alerts) = signed_out_context(backend);
    ctx.session.sign_in("secret").unwrap();
    (ctx, alerts)
}
