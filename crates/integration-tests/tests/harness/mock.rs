//! Mock provider backend for integration tests
//!
//! Serves both the OpenAI-compatible chat completions route and the
//! Gemini `generateContent` route with a canned response, and captures
//! the last request for assertions.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

/// Canned response the mock serves to every request
#[derive(Clone)]
pub enum MockResponse {
    /// An SSE body delivered in one piece
    Sse(String),
    /// An SSE body whose tail is delayed, for cancellation tests
    SlowSse {
        head: String,
        tail: String,
        delay: Duration,
    },
    /// A JSON body (non-streaming chat, Gemini)
    Json(serde_json::Value),
    /// An error status with a plain body
    Error { status: u16, body: String },
}

/// The last request the mock received
#[derive(Clone)]
pub struct CapturedRequest {
    pub body: serde_json::Value,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
}

struct MockState {
    response: MockResponse,
    captured: Mutex<Option<CapturedRequest>>,
}

/// In-process provider backend
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockProvider {
    /// Start the mock, serving the given response on every route
    pub async fn start(response: MockResponse) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            response,
            captured: Mutex::new(None),
        });

        let app = Router::new()
            .route("/chat/completions", routing::post(handle))
            .route("/models/{model}", routing::post(handle))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            state,
        })
    }

    /// Base URL for configuring the mock as a provider override
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The last captured request, if any arrived
    pub fn captured(&self) -> Option<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let parsed = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    let header_map = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();

    *state.captured.lock().unwrap() = Some(CapturedRequest {
        body: parsed,
        headers: header_map,
        query,
    });

    match &state.response {
        MockResponse::Sse(sse_body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/event-stream")],
            sse_body.clone(),
        )
            .into_response(),
        MockResponse::SlowSse { head, tail, delay } => {
            let chunks = vec![
                (Duration::ZERO, Bytes::from(head.clone())),
                (*delay, Bytes::from(tail.clone())),
            ];
            let stream = futures_util::stream::iter(chunks).then(|(delay, bytes)| async move {
                tokio::time::sleep(delay).await;
                Ok::<_, Infallible>(bytes)
            });
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/event-stream")],
                Body::from_stream(stream),
            )
                .into_response()
        }
        MockResponse::Json(value) => axum::Json(value.clone()).into_response(),
        MockResponse::Error { status, body } => (
            StatusCode::from_u16(*status).expect("valid mock status"),
            body.clone(),
        )
            .into_response(),
    }
}
