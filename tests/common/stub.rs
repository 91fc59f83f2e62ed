//! Scripted chat-completions endpoint for provider tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// One canned reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn label(content: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({
                "id": "chatcmpl-stub",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }]
            }),
        }
    }

    pub fn status(status: u16, message: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: json!({"error": {"message": message}}),
        }
    }

    pub fn raw(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }
}

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Received {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct StubState {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Mutex<Option<Reply>>,
    received: Mutex<Vec<Received>>,
}

pub struct StubServer {
    pub addr: SocketAddr,
    state: Arc<StubState>,
    _handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, COMPLETIONS_PATH)
    }

    /// Replies served in order, one per request.
    pub fn enqueue(&self, reply: Reply) {
        self.state.replies.lock().push_back(reply);
    }

    /// Reply used once the queue is empty.
    pub fn set_fallback(&self, reply: Reply) {
        *self.state.fallback.lock() = Some(reply);
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.received.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.received.lock().len()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn completions(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: axum::Json<Value>,
) -> impl IntoResponse {
    state.received.lock().push(Received {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.0,
    });

    let reply = state
        .replies
        .lock()
        .pop_front()
        .or_else(|| state.fallback.lock().clone())
        .unwrap_or_else(|| Reply::status(500, "stub has no reply queued"));

    (reply.status, axum::Json(reply.body))
}

pub async fn spawn_stub() -> StubServer {
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route(COMPLETIONS_PATH, post(completions))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    StubServer {
        addr,
        state,
        _handle: handle,
        shutdown_tx: Some(shutdown_tx),
    }
}
