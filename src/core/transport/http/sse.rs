//! Streaming-channel serving mode (Server-Sent Events).
//!
//! A client opens `GET /sse` and receives an `endpoint` event naming the URL
//! to post its JSON-RPC messages to (`/sse/message?sessionId=...`). Each
//! posted message is answered with `202 Accepted`, and its response is
//! delivered on the event stream as a `message` event.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt, stream};
use serde::Deserialize;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

use super::AppState;
use super::rpc::{JsonRpcResponse, parse_message, process_request};

/// Path of the event stream.
pub const SSE_PATH: &str = "/sse";

/// Path clients post their messages to.
pub const SSE_MESSAGE_PATH: &str = "/sse/message";

/// Buffered responses per session before senders wait.
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Open SSE sessions, keyed by session id.
#[derive(Clone, Default)]
pub struct SseSessions {
    inner: Arc<RwLock<HashMap<String, mpsc::Sender<JsonRpcResponse>>>>,
}

impl SseSessions {
    /// Register a new session and return its id and receiving end.
    pub async fn open(&self) -> (String, mpsc::Receiver<JsonRpcResponse>) {
        let session_id = uuid::Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        self.inner.write().await.insert(session_id.clone(), tx);
        (session_id, rx)
    }

    /// Look up the sender of an open session.
    pub async fn sender(&self, session_id: &str) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.inner.read().await.get(session_id).cloned()
    }

    /// Forget a session.
    pub async fn close(&self, session_id: &str) {
        if self.inner.write().await.remove(session_id).is_some() {
            info!("SSE session {} closed", session_id);
        }
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether no session is open.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Removes its session from the table once the event stream is dropped.
struct SessionGuard {
    sessions: SseSessions,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let sessions = self.sessions.clone();
        let session_id = std::mem::take(&mut self.session_id);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { sessions.close(&session_id).await });
        }
    }
}

/// Query string of `POST /sse/message`.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Build the event stream for a session: the endpoint event, then one
/// `message` event per response.
fn session_stream(
    session_id: String,
    rx: mpsc::Receiver<JsonRpcResponse>,
    sessions: SseSessions,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?sessionId={}", SSE_MESSAGE_PATH, session_id));

    let guard = SessionGuard {
        sessions,
        session_id,
    };

    let messages = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        let event = match Event::default().event("message").json_data(&response) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode SSE message: {}", e);
                Event::default().event("message").data("{}")
            }
        };
        Some((event, (rx, guard)))
    });

    stream::once(async move { endpoint })
        .chain(messages)
        .map(Ok::<_, Infallible>)
}

/// `GET /sse` - open an event stream.
pub async fn handle_sse(State(state): State<AppState>) -> impl IntoResponse {
    let (session_id, rx) = state.sessions.open().await;
    info!("SSE session {} opened", session_id);

    Sse::new(session_stream(session_id, rx, state.sessions.clone())).keep_alive(KeepAlive::default())
}

/// `POST /sse/message?sessionId=...` (or `POST /sse?sessionId=...`) - accept
/// a message for a session.
pub async fn handle_sse_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Response {
    let Some(tx) = state.sessions.sender(&query.session_id).await else {
        warn!("Message for unknown SSE session {}", query.session_id);
        return (StatusCode::NOT_FOUND, "Session not found").into_response();
    };

    let response = match parse_message(&body) {
        Ok(request) => {
            debug!("SSE session {} received {}", query.session_id, request.method);
            process_request(&state.server, request).await
        }
        Err(response) => Some(response),
    };

    if let Some(response) = response {
        if tx.send(response).await.is_err() {
            state.sessions.close(&query.session_id).await;
            return (StatusCode::GONE, "Session closed").into_response();
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sessions_open_and_close() {
        let sessions = SseSessions::default();
        let (id, _rx) = sessions.open().await;
        assert_eq!(sessions.len().await, 1);
        assert!(sessions.sender(&id).await.is_some());

        sessions.close(&id).await;
        assert!(sessions.is_empty().await);
        assert!(sessions.sender(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_session_ids_are_unique() {
        let sessions = SseSessions::default();
        let (a, _rx_a) = sessions.open().await;
        let (b, _rx_b) = sessions.open().await;
        assert_ne!(a, b);
        assert_eq!(sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_dropping_stream_closes_session() {
        let sessions = SseSessions::default();
        let (id, rx) = sessions.open().await;

        let mut events = Box::pin(session_stream(id.clone(), rx, sessions.clone()));
        assert!(events.next().await.is_some());
        drop(events);

        // The guard removes the session on a spawned task.
        for _ in 0..50 {
            if sessions.sender(&id).await.is_none() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(sessions.sender(&id).await.is_none());
    }
}
