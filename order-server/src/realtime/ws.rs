//! WebSocket gateway for order event subscribers
//!
//! Each connection gets its own session entry and its own subscription to
//! the event bus. Every order event is pushed to every connected socket —
//! customer table views and the staff dashboard all filter for relevance
//! on their own side. The `{"event": "join-dashboard"}` frame only tags
//! the session as a dashboard observer; it does not gate delivery.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use shared::ClientFrame;

use crate::core::ServerState;

/// Per-connection session state, registered in [`ServerState::sessions`]
#[derive(Debug, Clone)]
pub struct SocketSession {
    /// Set once the client joins the dashboard room (metadata only —
    /// event delivery is the same for every connection)
    pub joined_dashboard: bool,
    pub connected_at: DateTime<Utc>,
}

impl SocketSession {
    fn new() -> Self {
        Self {
            joined_dashboard: false,
            connected_at: Utc::now(),
        }
    }
}

/// GET /ws — upgrade to WebSocket
pub async fn ws_handler(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: ServerState) {
    let session_id = Uuid::new_v4();
    state.sessions.insert(session_id, SocketSession::new());
    tracing::info!(%session_id, "WebSocket connected");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let mut events = state.events.subscribe();
    let shutdown = state.events.shutdown_token();

    // Main select loop
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,

            // Incoming frame from the client
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_frame(&text, session_id, &state);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!(%session_id, "WebSocket disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%session_id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Binary, Pong — ignore
                }
            }

            // Event to push to this subscriber
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event)
                            && ws_sink.send(Message::Text(json.into())).await.is_err()
                        {
                            tracing::warn!(%session_id, "Failed to push event, disconnecting");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Dropped events are recovered by the client's next
                        // bulk fetch
                        tracing::warn!(%session_id, skipped, "Subscriber lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    // Send Close frame (best-effort)
    let _ = ws_sink.close().await;

    state.sessions.remove(&session_id);
    tracing::info!(%session_id, "WebSocket session cleaned up");
}

fn handle_client_frame(text: &str, session_id: Uuid, state: &ServerState) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(%session_id, "Invalid client frame: {e}");
            return;
        }
    };

    match frame {
        ClientFrame::JoinDashboard => {
            if let Some(mut session) = state.sessions.get_mut(&session_id) {
                session.joined_dashboard = true;
            }
            tracing::info!(%session_id, "Client joined dashboard");
        }
    }
}
