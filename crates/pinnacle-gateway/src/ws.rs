//! `WebSocket` handler for the SOC event stream.
//!
//! Clients connect to `GET /stream` and receive every [`StreamEvent`]
//! broadcast while they are connected, one JSON text frame per event. The
//! connection is registered with the [`EventHub`] for exactly as long as
//! this handler runs.
//!
//! If a client falls behind, missed events are skipped and the client
//! resumes from the most recent one.
//!
//! [`StreamEvent`]: pinnacle_types::StreamEvent
//! [`EventHub`]: crate::hub::EventHub

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming events.
///
/// # Route
///
/// `GET /stream`
pub async fn stream(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_stream(socket, state))
}

/// Forward hub frames to the socket until either side goes away.
async fn handle_stream(mut socket: WebSocket, state: Arc<AppState>) {
    let connection = Uuid::now_v7();
    let mut rx = state.hub.subscribe();
    debug!(%connection, open = state.hub.open_connections(), "stream client connected");

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(frame) => {
                        let msg = Message::Text(frame.to_string().into());
                        if socket.send(msg).await.is_err() {
                            debug!(%connection, "stream client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(%connection, skipped, "stream client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!(%connection, "hub closed, ending stream");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(%connection, "stream client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%connection, "stream client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%connection, "stream error: {e}");
                        return;
                    }
                    // Clients only listen; anything else they send is ignored.
                    _ => {}
                }
            }
        }
    }
}
