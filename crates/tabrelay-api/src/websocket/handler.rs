//! WebSocket handler implementation.
//!
//! Credentials are checked before the upgrade; an unauthenticated request is
//! answered with 401 and never reaches the registry. Frames larger than
//! `max_message_bytes` are rejected by the protocol layer, which ends the
//! socket.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tabrelay_protocols::{Connection, ConnectionId, UserId};

use crate::auth::AuthenticatedUser;
use crate::state::AppState;

use super::connection::WsConnection;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let ws = match state.relay.max_message_bytes {
        Some(max) => ws.max_message_size(max),
        None => ws,
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state, user))
}

/// Drive one socket: register, relay inbound text, deregister on close.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: UserId) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<String>(state.relay.outbound_queue_capacity);

    let connection = Arc::new(WsConnection::new(ConnectionId::generate(), tx));
    let connection_id = connection.id().clone();
    info!(user = %user, connection = %connection_id, "WebSocket connected");

    // Writer task: the only place that touches the socket's sink.
    let writer_id = connection_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if let Err(e) = sink.send(Message::Text(text.into())).await {
                debug!(connection = %writer_id, error = %e, "WebSocket write failed");
                break;
            }
        }
    });

    state.registry.connect(connection.clone(), &user);

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state
                    .registry
                    .relay(&connection_id, text.as_str(), &user)
                    .await;
            }
            Ok(Message::Binary(data)) => {
                debug!(connection = %connection_id, len = data.len(), "Ignoring binary frame");
            }
            Ok(Message::Close(_)) => {
                info!(user = %user, connection = %connection_id, "WebSocket closed");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(user = %user, connection = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    // Cleanup
    state.registry.disconnect(&connection_id, &user);
    writer.abort();
    info!(user = %user, connection = %connection_id, "WebSocket disconnected");
}
