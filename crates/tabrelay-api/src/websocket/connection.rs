//! WebSocket connection handle.

use async_trait::async_trait;
use tokio::sync::mpsc;

use tabrelay_protocols::{ChannelError, Connection, ConnectionId};

/// Outbound side of one WebSocket.
///
/// Frames are queued to the socket's writer task; queue order is wire order.
/// Once the writer exits, every send fails with [`ChannelError::Disconnected`].
pub struct WsConnection {
    id: ConnectionId,
    tx: mpsc::Sender<String>,
}

impl WsConnection {
    pub fn new(id: ConnectionId, tx: mpsc::Sender<String>) -> Self {
        Self { id, tx }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl Connection for WsConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    async fn send_text(&self, text: &str) -> Result<(), ChannelError> {
        self.tx
            .send(text.to_string())
            .await
            .map_err(|_| ChannelError::Disconnected)
    }
}
