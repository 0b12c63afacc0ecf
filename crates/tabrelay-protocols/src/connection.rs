//! Connection protocol definition.
//!
//! A connection is owned by the transport layer. Everything else only holds
//! an `Arc<dyn Connection>` and may push outbound text through it; reading
//! and closing stay with the transport.

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::types::ConnectionId;

/// Outbound half of a bidirectional text channel.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Stable identity of this connection for its whole lifetime.
    fn id(&self) -> &ConnectionId;

    /// Queue one text frame for delivery to the remote end.
    ///
    /// May suspend on transport backpressure. Must not block unrelated tasks.
    async fn send_text(&self, text: &str) -> Result<(), ChannelError>;
}
