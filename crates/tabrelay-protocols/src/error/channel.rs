//! Channel errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Channel disconnected")]
    Disconnected,

    #[error("Send timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
}
