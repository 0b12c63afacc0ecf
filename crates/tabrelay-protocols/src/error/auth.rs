//! Authentication errors raised at the handshake boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token is missing the '{0}' claim")]
    MissingClaim(String),

    #[error("Unknown token")]
    UnknownToken,
}
