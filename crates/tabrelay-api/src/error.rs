//! Interface error types.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use tabrelay_protocols::AuthError;

/// Interface error types.
#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Handshake or request credentials rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Malformed request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Message exceeds the configured size limit.
    #[error("Message too large: {size} bytes, max {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// Listener address could not be parsed.
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    /// IO error from the listener.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InterfaceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidAddress(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::InvalidAddress(_) | Self::Io(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for InterfaceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_from_auth_error() {
        let err = InterfaceError::from(AuthError::MissingCredentials);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert!(err.to_string().contains("Missing credentials"));
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = InterfaceError::from(AuthError::UnknownToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = InterfaceError::PayloadTooLarge { size: 10, max: 5 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_bad_request_response() {
        let response = InterfaceError::BadRequest("empty message".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
