//! Server-originated pushes to every tab of the calling user.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tabrelay_core::DeliveryReport;

use crate::auth::AuthenticatedUser;
use crate::error::InterfaceError;
use crate::state::AppState;

/// Notify request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Text frame delivered verbatim to each connection.
    pub message: String,
}

/// Broadcast a message to all of the caller's connections.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(request): Json<NotifyRequest>,
) -> Result<Json<DeliveryReport>, InterfaceError> {
    if request.message.is_empty() {
        return Err(InterfaceError::BadRequest("message cannot be empty".to_string()));
    }
    if let Some(max) = state.relay.max_message_bytes {
        if request.message.len() > max {
            return Err(InterfaceError::PayloadTooLarge {
                size: request.message.len(),
                max,
            });
        }
    }

    let report = state.registry.broadcast(&request.message, &user).await;
    debug!(user = %user, delivered = report.delivered, failed = report.failed, "Notify broadcast");

    Ok(Json(report))
}
