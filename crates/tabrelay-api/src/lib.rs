//! # tabrelay API
//!
//! HTTP/WebSocket transport in front of the connection registry.
//!
//! - **WebSocket**: one socket per browser tab; text frames are relayed to
//!   the user's other tabs
//! - **HTTP**: server-side pushes, health and statistics
//!
//! ## Architecture
//!
//! ```text
//! browser tab ──ws──▶ AuthenticatedUser ──▶ handle_socket ──▶ ConnectionRegistry
//!                     (TokenVerifier)        │  ▲                 │
//!                                            │  └── WsConnection ◀┘ relay / broadcast
//!                                            ▼
//!                                      writer task ──ws──▶ browser tab
//! ```

pub mod auth;
pub mod error;
pub mod http;
pub mod server;
pub mod state;
pub mod websocket;

pub use auth::{AuthenticatedUser, JwtVerifier, StaticTokenVerifier, TokenVerifier};
pub use error::InterfaceError;
pub use http::routes::create_router;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::{AppState, RelaySettings};
pub use websocket::WsConnection;
