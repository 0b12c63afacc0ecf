//! WebSocket interface module.
//!
//! Each upgraded socket becomes a [`WsConnection`] registered with the
//! shared [`ConnectionRegistry`](tabrelay_core::ConnectionRegistry). Inbound
//! text frames are relayed to the user's other tabs.

mod connection;
mod handler;

pub use connection::WsConnection;
pub use handler::ws_handler;
