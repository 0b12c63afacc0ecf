//! # tabrelay Protocols
//!
//! Shared definitions for the tabrelay workspace.
//! Contains only identities, interface traits and error types - no implementations.
//!
//! ## Core Items
//!
//! - [`UserId`] - Externally verified identity that partitions connections
//! - [`ConnectionId`] - Stable identity of one live connection
//! - [`Connection`] - Outbound half of a transport-owned text channel

pub mod connection;
pub mod error;
pub mod types;

pub use connection::Connection;
pub use error::{AuthError, ChannelError};
pub use types::{ConnectionId, UserId};
