//! Error types for the tabrelay protocol layer.

mod auth;
mod channel;

pub use auth::*;
pub use channel::*;
