//! # tabrelay Core
//!
//! In-memory membership of live connections, partitioned by user, and the
//! fan-out that keeps a user's tabs in sync.
//!
//! ## Architecture
//!
//! ```text
//!   transport task (one per socket)
//!        │ connect / relay / disconnect
//!        ▼
//! ┌──────────────────────────────┐
//! │      ConnectionRegistry      │
//! │  RwLock<UserId → [conn..]>   │──── snapshot ────┐
//! └──────────────────────────────┘                  ▼
//!                                       send_text() to each recipient
//!                                       (lock already released)
//! ```

pub mod registry;

pub use registry::{ConnectionRegistry, DeliveryReport, RegistryConfig, RegistryStats};
