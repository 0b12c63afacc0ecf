//! Connection registry and its supporting types.

mod config;
mod connection;
mod report;

pub use config::RegistryConfig;
pub use connection::ConnectionRegistry;
pub use report::{DeliveryReport, RegistryStats};
