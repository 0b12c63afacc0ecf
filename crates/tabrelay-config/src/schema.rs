//! Configuration schema definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// How handshake credentials are verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// HS256-signed JWTs issued by the assistant's login endpoint.
    #[default]
    Jwt,
    /// Fixed token -> user table. Development and tests only.
    Static,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,

    /// Shared HMAC secret for `mode = "jwt"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,

    /// Claim holding the user identity. Falls back to `sub` when absent.
    #[serde(default = "default_user_claim")]
    pub user_claim: String,

    /// Token -> user table for `mode = "static"`.
    #[serde(default)]
    pub static_tokens: HashMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            jwt_secret: None,
            user_claim: default_user_claim(),
            static_tokens: HashMap::new(),
        }
    }
}

fn default_user_claim() -> String {
    "username".to_string()
}

/// Relay behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Per-recipient send timeout in milliseconds; 0 disables it.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Outbound frames buffered per connection before senders have to wait.
    #[serde(default = "default_queue_capacity")]
    pub outbound_queue_capacity: usize,

    /// Largest inbound text frame relayed, in bytes; 0 disables the limit.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: default_send_timeout_ms(),
            outbound_queue_capacity: default_queue_capacity(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

fn default_send_timeout_ms() -> u64 {
    5000
}

fn default_queue_capacity() -> usize {
    64
}

fn default_max_message_bytes() -> usize {
    65536
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Write a daily-rotated log file in addition to the console.
    #[serde(default = "default_file_enabled")]
    pub file: bool,

    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_file_enabled(),
            directory: default_log_directory(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_enabled() -> bool {
    true
}

fn default_log_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tabrelay")
        .join("logs")
}
