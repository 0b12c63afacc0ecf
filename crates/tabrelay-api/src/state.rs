//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tabrelay_config::{Config, ConfigError, RelayConfig};
use tabrelay_core::{ConnectionRegistry, RegistryConfig};

use crate::auth::{TokenVerifier, verifier_from_config};

/// Per-socket transport limits.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Outbound frames buffered per connection.
    pub outbound_queue_capacity: usize,
    /// Inbound text frames larger than this are dropped.
    pub max_message_bytes: Option<usize>,
}

impl RelaySettings {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            outbound_queue_capacity: config.outbound_queue_capacity.max(1),
            max_message_bytes: (config.max_message_bytes > 0).then_some(config.max_message_bytes),
        }
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self::from_config(&RelayConfig::default())
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub relay: RelaySettings,
    start_time: Instant,
}

impl AppState {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        verifier: Arc<dyn TokenVerifier>,
        relay: RelaySettings,
    ) -> Self {
        Self {
            registry,
            verifier,
            relay,
            start_time: Instant::now(),
        }
    }

    /// Build the registry and verifier described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let registry = Arc::new(ConnectionRegistry::with_config(RegistryConfig::from_timeout_ms(
            config.relay.send_timeout_ms,
        )));
        let verifier = verifier_from_config(&config.auth)?;
        Ok(Self::new(
            registry,
            verifier,
            RelaySettings::from_config(&config.relay),
        ))
    }

    /// Get uptime.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
