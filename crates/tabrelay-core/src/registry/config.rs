//! Registry tuning knobs.

use std::time::Duration;

/// Configuration for a [`ConnectionRegistry`](super::ConnectionRegistry).
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// Upper bound for a single outbound send. `None` waits as long as the
    /// transport does. A send that exceeds it counts as a failed send.
    pub send_timeout: Option<Duration>,
}

impl RegistryConfig {
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Build from a millisecond value where `0` disables the timeout.
    pub fn from_timeout_ms(ms: u64) -> Self {
        Self {
            send_timeout: (ms > 0).then(|| Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        assert!(RegistryConfig::default().send_timeout.is_none());
    }

    #[test]
    fn test_from_timeout_ms() {
        assert!(RegistryConfig::from_timeout_ms(0).send_timeout.is_none());
        assert_eq!(
            RegistryConfig::from_timeout_ms(1500).send_timeout,
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_with_send_timeout() {
        let config = RegistryConfig::default().with_send_timeout(Duration::from_secs(2));
        assert_eq!(config.send_timeout, Some(Duration::from_secs(2)));
    }
}
