//! Fan-out outcomes and registry snapshots.

use serde::{Deserialize, Serialize};

/// Outcome of one relay or broadcast.
///
/// Informational only: failed sends are never surfaced as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Recipients in the snapshot.
    pub attempted: usize,
    /// Recipients whose send succeeded.
    pub delivered: usize,
    /// Recipients whose send failed or timed out.
    pub failed: usize,
}

impl DeliveryReport {
    pub fn is_empty(&self) -> bool {
        self.attempted == 0
    }

    pub fn all_delivered(&self) -> bool {
        self.failed == 0
    }
}

/// Point-in-time view of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Users with at least one live connection.
    pub users: usize,
    /// Live connections across all users.
    pub connections: usize,
    /// Largest number of connections held by a single user.
    pub max_connections_per_user: usize,
    /// Connections registered since startup.
    pub total_connects: u64,
    /// Connections removed since startup.
    pub total_disconnects: u64,
    /// Frames handed to recipients successfully since startup.
    pub frames_delivered: u64,
    /// Recipient sends that failed since startup.
    pub send_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = DeliveryReport::default();
        assert!(report.is_empty());
        assert!(report.all_delivered());
    }

    #[test]
    fn test_report_with_failures() {
        let report = DeliveryReport {
            attempted: 3,
            delivered: 2,
            failed: 1,
        };
        assert!(!report.is_empty());
        assert!(!report.all_delivered());
    }

    #[test]
    fn test_stats_serialization() {
        let stats = RegistryStats {
            users: 2,
            connections: 5,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"users\":2"));
        assert!(json.contains("\"connections\":5"));
    }
}
