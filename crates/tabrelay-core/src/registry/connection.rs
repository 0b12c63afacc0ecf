//! Per-user connection registry.
//!
//! Tracks which live connections belong to which user and fans text frames
//! out to a user's other connections ("multi-tab sync").
//!
//! The membership map is the only shared mutable state. It sits behind a
//! synchronous lock that is held only while the map is read or mutated;
//! fan-out copies the recipient list under the lock and sends after the
//! guard is dropped, so no lock is ever held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use tabrelay_protocols::error::ChannelError;
use tabrelay_protocols::{Connection, ConnectionId, UserId};

use super::config::RegistryConfig;
use super::report::{DeliveryReport, RegistryStats};

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;

#[derive(Default)]
struct Membership {
    /// user -> live connections, no duplicates, never empty.
    by_user: HashMap<UserId, Vec<Arc<dyn Connection>>>,
    /// connection -> owning user.
    owners: HashMap<ConnectionId, UserId>,
}

enum ConnectOutcome {
    Added(usize),
    AlreadyRegistered,
    OwnedByOther(UserId),
}

#[derive(Default)]
struct Counters {
    connects: AtomicU64,
    disconnects: AtomicU64,
    delivered: AtomicU64,
    failures: AtomicU64,
}

/// Registry of live connections grouped by user.
///
/// Construct one per service and share it through `Arc`. All methods take
/// `&self` and are safe to call concurrently, including for the same user.
pub struct ConnectionRegistry {
    config: RegistryConfig,
    membership: RwLock<Membership>,
    counters: Counters,
}

impl ConnectionRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            membership: RwLock::new(Membership::default()),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register `connection` under `user`.
    ///
    /// Registering a connection twice under the same user is a no-op. A
    /// connection already owned by a different user is left untouched: its
    /// user is fixed for its lifetime.
    pub fn connect(&self, connection: Arc<dyn Connection>, user: &UserId) {
        let id = connection.id().clone();

        let outcome = {
            let mut guard = self.membership.write();
            let membership = &mut *guard;
            match membership.owners.get(&id) {
                Some(owner) if owner == user => ConnectOutcome::AlreadyRegistered,
                Some(owner) => ConnectOutcome::OwnedByOther(owner.clone()),
                None => {
                    membership.owners.insert(id.clone(), user.clone());
                    let connections = membership.by_user.entry(user.clone()).or_default();
                    connections.push(connection);
                    ConnectOutcome::Added(connections.len())
                }
            }
        };

        match outcome {
            ConnectOutcome::Added(count) => {
                self.counters.connects.fetch_add(1, Ordering::Relaxed);
                info!(user = %user, connection = %id, count, "Connection registered");
            }
            ConnectOutcome::AlreadyRegistered => {
                debug!(user = %user, connection = %id, "Connection already registered");
            }
            ConnectOutcome::OwnedByOther(owner) => {
                warn!(
                    user = %user,
                    owner = %owner,
                    connection = %id,
                    "Connection already registered under another user, ignoring"
                );
            }
        }
    }

    /// Remove `connection` from `user`'s group.
    ///
    /// Absent pairs are ignored. The user's entry disappears with its last
    /// connection.
    pub fn disconnect(&self, connection: &ConnectionId, user: &UserId) {
        let remaining = {
            let mut guard = self.membership.write();
            let membership = &mut *guard;
            if membership.owners.get(connection) != Some(user) {
                None
            } else {
                membership.owners.remove(connection);
                let remaining = match membership.by_user.get_mut(user) {
                    Some(connections) => {
                        connections.retain(|c| c.id() != connection);
                        connections.len()
                    }
                    None => 0,
                };
                if remaining == 0 {
                    membership.by_user.remove(user);
                }
                Some(remaining)
            }
        };

        match remaining {
            Some(remaining) => {
                self.counters.disconnects.fetch_add(1, Ordering::Relaxed);
                info!(user = %user, connection = %connection, remaining, "Connection removed");
            }
            None => {
                debug!(
                    user = %user,
                    connection = %connection,
                    "Disconnect for unregistered connection"
                );
            }
        }
    }

    /// Send `message` to every connection of `user` except `source`.
    ///
    /// Unknown users are a silent no-op. A failing recipient is logged and
    /// skipped; it stays registered until its transport calls
    /// [`disconnect`](Self::disconnect).
    pub async fn relay(
        &self,
        source: &ConnectionId,
        message: &str,
        user: &UserId,
    ) -> DeliveryReport {
        let recipients = self.snapshot(user, Some(source));
        self.deliver(recipients, message, user).await
    }

    /// Send `message` to every connection of `user`.
    pub async fn broadcast(&self, message: &str, user: &UserId) -> DeliveryReport {
        let recipients = self.snapshot(user, None);
        self.deliver(recipients, message, user).await
    }

    /// Number of users with at least one live connection.
    pub fn user_count(&self) -> usize {
        self.membership.read().by_user.len()
    }

    /// Number of live connections across all users.
    pub fn connection_count(&self) -> usize {
        self.membership.read().owners.len()
    }

    /// Number of live connections held by `user`.
    pub fn connections_for(&self, user: &UserId) -> usize {
        self.membership
            .read()
            .by_user
            .get(user)
            .map_or(0, Vec::len)
    }

    pub fn is_registered(&self, connection: &ConnectionId) -> bool {
        self.membership.read().owners.contains_key(connection)
    }

    /// User that owns `connection`, if it is registered.
    pub fn user_of(&self, connection: &ConnectionId) -> Option<UserId> {
        self.membership.read().owners.get(connection).cloned()
    }

    pub fn stats(&self) -> RegistryStats {
        let (users, connections, max_connections_per_user) = {
            let membership = self.membership.read();
            (
                membership.by_user.len(),
                membership.owners.len(),
                membership.by_user.values().map(Vec::len).max().unwrap_or(0),
            )
        };

        RegistryStats {
            users,
            connections,
            max_connections_per_user,
            total_connects: self.counters.connects.load(Ordering::Relaxed),
            total_disconnects: self.counters.disconnects.load(Ordering::Relaxed),
            frames_delivered: self.counters.delivered.load(Ordering::Relaxed),
            send_failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Copy the recipient list under the read lock.
    fn snapshot(&self, user: &UserId, exclude: Option<&ConnectionId>) -> Vec<Arc<dyn Connection>> {
        let membership = self.membership.read();
        match membership.by_user.get(user) {
            Some(connections) => connections
                .iter()
                .filter(|c| Some(c.id()) != exclude)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    async fn deliver(
        &self,
        recipients: Vec<Arc<dyn Connection>>,
        message: &str,
        user: &UserId,
    ) -> DeliveryReport {
        let mut report = DeliveryReport {
            attempted: recipients.len(),
            ..Default::default()
        };

        for recipient in recipients {
            match self.send_one(recipient.as_ref(), message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        user = %user,
                        connection = %recipient.id(),
                        error = %e,
                        "Relay to connection failed"
                    );
                }
            }
        }

        self.counters
            .delivered
            .fetch_add(report.delivered as u64, Ordering::Relaxed);
        self.counters
            .failures
            .fetch_add(report.failed as u64, Ordering::Relaxed);

        report
    }

    async fn send_one(
        &self,
        recipient: &dyn Connection,
        message: &str,
    ) -> Result<(), ChannelError> {
        match self.config.send_timeout {
            Some(limit) => tokio::time::timeout(limit, recipient.send_text(message))
                .await
                .map_err(|_| ChannelError::Timeout {
                    after_ms: limit.as_millis() as u64,
                })?,
            None => recipient.send_text(message).await,
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
