//! Login guard for throttling failed authentication attempts.
//!
//! Tracks failures per client identifier in a sliding window and blocks once
//! the threshold is reached. The in-memory implementation slows single-source
//! credential stuffing only; it is not a security boundary against a
//! distributed or address-rotating attacker. The trait allows a shared
//! counter store to be swapped in without touching the auth service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The attempt may proceed
    Allowed,
    /// Too many recent failures; retry after the given duration
    Blocked { retry_after: Duration },
}

impl GuardDecision {
    /// Whether the attempt may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }
}

/// Trait for tracking and throttling failed login attempts
#[async_trait]
pub trait LoginGuardTrait: Send + Sync {
    /// Check whether an identifier may attempt to authenticate
    async fn check(&self, identifier: &str) -> GuardDecision;

    /// Record a failed attempt for an identifier
    async fn record_failure(&self, identifier: &str);

    /// Clear all failure state for an identifier after a success
    async fn record_success(&self, identifier: &str);
}

/// Configuration for the in-memory login guard
#[derive(Debug, Clone)]
pub struct LoginGuardConfig {
    /// Failures within the window before attempts are blocked
    pub max_failures: u32,
    /// Sliding window length in seconds
    pub window_seconds: i64,
}

impl Default for LoginGuardConfig {
    fn default() -> Self {
        Self {
            max_failures: 10,
            window_seconds: 3600,
        }
    }
}

impl LoginGuardConfig {
    fn window(&self) -> Duration {
        Duration::seconds(self.window_seconds)
    }
}

/// Per-identifier failure state
#[derive(Debug, Clone, Copy)]
struct FailureRecord {
    count: u32,
    last_failure: DateTime<Utc>,
}

/// Process-local login guard keyed by client identifier
///
/// Counters whose window has lapsed are discarded on next access, which
/// bounds memory for identifiers that keep coming back. Counters for
/// identifiers never seen again persist until process restart; a periodic
/// sweep would tighten that bound but is not needed for correctness.
pub struct InMemoryLoginGuard {
    entries: Mutex<HashMap<String, FailureRecord>>,
    config: LoginGuardConfig,
    clock: Arc<dyn Clock>,
}

impl InMemoryLoginGuard {
    /// Creates a new guard
    pub fn new(config: LoginGuardConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    fn lapsed(&self, record: &FailureRecord, now: DateTime<Utc>) -> bool {
        now - record.last_failure > self.config.window()
    }
}

#[async_trait]
impl LoginGuardTrait for InMemoryLoginGuard {
    async fn check(&self, identifier: &str) -> GuardDecision {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let Some(record) = entries.get(identifier).copied() else {
            return GuardDecision::Allowed;
        };

        if self.lapsed(&record, now) {
            // Lazy eviction of a lapsed counter
            entries.remove(identifier);
            return GuardDecision::Allowed;
        }

        if record.count >= self.config.max_failures {
            let retry_after = self.config.window() - (now - record.last_failure);
            return GuardDecision::Blocked { retry_after };
        }

        GuardDecision::Allowed
    }

    async fn record_failure(&self, identifier: &str) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let record = entries
            .entry(identifier.to_string())
            .and_modify(|record| {
                if now - record.last_failure > self.config.window() {
                    record.count = 0;
                }
                record.count += 1;
                record.last_failure = now;
            })
            .or_insert(FailureRecord {
                count: 1,
                last_failure: now,
            });

        if record.count >= self.config.max_failures {
            tracing::warn!(
                identifier,
                failures = record.count,
                "login attempts blocked for identifier"
            );
        }
    }

    async fn record_success(&self, identifier: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(identifier);
    }
}
