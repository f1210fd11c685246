// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiting for contact submissions.
//!
//! Each client key gets a window that opens on its first request. Within
//! the window up to `max_requests` submissions are admitted; once the window
//! has elapsed the next request opens a fresh one with a count of 1.
//!
//! The handler talks to a [`RateLimitStore`] so the in-process map can be
//! swapped for a shared cache when the service runs on several instances.

use crate::config::RateLimitConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is allowed
    Allowed {
        /// Requests still available in the current window
        remaining: u32,
        /// Time until the window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Admission store keyed by client identifier.
///
/// `check_and_consume` must decide and record in one step: two concurrent
/// calls for the same key never both see the last free slot.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Check the key's window and consume one slot if it is open.
    async fn check_and_consume(&self, key: &str) -> RateLimitDecision;
}

/// One client's window.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

impl WindowEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.reset_at
    }
}

/// In-process fixed-window store.
pub struct FixedWindowStore {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl FixedWindowStore {
    /// Create a new store with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current count for a key, if it has a live window.
    pub async fn count(&self, key: &str) -> Option<u32> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.count)
    }

    /// Number of tracked keys, live or expired.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Drop entries whose window has elapsed. Returns how many were removed.
    ///
    /// Expired entries would be replaced on their next use anyway, so this
    /// only bounds memory; admission decisions are unaffected.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Purged expired rate limit windows");
        }
        removed
    }
}

#[async_trait]
impl RateLimitStore for FixedWindowStore {
    async fn check_and_consume(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let window = self.config.window_duration();
        let max = self.config.max_requests;
        if max == 0 {
            return RateLimitDecision::Limited { retry_after: window };
        }

        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(key).filter(|e| !e.is_expired(now)) {
            if entry.count < max {
                entry.count += 1;
                return RateLimitDecision::Allowed {
                    remaining: max - entry.count,
                    reset_in: entry.reset_at.saturating_duration_since(now),
                };
            }
            let retry_after = entry.reset_at.saturating_duration_since(now);
            debug!(key, count = entry.count, ?retry_after, "Client over submission limit");
            return RateLimitDecision::Limited { retry_after };
        }

        entries.insert(
            key.to_string(),
            WindowEntry {
                count: 1,
                reset_at: now + window,
            },
        );
        RateLimitDecision::Allowed {
            remaining: max.saturating_sub(1),
            reset_in: window,
        }
    }
}
