// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Flood patterns replayed against the submission route.

/// Flood pattern configuration.
#[derive(Debug, Clone)]
pub struct FloodConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of distinct client keys
    pub unique_clients: usize,
    /// Share of submissions that fail a field rule (0.0-1.0)
    pub invalid_ratio: f64,
    /// Send requests without any proxy header
    pub anonymous: bool,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_clients: 1,
            invalid_ratio: 0.0,
            anonymous: false,
        }
    }
}

/// Predefined flood patterns.
impl FloodConfig {
    /// One client hammering the form.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 200,
            unique_clients: 1,
            ..Default::default()
        }
    }

    /// Many clients, a few submissions each.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 300,
            unique_clients: 100,
            ..Default::default()
        }
    }

    /// Garbage submissions from one client.
    pub fn junk_flood() -> Self {
        Self {
            total_requests: 50,
            unique_clients: 1,
            invalid_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Clients that strip proxy headers share the fallback bucket.
    pub fn anonymous_flood() -> Self {
        Self {
            total_requests: 40,
            unique_clients: 1,
            anonymous: true,
            ..Default::default()
        }
    }

    /// Deterministic choice of whether request `i` is invalid.
    pub fn is_invalid(&self, i: usize) -> bool {
        if self.invalid_ratio >= 1.0 {
            true
        } else if self.invalid_ratio <= 0.0 {
            false
        } else {
            (i as f64 * 0.618033988749895) % 1.0 < self.invalid_ratio
        }
    }

    /// Most submissions a limiter allowing `per_window` can admit.
    pub fn max_admitted(&self, per_window: usize) -> usize {
        let clients = if self.anonymous { 1 } else { self.unique_clients };
        (clients * per_window).min(self.total_requests)
    }
}
