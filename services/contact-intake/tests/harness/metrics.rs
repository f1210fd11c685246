// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallies for flood simulation results.

use axum::http::StatusCode;
use std::collections::HashMap;

/// Collects response statuses during a flood.
#[derive(Debug, Default)]
pub struct FloodMetrics {
    /// Count of responses by status
    statuses: HashMap<StatusCode, usize>,
    /// Count of requests by client key
    requests_per_client: HashMap<String, usize>,
}

impl FloodMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response.
    pub fn record(&mut self, status: StatusCode, client: &str) {
        *self.statuses.entry(status).or_insert(0) += 1;
        *self.requests_per_client.entry(client.to_string()).or_insert(0) += 1;
    }

    /// Get total request count.
    pub fn total_requests(&self) -> usize {
        self.statuses.values().sum()
    }

    /// Get count for a specific status.
    pub fn count(&self, status: StatusCode) -> usize {
        self.statuses.get(&status).copied().unwrap_or(0)
    }

    pub fn accepted(&self) -> usize {
        self.count(StatusCode::OK)
    }

    pub fn rate_limited(&self) -> usize {
        self.count(StatusCode::TOO_MANY_REQUESTS)
    }

    pub fn rejected(&self) -> usize {
        self.count(StatusCode::BAD_REQUEST)
    }

    /// Statuses outside the route's contract.
    pub fn unexpected(&self) -> usize {
        self.total_requests() - self.accepted() - self.rate_limited() - self.rejected()
            - self.count(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get number of unique clients that made requests.
    pub fn unique_clients(&self) -> usize {
        self.requests_per_client.len()
    }
}

impl std::fmt::Display for FloodMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Flood Report ===")?;
        writeln!(f, "Total Requests:    {}", self.total_requests())?;
        writeln!(f, "Accepted:          {}", self.accepted())?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited())?;
        writeln!(f, "Rejected:          {}", self.rejected())?;
        writeln!(f, "Unique Clients:    {}", self.unique_clients())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = FloodMetrics::new();
        metrics.record(StatusCode::OK, "10.0.0.1");
        metrics.record(StatusCode::OK, "10.0.0.2");
        metrics.record(StatusCode::TOO_MANY_REQUESTS, "10.0.0.1");

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.accepted(), 2);
        assert_eq!(metrics.rate_limited(), 1);
        assert_eq!(metrics.unique_clients(), 2);
        assert_eq!(metrics.unexpected(), 0);
    }
}
