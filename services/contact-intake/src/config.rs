// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact intake service.
//!
//! Defaults reproduce the site's published submission policy: at most five
//! submissions per client per minute.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the contact intake service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Route the form posts to (default: /api/contact)
    #[serde(default = "default_contact_path")]
    pub contact_path: String,

    /// Largest submission body read, in bytes (default: 65536)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Downstream notification configuration
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Origins allowed to post cross-origin. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

/// Fixed-window rate limiting per client key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Accepted requests per window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Interval between sweeps of expired entries, in seconds (default: 300)
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

/// Notification dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook receiving accepted submissions. Unset logs them instead.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Delivery attempts per submission (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff step between attempts in milliseconds (default: 500)
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Pending submissions held before new ones are dropped (default: 256)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Webhook request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_contact_path() -> String {
    "/api/contact".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_requests() -> u32 {
    5
}

fn default_purge_interval_secs() -> u64 {
    300
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_queue_capacity() -> usize {
    256
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            contact_path: default_contact_path(),
            max_body_bytes: default_max_body_bytes(),
            rate_limit: RateLimitConfig::default(),
            notify: NotifyConfig::default(),
            metrics: MetricsConfig::default(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            queue_capacity: default_queue_capacity(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Get the purge interval, never shorter than one second
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs.max(1))
    }
}

impl NotifyConfig {
    /// Backoff before retry number `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            contact_path: lookup("CONTACT_PATH").unwrap_or(defaults.contact_path),
            max_body_bytes: parsed(&lookup, "MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            rate_limit: RateLimitConfig {
                window_ms: parsed(&lookup, "RATE_LIMIT_WINDOW_MS").unwrap_or(defaults.rate_limit.window_ms),
                max_requests: parsed(&lookup, "RATE_LIMIT_MAX_REQUESTS")
                    .unwrap_or(defaults.rate_limit.max_requests),
                purge_interval_secs: parsed(&lookup, "RATE_LIMIT_PURGE_SECS")
                    .unwrap_or(defaults.rate_limit.purge_interval_secs),
            },
            notify: NotifyConfig {
                webhook_url: lookup("NOTIFY_WEBHOOK_URL").filter(|v| !v.trim().is_empty()),
                max_attempts: parsed(&lookup, "NOTIFY_MAX_ATTEMPTS").unwrap_or(defaults.notify.max_attempts),
                backoff_ms: parsed(&lookup, "NOTIFY_BACKOFF_MS").unwrap_or(defaults.notify.backoff_ms),
                queue_capacity: parsed(&lookup, "NOTIFY_QUEUE_CAPACITY")
                    .unwrap_or(defaults.notify.queue_capacity),
                timeout_secs: parsed(&lookup, "NOTIFY_TIMEOUT_SECS").unwrap_or(defaults.notify.timeout_secs),
            },
            metrics: MetricsConfig {
                enabled: parsed(&lookup, "METRICS_ENABLED").unwrap_or(defaults.metrics.enabled),
                path: lookup("METRICS_PATH").unwrap_or(defaults.metrics.path),
            },
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}
