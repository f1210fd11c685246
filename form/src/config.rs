// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form controller configuration.

use std::time::Duration;
use tracing::warn;
use url::Url;

/// How the form reaches the intake service.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Submission endpoint. `None` makes every submit fail locally.
    pub endpoint: Option<Url>,

    /// Request timeout (default: 10s)
    pub timeout: Duration,

    /// How long the success banner stays up (default: 3s)
    pub dismiss_after: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: Duration::from_secs(10),
            dismiss_after: Duration::from_millis(3000),
        }
    }
}

impl FormConfig {
    /// Config for a known endpoint with default timings.
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint: Some(endpoint),
            ..Default::default()
        }
    }

    /// Load from `CONTACT_ENDPOINT`, `CONTACT_TIMEOUT_SECS` and
    /// `CONTACT_DISMISS_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint = lookup("CONTACT_ENDPOINT")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!(endpoint = %raw, error = %err, "Ignoring unparsable contact endpoint");
                    None
                }
            });

        let timeout = lookup("CONTACT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let dismiss_after = lookup("CONTACT_DISMISS_MS")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.dismiss_after);

        Self {
            endpoint,
            timeout,
            dismiss_after,
        }
    }
}
