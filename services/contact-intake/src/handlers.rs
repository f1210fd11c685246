// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact intake service.
//!
//! A submission moves through: client key → rate limit → body parsing →
//! field validation → notification enqueue → response. Any step can end
//! the request early with 429, 400 or 500.

use crate::config::Config;
use crate::error::IntakeError;
use crate::limiter::{RateLimitDecision, RateLimitStore};
use crate::metrics::{IntakeMetrics, NotificationOutcome, SubmissionOutcome};
use crate::notifier::{NotificationDispatcher, SubmissionRecord};
use crate::validator::validate_submission;
use axum::{
    body::{to_bytes, Body},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use contact_common::{messages, SubmissionAck, SubmissionPayload};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Client key used when no proxy header identifies the caller.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Shared application state.
pub struct AppState {
    pub store: Arc<dyn RateLimitStore>,
    pub notifications: NotificationDispatcher,
    pub metrics: Option<IntakeMetrics>,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route(
            &state.config.contact_path,
            post(submit).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(health))
        .route("/healthz", get(health));

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(allow_origin)
}

/// Derive the rate limit key from proxy headers.
///
/// Uses the first `x-forwarded-for` hop, then `x-real-ip`, then
/// [`UNKNOWN_CLIENT`]. The headers are caller-controlled, so the key is
/// only a bucketing hint.
pub fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-intake",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    let Some(metrics) = &state.metrics else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Contact form submission endpoint.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let key = client_key(&headers);
    debug!(client_key = %key, "Processing contact submission");

    match accept(&state, &key, body).await {
        Ok(ack) => {
            record(&state, SubmissionOutcome::Accepted);
            info!(client_key = %key, "Contact submission accepted");
            (StatusCode::OK, Json(ack)).into_response()
        }
        Err(err) => {
            let outcome = match &err {
                IntakeError::RateLimited { retry_after } => {
                    info!(client_key = %key, retry_after_secs = retry_after.as_secs(), "Contact submission rate limited");
                    SubmissionOutcome::RateLimited
                }
                IntakeError::Invalid(field) => {
                    info!(client_key = %key, field = %field.field(), "Contact submission rejected");
                    SubmissionOutcome::Invalid
                }
                IntakeError::Shape(cause) => {
                    info!(client_key = %key, error = %cause, "Contact submission has unexpected shape");
                    SubmissionOutcome::Invalid
                }
                IntakeError::MalformedBody(cause) => {
                    error!(client_key = %key, error = %cause, "Contact submission body is not JSON");
                    SubmissionOutcome::Malformed
                }
                IntakeError::Internal(cause) => {
                    error!(client_key = %key, error = %cause, "Contact submission failed");
                    SubmissionOutcome::Error
                }
            };
            record(&state, outcome);
            err.into_response()
        }
    }
}

async fn accept(state: &AppState, key: &str, body: Body) -> Result<SubmissionAck, IntakeError> {
    if let RateLimitDecision::Limited { retry_after } = state.store.check_and_consume(key).await {
        return Err(IntakeError::RateLimited { retry_after });
    }

    // Read only after the slot is consumed so oversized posts still count.
    let body = to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|err| IntakeError::Internal(format!("reading submission body: {err}")))?;

    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(IntakeError::MalformedBody)?;
    let payload: SubmissionPayload = serde_json::from_value(value).map_err(IntakeError::Shape)?;
    let submission = validate_submission(payload)?;

    let record = SubmissionRecord::new(submission, key);
    if let Err(err) = state.notifications.dispatch(record.clone()) {
        // The user still gets their acknowledgement; the record is kept in
        // the log for manual follow-up.
        warn!(
            error = %err,
            record = ?record,
            "Accepted submission could not be queued for notification"
        );
        if let Some(metrics) = &state.metrics {
            metrics.record_notification(NotificationOutcome::Dropped);
        }
    }

    Ok(SubmissionAck {
        success: true,
        message: messages::SUBMISSION_ACCEPTED.to_string(),
    })
}

fn record(state: &AppState, outcome: SubmissionOutcome) {
    if let Some(metrics) = &state.metrics {
        metrics.record_submission(outcome);
    }
}
