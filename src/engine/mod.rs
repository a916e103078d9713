//! Health probe engine
//!
//! One GET against the target, folded into a [`HealthVerdict`]. Transport
//! and decode failures become unhealthy verdicts; only a bad target URL is
//! returned as an error.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};

use crate::config::parse_target_url;
use crate::contracts::*;
use crate::error::{HealthCheckError, Result};

/// User agent sent with every probe
pub const PROBE_USER_AGENT: &str = concat!("health-notifier/", env!("CARGO_PKG_VERSION"));

/// Probes a single health endpoint
pub struct HealthProber {
    client: Client,
}

impl HealthProber {
    /// Create a prober; `timeout` of `None` keeps the transport default
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(PROBE_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| HealthCheckError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Probe `url` once, without retry
    pub async fn probe(&self, url: &str) -> Result<HealthVerdict> {
        let url = parse_target_url(url)?;
        let start = Instant::now();

        tracing::debug!(url = %url, "Probing health endpoint");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = HealthCheckError::Transport(e.to_string());
                tracing::debug!(url = %url, error = %err, "Health probe failed to connect");
                return Ok(HealthVerdict::unreachable(err.to_string()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            // The body of a non-200 response is not inspected.
            tracing::debug!(url = %url, status = status.as_u16(), "Health probe non-200");
            return Ok(HealthVerdict::bad_status(status.as_u16()));
        }

        let verdict = match response.bytes().await {
            Ok(body) => evaluate_response(status.as_u16(), &body),
            Err(e) => HealthVerdict::unreachable(HealthCheckError::Transport(e.to_string()).to_string()),
        };

        tracing::debug!(
            url = %url,
            latency_ms = start.elapsed().as_millis() as u64,
            healthy = verdict.is_healthy(),
            "Health probe completed"
        );

        Ok(verdict)
    }
}

/// Turn a received status code and body into a verdict
///
/// Non-200 codes report `DOWN` regardless of the body. A 200 body must
/// decode to [`HealthPayload`]; otherwise the verdict carries the decode
/// error and an empty status.
pub fn evaluate_response(status_code: u16, body: &[u8]) -> HealthVerdict {
    if status_code != StatusCode::OK.as_u16() {
        return HealthVerdict::bad_status(status_code);
    }

    match decode_payload(body) {
        Ok(payload) => HealthVerdict::responded(status_code, payload.status),
        Err(e) => HealthVerdict::undecodable(status_code, e.to_string()),
    }
}

/// Decode the upstream JSON body
pub fn decode_payload(body: &[u8]) -> Result<HealthPayload> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_is_healthy() {
        let verdict = evaluate_response(200, br#"{"status":"UP"}"#);
        assert!(verdict.is_healthy());
        assert_eq!(verdict.reported_status, "UP");
        assert!(verdict.detail.is_none());
    }

    #[test]
    fn test_down_is_unhealthy() {
        let verdict = evaluate_response(200, br#"{"status":"DOWN"}"#);
        assert!(!verdict.is_healthy());
        assert_eq!(verdict.http_status_code, 200);
        assert_eq!(verdict.reported_status, "DOWN");
    }

    #[test]
    fn test_non_200_ignores_body() {
        let verdict = evaluate_response(503, br#"{"status":"UP"}"#);
        assert!(!verdict.is_healthy());
        assert_eq!(verdict.http_status_code, 503);
        assert_eq!(verdict.reported_status, STATUS_DOWN);
    }

    #[test]
    fn test_undecodable_body_is_unhealthy() {
        let verdict = evaluate_response(200, b"<html>ok</html>");
        assert!(verdict.transport_succeeded);
        assert!(!verdict.is_healthy());
        assert!(verdict.reported_status.is_empty());
        assert!(verdict.detail.unwrap().starts_with("Decode error"));
    }

    #[test]
    fn test_missing_status_field_is_unhealthy() {
        let verdict = evaluate_response(200, br#"{"state":"UP"}"#);
        assert!(!verdict.is_healthy());
        assert!(verdict.detail.is_some());
    }

    #[tokio::test]
    async fn test_probe_rejects_bad_url() {
        let prober = HealthProber::new(None).unwrap();
        let err = prober.probe("").await.unwrap_err();
        assert!(matches!(err, HealthCheckError::Config(_)));
    }

    #[tokio::test]
    async fn test_probe_closed_port_is_unreachable() {
        let prober = HealthProber::new(Some(Duration::from_millis(500))).unwrap();
        let verdict = prober.probe("http://127.0.0.1:1/health").await.unwrap();

        assert!(!verdict.transport_succeeded);
        assert_eq!(verdict.http_status_code, 0);
        assert!(verdict.detail.unwrap().starts_with("Transport error"));
    }
}
