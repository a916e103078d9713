//! Health Notifier
//!
//! Probes a single JSON health endpoint and posts a Slack alert when the
//! endpoint is unreachable, answers with a non-200 status, or reports a
//! status other than `"UP"`.
//!
//! # Flow
//!
//! ```text
//! HealthProber::probe ──► HealthVerdict ──healthy──► done
//!                                   └──unhealthy──► Dispatcher::dispatch ──► Notifier
//! ```
//!
//! Every unhealthy outcome is dispatched, including transport failures and
//! undecodable bodies. Only configuration problems and failed deliveries
//! are fatal.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod notifier;
pub mod telemetry;

#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use config::TargetConfig;
pub use contracts::*;
pub use engine::{evaluate_response, HealthProber};
pub use error::{HealthCheckError, Result};
pub use notifier::{Dispatcher, Notifier, SlackNotifier};

/// Result of one probe-and-alert run
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// What the probe found
    pub verdict: HealthVerdict,

    /// Set when an alert was delivered
    pub receipt: Option<DeliveryReceipt>,
}

impl CheckOutcome {
    /// Whether an alert went out
    pub fn alerted(&self) -> bool {
        self.receipt.is_some()
    }
}

/// Probe the configured target once and alert if it is unhealthy
pub async fn check_and_alert<N: Notifier>(
    config: &TargetConfig,
    prober: &HealthProber,
    dispatcher: &Dispatcher<N>,
) -> Result<CheckOutcome> {
    let verdict = prober.probe(&config.url).await?;

    if verdict.is_healthy() {
        tracing::info!(
            url = %config.url,
            status_code = verdict.http_status_code,
            "Target is healthy"
        );
        return Ok(CheckOutcome {
            verdict,
            receipt: None,
        });
    }

    tracing::warn!(
        url = %config.url,
        transport_succeeded = verdict.transport_succeeded,
        status_code = verdict.http_status_code,
        reported_status = %verdict.reported_status,
        detail = verdict.detail.as_deref().unwrap_or(""),
        "Target is unhealthy"
    );

    let receipt = dispatcher.dispatch(&verdict, &config.url).await?;

    Ok(CheckOutcome {
        verdict,
        receipt: Some(receipt),
    })
}
