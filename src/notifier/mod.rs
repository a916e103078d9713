//! Alert dispatch
//!
//! The [`Dispatcher`] formats an unhealthy verdict into an [`AlertMessage`]
//! and hands it to a [`Notifier`] exactly once.

mod slack;

pub use slack::*;

use crate::config::{TargetConfig, SLACK_CHANNEL_ENV};
use crate::contracts::*;
use crate::error::{HealthCheckError, Result};

/// Messaging collaborator that delivers alerts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Notifier identifier
    fn name(&self) -> &str;

    /// Post `message` to `channel`
    async fn notify(&self, channel: &str, message: &AlertMessage) -> Result<DeliveryReceipt>;
}

/// Sends one alert per unhealthy verdict
pub struct Dispatcher<N> {
    channel_id: Option<String>,
    notifier: N,
}

impl<N: Notifier> Dispatcher<N> {
    /// Create a dispatcher for `channel_id`
    pub fn new(channel_id: impl Into<String>, notifier: N) -> Self {
        Self {
            channel_id: Some(channel_id.into()),
            notifier,
        }
    }

    /// Create a dispatcher using the configured channel
    ///
    /// A missing channel is only reported when an alert is actually sent.
    pub fn from_config(config: &TargetConfig, notifier: N) -> Self {
        Self {
            channel_id: config.channel_id.clone(),
            notifier,
        }
    }

    /// Deliver an alert for `verdict`; no retry on failure
    pub async fn dispatch(&self, verdict: &HealthVerdict, target_url: &str) -> Result<DeliveryReceipt> {
        if verdict.is_healthy() {
            return Err(HealthCheckError::InvalidInput(
                "refusing to dispatch an alert for a healthy verdict".to_string(),
            ));
        }

        let channel = self.channel_id.as_deref().ok_or_else(|| {
            HealthCheckError::config(format!("alert channel is not set ({})", SLACK_CHANNEL_ENV))
        })?;

        let message = AlertMessage::from_verdict(verdict, target_url);

        tracing::debug!(
            notifier = self.notifier.name(),
            channel = channel,
            fields = message.fields.len(),
            "Dispatching alert"
        );

        let receipt = self.notifier.notify(channel, &message).await?;

        tracing::info!(
            channel_id = %receipt.channel_id,
            timestamp = %receipt.timestamp,
            "Alert delivered"
        );

        Ok(receipt)
    }

    /// The underlying notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
