//! Slack Web API notifier
//!
//! Posts an alert as a single `chat.postMessage` call carrying one
//! attachment.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::Notifier;
use crate::config::{TargetConfig, SLACK_TOKEN_ENV};
use crate::contracts::*;
use crate::error::{HealthCheckError, Result};

/// Slack request timeout
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Notifier backed by the Slack Web API
pub struct SlackNotifier {
    client: Client,
    api_url: String,
    token: Option<SecretString>,
}

impl SlackNotifier {
    /// Create a notifier; a missing token fails on the first `notify`
    pub fn new(api_url: impl Into<String>, token: Option<SecretString>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| HealthCheckError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        let api_url: String = api_url.into();

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create a notifier from the run configuration
    pub fn from_config(config: &TargetConfig) -> Result<Self> {
        let token = config
            .credential
            .as_ref()
            .map(|t| SecretString::new(t.expose_secret().clone()));
        Self::new(config.slack_api_url.clone(), token)
    }
}

#[async_trait::async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &str {
        "slack"
    }

    async fn notify(&self, channel: &str, message: &AlertMessage) -> Result<DeliveryReceipt> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| HealthCheckError::config(format!("Slack token is not set ({})", SLACK_TOKEN_ENV)))?;

        let url = format!("{}/chat.postMessage", self.api_url);
        let request = PostMessageRequest::new(channel, message);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| HealthCheckError::delivery(format!("Slack request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HealthCheckError::delivery(format!(
                "Slack returned {}: {}",
                status, body
            )));
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| HealthCheckError::delivery(format!("Failed to parse Slack response: {}", e)))?;

        body.into_receipt(channel)
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    attachments: [Attachment<'a>; 1],
}

impl<'a> PostMessageRequest<'a> {
    fn new(channel: &'a str, message: &'a AlertMessage) -> Self {
        Self {
            channel,
            attachments: [Attachment {
                pretext: &message.headline,
                fields: &message.fields,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Attachment<'a> {
    pretext: &'a str,
    fields: &'a [AlertField],
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl PostMessageResponse {
    fn into_receipt(self, requested_channel: &str) -> Result<DeliveryReceipt> {
        if !self.ok {
            return Err(HealthCheckError::delivery(
                self.error.unwrap_or_else(|| "unknown Slack error".to_string()),
            ));
        }

        Ok(DeliveryReceipt::new(
            self.channel.unwrap_or_else(|| requested_channel.to_string()),
            self.ts.unwrap_or_default(),
        ))
    }
}
