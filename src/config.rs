//! Run configuration
//!
//! Built once at process start (the binary fills it from flags and
//! environment variables) and handed by reference to the prober and the
//! dispatcher.

use std::time::Duration;

use reqwest::Url;
use secrecy::SecretString;

use crate::error::{HealthCheckError, Result};

/// Default Slack Web API base URL
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Environment variable holding the health endpoint
pub const TARGET_URL_ENV: &str = "TARGET_URL";

/// Environment variable holding the Slack bot token
pub const SLACK_TOKEN_ENV: &str = "SLACK_TOKEN";

/// Environment variable holding the alert channel
pub const SLACK_CHANNEL_ENV: &str = "SERVER_HEALTH_CHECKER_SLACK_CHANNEL";

/// Target and delivery settings for one run
#[derive(Debug)]
pub struct TargetConfig {
    /// Health endpoint to probe
    pub url: String,

    /// Channel alerts are posted to (needed only when dispatching)
    pub channel_id: Option<String>,

    /// Messaging credential (needed only when dispatching)
    pub credential: Option<SecretString>,

    /// Probe timeout; `None` keeps the transport default
    pub probe_timeout: Option<Duration>,

    /// Base URL of the Slack Web API
    pub slack_api_url: String,
}

impl TargetConfig {
    /// Create a config for `url` with no delivery settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel_id: None,
            credential: None,
            probe_timeout: None,
            slack_api_url: DEFAULT_SLACK_API_URL.to_string(),
        }
    }

    /// Set the alert channel
    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        let channel_id: String = channel_id.into();
        self.channel_id = (!channel_id.is_empty()).then_some(channel_id);
        self
    }

    /// Set the messaging credential
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        let credential: String = credential.into();
        self.credential = (!credential.is_empty()).then(|| SecretString::new(credential));
        self
    }

    /// Set the probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    /// Point the Slack client somewhere else
    pub fn with_slack_api_url(mut self, url: impl Into<String>) -> Self {
        self.slack_api_url = url.into();
        self
    }

    /// Reject configuration that cannot work before any network call
    pub fn validate(&self) -> Result<()> {
        parse_target_url(&self.url)?;

        let api = Url::parse(&self.slack_api_url).map_err(|e| {
            HealthCheckError::config(format!(
                "invalid Slack API URL '{}': {}",
                self.slack_api_url, e
            ))
        })?;
        if !matches!(api.scheme(), "http" | "https") {
            return Err(HealthCheckError::config(format!(
                "Slack API URL must be http or https, got '{}'",
                api.scheme()
            )));
        }

        if self.probe_timeout == Some(Duration::ZERO) {
            return Err(HealthCheckError::config("probe timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Parse and check a target URL
pub fn parse_target_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(HealthCheckError::config(format!("{} is empty", TARGET_URL_ENV)));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| HealthCheckError::config(format!("invalid target URL '{}': {}", trimmed, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(HealthCheckError::config(format!(
            "target URL must be http or https, got '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(HealthCheckError::config(format!(
            "target URL '{}' has no host",
            trimmed
        )));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let config = TargetConfig::new("http://ok.test/health");
        assert_eq!(config.slack_api_url, DEFAULT_SLACK_API_URL);
        assert!(config.channel_id.is_none());
        assert!(config.credential.is_none());
        assert!(config.probe_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = TargetConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, HealthCheckError::Config(_)));
    }

    #[test]
    fn test_malformed_url_rejected() {
        assert!(parse_target_url("not a url").is_err());
        assert!(parse_target_url("ftp://example.com/health").is_err());
        assert!(parse_target_url("http://").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TargetConfig::new("http://ok.test").with_probe_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_delivery_settings_are_unset() {
        let config = TargetConfig::new("http://ok.test")
            .with_channel("")
            .with_credential("");
        assert!(config.channel_id.is_none());
        assert!(config.credential.is_none());
    }

    #[test]
    fn test_credential_is_redacted_in_debug() {
        let config = TargetConfig::new("http://ok.test").with_credential("xoxb-secret");
        assert_eq!(config.credential.as_ref().unwrap().expose_secret(), "xoxb-secret");
        assert!(!format!("{:?}", config).contains("xoxb-secret"));
    }
}
