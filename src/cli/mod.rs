//! Command-line entry point
//!
//! Every option is a flag that falls back to an environment variable.
//! [`run`] is the only place where errors are turned into exit codes.

use std::time::Duration;

use clap::Parser;

use crate::config::{TargetConfig, DEFAULT_SLACK_API_URL, TARGET_URL_ENV};
use crate::engine::HealthProber;
use crate::error::{HealthCheckError, Result};
use crate::notifier::{Dispatcher, SlackNotifier};
use crate::telemetry::LogFormat;
use crate::{check_and_alert, CheckOutcome};

/// Probe a health endpoint once and alert Slack if it is not UP
#[derive(Parser, Debug)]
#[command(name = "health-notifier")]
#[command(about = "Probe a JSON health endpoint and post a Slack alert when it is not UP")]
#[command(version)]
pub struct HealthNotifierCli {
    /// Health endpoint to probe
    #[arg(long, env = "TARGET_URL")]
    pub target_url: Option<String>,

    /// Slack bot token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub slack_token: Option<String>,

    /// Slack channel alerts are posted to
    #[arg(long, env = "SERVER_HEALTH_CHECKER_SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Probe timeout in milliseconds (transport default when unset)
    #[arg(long, env = "PROBE_TIMEOUT_MS")]
    pub probe_timeout_ms: Option<u64>,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_SLACK_API_URL)]
    pub slack_api_url: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl HealthNotifierCli {
    /// Build the run configuration
    pub fn to_config(&self) -> Result<TargetConfig> {
        let url = self
            .target_url
            .clone()
            .ok_or_else(|| HealthCheckError::config(format!("{} is not set", TARGET_URL_ENV)))?;

        let mut config = TargetConfig::new(url).with_slack_api_url(self.slack_api_url.clone());
        if let Some(ref channel) = self.slack_channel {
            config = config.with_channel(channel.clone());
        }
        if let Some(ref token) = self.slack_token {
            config = config.with_credential(token.clone());
        }
        if let Some(ms) = self.probe_timeout_ms {
            config = config.with_probe_timeout(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Target healthy, or alert delivered
    Success = 0,
    /// Alert could not be delivered
    DeliveryFailed = 1,
    /// Missing or invalid configuration
    ConfigError = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Map a fatal error to its exit code
    pub fn from_error(err: &HealthCheckError) -> Self {
        match err {
            HealthCheckError::Config(_) => ExitCode::ConfigError,
            HealthCheckError::Delivery(_) => ExitCode::DeliveryFailed,
            _ => ExitCode::InternalError,
        }
    }
}

/// Run one check and return the process exit code
pub async fn run(cli: HealthNotifierCli) -> ExitCode {
    match execute(&cli).await {
        Ok(outcome) => {
            if outcome.alerted() {
                tracing::info!(url = ?cli.target_url, "Check finished, alert sent");
            } else {
                tracing::info!(url = ?cli.target_url, "Check finished, target healthy");
            }
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}

async fn execute(cli: &HealthNotifierCli) -> Result<CheckOutcome> {
    let config = cli.to_config()?;
    config.validate()?;

    let prober = HealthProber::new(config.probe_timeout)?;
    let dispatcher = Dispatcher::from_config(&config, SlackNotifier::from_config(&config)?);

    check_and_alert(&config, &prober, &dispatcher).await
}
