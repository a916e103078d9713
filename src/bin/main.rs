//! Health Notifier entry point
//!
//! Probes the target once, alerts Slack if it is not UP, and exits.

use clap::Parser;
use health_notifier::cli::{self, HealthNotifierCli};
use health_notifier::telemetry::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = HealthNotifierCli::parse();

    init_tracing(cli.log_format)?;

    let code = cli::run(cli).await;
    std::process::exit(code.into());
}
