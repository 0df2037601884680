//! Rolemap CLI.
//!
//! Crawls the configured account's organization/project hierarchy, resolves
//! every role assignment's principal, and writes the CSV report.

use anyhow::Context;
use clap::Parser;
use rolemap_api::{ApiConfig, PlatformClient};
use rolemap_report::{crawl, write_report_file, DEFAULT_REPORT_FILENAME};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments for the role-assignment report.
#[derive(Parser, Debug)]
#[command(version, about = "Role-assignment report for access-control hierarchies", long_about = None)]
struct Args {
    /// API key (PAT or SAT token)
    #[arg(long, env = "HARNESS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Account identifier
    #[arg(long, env = "HARNESS_ACCOUNT_ID")]
    account: String,

    /// Base URL of the service
    #[arg(long, env = "HARNESS_BASE_URL", default_value = "https://app.harness.io")]
    base_url: String,

    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_REPORT_FILENAME)]
    output: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::new(args.base_url, args.api_key, args.account);
    config.timeout_secs = args.timeout_secs;
    config.validate().context("Invalid configuration")?;

    let client = PlatformClient::new(config).context("Failed to build HTTP client")?;

    let records = crawl(&client).await;
    info!(rows = records.len(), "Crawl complete");

    write_report_file(&records, &args.output)
        .with_context(|| format!("Failed to write report to {}", args.output))?;
    info!(output = %args.output, "Report written");

    Ok(())
}
