mod artifact;
mod client;
mod config;
mod errors;
mod fixtures;
mod probe;
mod report;
mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::ProbeClient;
use crate::config::{Args, Config};
use crate::probe::standard_plan;
use crate::report::{render, render_json};

#[tokio::main]
async fn main() -> Result<()> {
    // Resolve configuration first (flags beat environment beat defaults)
    let args = Args::parse();
    let config = Config::load(&args)?;

    // Initialize structured logging; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting CV Optimizer smoke test v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Backend under test: {}", config.base_url);
    if let Some(frontend) = &config.frontend_url {
        info!("Frontend under test: {frontend}");
    }

    let plan = standard_plan(&config)?;
    let client = ProbeClient::new(config.timeout_secs).context("Failed to build HTTP client")?;
    let report = runner::run(&client, plan).await;

    if args.json {
        let json = render_json(&report).context("Failed to encode the report as JSON")?;
        println!("{json}");
    } else {
        print!("{}", render(&report));
    }

    if !report.overall_success {
        std::process::exit(1);
    }
    Ok(())
}
