use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_OUTPUT: &str = "optimized-cv.pdf";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Command-line surface of the harness.
#[derive(Debug, Parser)]
#[command(name = "smoke", about = "Smoke-tests a CV-optimization deployment", version)]
pub struct Args {
    /// Base URL of the backend under test
    #[arg(long)]
    pub base_url: Option<String>,

    /// Base URL of the web frontend; enables the full-stack probe sequence
    #[arg(long)]
    pub frontend_url: Option<String>,

    /// Where to write the generated document
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Upload this CV instead of the built-in sample
    #[arg(long)]
    pub cv_file: Option<PathBuf>,

    /// Send this job offer instead of the built-in sample
    #[arg(long)]
    pub job_offer_file: Option<PathBuf>,

    /// Emit the run report as JSON instead of the human-readable summary
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved harness configuration.
/// Precedence per option: CLI flag, then environment variable, then default.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub frontend_url: Option<String>,
    pub output_path: PathBuf,
    pub timeout_secs: u64,
    pub cv_file: Option<PathBuf>,
    pub job_offer_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn load(args: &Args) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let base_url = resolve(args.base_url.clone(), "SMOKE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let frontend_url = resolve(args.frontend_url.clone(), "SMOKE_FRONTEND_URL");

        let output_path = args
            .output
            .clone()
            .or_else(|| std::env::var("SMOKE_OUTPUT").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let timeout_secs = match args.timeout {
            Some(secs) => secs,
            None => match std::env::var("SMOKE_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .parse::<u64>()
                    .context("SMOKE_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Config {
            base_url: normalize_url(base_url),
            frontend_url: frontend_url.map(normalize_url),
            output_path,
            timeout_secs,
            cv_file: args.cv_file.clone(),
            job_offer_file: args.job_offer_file.clone(),
            rust_log: if args.verbose { "debug" } else { "info" }.to_string(),
        })
    }
}

fn resolve(flag: Option<String>, env_key: &str) -> Option<String> {
    flag.or_else(|| std::env::var(env_key).ok())
}

/// Probe URLs are built as `{base}{path}`, so bases must not end in '/'.
fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
