//! Web server command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use stockroom_web::config::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_ORIGIN_SUFFIXES, DEFAULT_PORT};
use stockroom_web::{Environment, ServerConfig};
use tracing::info;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "STOCKROOM_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Seconds between keep-alive heartbeats on event streams
    #[arg(
        long,
        env = "STOCKROOM_KEEPALIVE_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub keepalive_secs: u64,

    /// Maximum number of concurrent event streams (unbounded if unset)
    #[arg(long, env = "STOCKROOM_MAX_CHANNELS")]
    pub max_channels: Option<usize>,

    /// Deployment environment: development or production
    #[arg(long = "env", env = "STOCKROOM_ENV", default_value = "development")]
    pub environment: Environment,

    /// Origin allowed to call the API in production (repeatable)
    #[arg(long = "allowed-origin", env = "STOCKROOM_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// API credential as token=owner or token=owner:email (repeatable)
    #[arg(long = "token", env = "STOCKROOM_TOKENS", value_delimiter = ',', hide_env_values = true)]
    pub tokens: Vec<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./stockroom.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        let allowed_origins = if self.allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
        } else {
            self.allowed_origins
        };

        ServerConfig {
            host: self.host,
            port: self.port,
            keepalive_period: Duration::from_secs(self.keepalive_secs),
            max_channels: self.max_channels,
            environment: self.environment,
            allowed_origins,
            origin_suffixes: DEFAULT_ORIGIN_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            tokens: self.tokens,
        }
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.into_config();

    println!();
    println!("  {} {}", "Stockroom".cyan().bold(), "API Server".bold());
    println!();
    println!(
        "  {}        http://{}:{}/api",
        "API".green(),
        config.host,
        config.port
    );
    println!(
        "  {}     http://{}:{}/events",
        "Events".green(),
        config.host,
        config.port
    );
    println!(
        "  {}  {}",
        "Env".green(),
        config.environment.to_string().yellow()
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    info!(
        keepalive_secs = config.keepalive_period.as_secs(),
        max_channels = ?config.max_channels,
        tokens = config.tokens.len(),
        "Starting server"
    );
    stockroom_web::run_server(config).await
}
