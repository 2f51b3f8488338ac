//! Server configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use stockroom_live::DEFAULT_KEEPALIVE_PERIOD;

/// Default port, matching the hosted deployment.
pub const DEFAULT_PORT: u16 = 5000;

/// Origins accepted in production besides the suffix matches.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5000"];

/// Origin suffixes accepted in production.
pub const DEFAULT_ORIGIN_SUFFIXES: &[&str] = &[".netlify.app", ".onrender.com"];

/// Deployment environment. Controls how strict the CORS policy is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Everything `run_server` needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub keepalive_period: Duration,
    /// Ceiling on concurrent event streams. `None` means unbounded.
    pub max_channels: Option<usize>,
    pub environment: Environment,
    pub allowed_origins: Vec<String>,
    pub origin_suffixes: Vec<String>,
    /// `token=owner` pairs for the static identity provider.
    pub tokens: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            keepalive_period: DEFAULT_KEEPALIVE_PERIOD,
            max_channels: None,
            environment: Environment::Development,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            origin_suffixes: DEFAULT_ORIGIN_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            tokens: Vec::new(),
        }
    }
}
