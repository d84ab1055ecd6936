use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api::{Backend, HttpBackend};
use crate::error::Result;
use crate::mock::MockBackend;

/// sealdeck: look up a seal, drill into its applications' pools, scale or delete them.
#[derive(Parser, Debug, Clone)]
#[command(name = "sealdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the seal backend. Without it a simulated backend is used.
    #[arg(long)]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Latency of the simulated backend in milliseconds
    #[arg(long, default_value = "800")]
    pub mock_latency_ms: u64,

    /// Seal ID to look up on startup
    #[arg(long)]
    pub seal: Option<String>,

    /// Directory CSV exports are written to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Log file path
    #[arg(long, default_value = "/tmp/sealdeck.log")]
    pub log_file: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Runtime settings the app needs after argument parsing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout: Duration,
    pub mock_latency: Duration,
    pub initial_seal: Option<String>,
    pub export_dir: PathBuf,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            mock_latency: Duration::from_millis(cli.mock_latency_ms),
            initial_seal: cli
                .seal
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            export_dir: cli.export_dir.clone(),
        }
    }
}

impl Config {
    pub fn build_backend(&self) -> Result<Backend> {
        match &self.api_url {
            Some(url) => Ok(Backend::Http(HttpBackend::new(url, self.timeout)?)),
            None => Ok(Backend::Mock(MockBackend::new(self.mock_latency))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: Duration::from_secs(30),
            mock_latency: Duration::from_millis(800),
            initial_seal: None,
            export_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_simulated_backend() {
        let cli = Cli::parse_from(["sealdeck"]);
        let config = Config::from(&cli);
        assert!(config.api_url.is_none());
        assert_eq!(config.mock_latency, Duration::from_millis(800));
        assert!(matches!(config.build_backend().unwrap(), Backend::Mock(_)));
    }

    #[test]
    fn api_url_selects_http_backend() {
        let cli = Cli::parse_from(["sealdeck", "--api-url", "http://localhost:9000/", "--timeout-secs", "5"]);
        let config = Config::from(&cli);
        assert_eq!(config.timeout, Duration::from_secs(5));
        match config.build_backend().unwrap() {
            Backend::Http(h) => assert_eq!(h.base_url(), "http://localhost:9000"),
            Backend::Mock(_) => panic!("expected HTTP backend"),
        }
    }

    #[test]
    fn blank_seal_argument_is_ignored() {
        let cli = Cli::parse_from(["sealdeck", "--seal", "  "]);
        assert!(Config::from(&cli).initial_seal.is_none());
        let cli = Cli::parse_from(["sealdeck", "--seal", " SEAL123 "]);
        assert_eq!(Config::from(&cli).initial_seal.as_deref(), Some("SEAL123"));
    }
}
