//! Command line arguments, credentials and server limits
//!
//! Credentials are read from the environment after loading a `.env` file
//! (if present). `OPENAI_API_KEY` is required; `YOUTUBE_API_KEY` and
//! `SEMANTIC_SCHOLAR_API_KEY` are optional and only enable or lift limits on
//! the discovery services.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use orchestrator::{PolicyError, PolicyTable};
use thiserror::Error;

#[derive(Parser, Debug, Clone)]
#[command(name = "study-server")]
#[command(about = "Study assistant API: document upload, study artifacts and resource discovery")]
pub struct Args {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the HTTP API
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Tracing endpoint URL (if set, traces will be sent here)
    #[arg(long)]
    pub trace_ep: Option<String>,

    /// JSON file overriding entries of the built-in policy table
    #[arg(long)]
    pub policy_file: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = agents::DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    /// Chat model used by every agent
    #[arg(long, default_value = agents::DEFAULT_MODEL)]
    pub model: String,

    /// Upload size ceiling in MiB
    #[arg(long, default_value = "50")]
    pub max_upload_mb: usize,

    /// Minimum extracted words for an upload to be accepted
    #[arg(long, default_value = "10")]
    pub min_word_count: usize,

    /// Skip the completion-service probe at startup
    #[arg(long)]
    pub skip_connection_test: bool,
}

impl Args {
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let address = format!("{}:{}", self.host, self.port);
        address.parse().map_err(|_| ConfigError::InvalidAddress { address })
    }

    pub fn policy_table(&self) -> Result<PolicyTable, ConfigError> {
        match &self.policy_file {
            Some(path) => Ok(PolicyTable::load_file(path)?),
            None => Ok(PolicyTable::default()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} not found in environment variables")]
    MissingCredential { key: &'static str },

    #[error("Invalid bind address: {address}")]
    InvalidAddress { address: String },

    #[error("Policy table error: {0}")]
    Policy(#[from] PolicyError),
}

/// API credentials for the collaborators
#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub youtube_api_key: Option<String>,
    pub semantic_scholar_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"***")
            .field("youtube_api_key", &self.youtube_api_key.as_ref().map(|_| "***"))
            .field("semantic_scholar_api_key", &self.semantic_scholar_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    const REQUIRED_KEY: &'static str = "OPENAI_API_KEY";
    const YOUTUBE_KEY: &'static str = "YOUTUBE_API_KEY";
    const SEMANTIC_SCHOLAR_KEY: &'static str = "SEMANTIC_SCHOLAR_API_KEY";

    /// Load `.env` (if any) and read credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`; blank values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let openai_api_key = read(Self::REQUIRED_KEY).ok_or(ConfigError::MissingCredential {
            key: Self::REQUIRED_KEY,
        })?;

        Ok(Self {
            openai_api_key,
            youtube_api_key: read(Self::YOUTUBE_KEY),
            semantic_scholar_api_key: read(Self::SEMANTIC_SCHOLAR_KEY),
        })
    }
}

/// Limits and flags the request handlers consult
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_upload_bytes: usize,
    pub min_word_count: usize,
    pub openai_key_configured: bool,
    pub version: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50 * 1024 * 1024,
            min_word_count: 10,
            openai_key_configured: true,
            version: "1.0.0",
        }
    }
}

impl ServerConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
            min_word_count: args.min_word_count,
            ..Self::default()
        }
    }

    pub fn max_upload_mb(&self) -> usize {
        self.max_upload_bytes / (1024 * 1024)
    }
}
