//! # Command Line
//!
//! `edge-vc start` binds the issuance service. Every option reads from a
//! flag first and an `EDGE_VC_*` environment variable second.

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use edgevc_core::DEFAULT_ID_PREFIX;

use crate::state::{AppConfig, IdStrategy, DEFAULT_BODY_LIMIT};

/// edge-vc: Verifiable Credential issuance service.
#[derive(Parser, Debug)]
#[command(name = "edge-vc", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the credential issuance server.
    Start(StartArgs),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for `edge-vc start`.
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// URL to run the edge-vc instance on, as host:port.
    #[arg(short = 'u', long, env = "EDGE_VC_HOST_URL")]
    pub host_url: Option<String>,

    /// Prefix prepended to every issued credential id.
    #[arg(long, env = "EDGE_VC_CREDENTIAL_ID_PREFIX", default_value = DEFAULT_ID_PREFIX)]
    pub credential_id_prefix: String,

    /// How credential ids are generated.
    #[arg(long, env = "EDGE_VC_ID_STRATEGY", value_enum, default_value_t = IdStrategy::Uuid)]
    pub id_strategy: IdStrategy,

    /// Log output format.
    #[arg(long, env = "EDGE_VC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Reasons `start` refuses to run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("host URL not provided")]
    MissingHostUrl,
}

impl StartArgs {
    /// Resolve the arguments into an [`AppConfig`].
    pub fn into_config(self) -> Result<AppConfig, StartError> {
        let host_url = self
            .host_url
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .ok_or(StartError::MissingHostUrl)?;

        Ok(AppConfig {
            host_url,
            credential_id_prefix: self.credential_id_prefix,
            id_strategy: self.id_strategy,
            body_limit: DEFAULT_BODY_LIMIT,
        })
    }
}
