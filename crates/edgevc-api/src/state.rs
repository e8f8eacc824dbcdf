//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Cloning is cheap: the pipeline's collaborators
//! sit behind `Arc`, and the metrics handle is itself a shared reference.

use std::fmt;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use edgevc_core::{
    IdGenerator, SequentialIdGenerator, SystemClock, UuidIdGenerator, DEFAULT_ID_PREFIX,
};
use edgevc_vc::IssuancePipeline;

/// Request body cap applied to every route.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// How credential identifiers are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IdStrategy {
    /// `<prefix><uuid-v4>`.
    #[default]
    Uuid,
    /// `<prefix><n>`, counting from 1 per process.
    Sequential,
}

impl IdStrategy {
    /// Instantiate a generator for this strategy.
    pub fn generator(self, prefix: &str) -> Arc<dyn IdGenerator> {
        match self {
            Self::Uuid => Arc::new(UuidIdGenerator::new(prefix)),
            Self::Sequential => Arc::new(SequentialIdGenerator::new(prefix)),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `host:port` the server binds to.
    pub host_url: String,
    /// Prefix prepended to every credential id.
    pub credential_id_prefix: String,
    pub id_strategy: IdStrategy,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_url: "localhost:8080".to_string(),
            credential_id_prefix: DEFAULT_ID_PREFIX.to_string(),
            id_strategy: IdStrategy::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pipeline: IssuancePipeline,
    /// Present when a Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with default configuration and wall-clock time.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State whose pipeline follows `config` and reads wall-clock time.
    pub fn with_config(config: AppConfig) -> Self {
        let ids = config.id_strategy.generator(&config.credential_id_prefix);
        let pipeline = IssuancePipeline::new(Arc::new(SystemClock), ids);
        Self::with_pipeline(config, pipeline)
    }

    /// State around a caller-assembled pipeline.
    pub fn with_pipeline(config: AppConfig, pipeline: IssuancePipeline) -> Self {
        Self {
            config,
            pipeline,
            metrics: None,
        }
    }

    /// Attach the handle of an installed Prometheus recorder.
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("pipeline", &self.pipeline)
            .field("metrics", &self.metrics.as_ref().map(|_| "prometheus"))
            .finish()
    }
}
