//! Error types for the slot engine

use thiserror::Error;

use crate::config::ConfigError;

/// Engine error type
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trace error: {0}")]
    Trace(#[from] sg_stage::TraceError),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
