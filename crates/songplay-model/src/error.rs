use std::path::PathBuf;

use thiserror::Error;

use crate::records::Feed;

/// Errors raised while loading or validating a [`crate::PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{feed} path pattern is empty")]
    EmptyPattern { feed: Feed },

    #[error("play action must not be empty")]
    EmptyPlayAction,

    #[error("unknown {feed} field '{field}' in field overrides")]
    UnknownField { feed: Feed, field: String },

    #[error("{feed} source field '{source_field}' is mapped more than once")]
    DuplicateSourceField { feed: Feed, source_field: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
