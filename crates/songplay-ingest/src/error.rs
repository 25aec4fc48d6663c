//! Error types for feed ingestion.

use std::path::PathBuf;

use songplay_model::Feed;
use thiserror::Error;

/// Errors that can occur while reading a feed.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Feed location is missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed while walking the feed location.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pattern segment is not a valid wildcard pattern.
    #[error("invalid path pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    // === Decoding Errors ===
    /// A document is not valid JSON or does not fit the record shape.
    #[error("failed to decode record {record} in {path}: {source}")]
    Decode {
        path: PathBuf,
        record: usize,
        #[source]
        source: serde_json::Error,
    },

    // === Empty Input ===
    /// The pattern matched no files.
    #[error("no {feed} files match '{pattern}' under {location}")]
    NoFiles {
        feed: Feed,
        location: PathBuf,
        pattern: String,
    },

    /// Files were found but held no records.
    #[error("{feed} files under {location} contain no records")]
    NoRecords { feed: Feed, location: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
