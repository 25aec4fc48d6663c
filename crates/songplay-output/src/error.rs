//! Error types for table output.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use songplay_model::{ColumnType, TableKind};
use thiserror::Error;

/// Errors raised while validating or writing a table.
#[derive(Debug, Error)]
pub enum OutputError {
    // === Shape Errors ===
    /// Frame columns differ from the declared column list.
    #[error("{table} columns [{found}] do not match declared columns [{expected}]")]
    ColumnMismatch {
        table: TableKind,
        expected: String,
        found: String,
    },

    /// A column has a different dtype than declared.
    #[error("{table}.{column} has dtype {found}, expected {expected}")]
    ColumnType {
        table: TableKind,
        column: String,
        expected: ColumnType,
        found: String,
    },

    /// A non-nullable column holds nulls.
    #[error("{table}.{column} holds {nulls} null values but is not nullable")]
    UnexpectedNulls {
        table: TableKind,
        column: String,
        nulls: usize,
    },

    /// The unique key column repeats a value.
    #[error("{table}.{column} must be unique: {rows} rows but {distinct} distinct values")]
    DuplicateKey {
        table: TableKind,
        column: String,
        rows: usize,
        distinct: usize,
    },

    // === Write Errors ===
    /// Target table directory exists and the save mode forbids replacing it.
    #[error("table {table} already exists at {path}")]
    TableExists { table: TableKind, path: PathBuf },

    /// File system failure.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failure while partitioning, selecting or encoding.
    #[error("failed to write {table}: {source}")]
    Polars {
        table: TableKind,
        #[source]
        source: PolarsError,
    },
}

impl OutputError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    pub(crate) fn polars(table: TableKind) -> impl FnOnce(PolarsError) -> Self {
        move |source| Self::Polars { table, source }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::DuplicateKey {
            table: TableKind::Users,
            column: "user_id".to_string(),
            rows: 3,
            distinct: 2,
        };
        assert_eq!(
            err.to_string(),
            "users.user_id must be unique: 3 rows but 2 distinct values"
        );
    }
}
