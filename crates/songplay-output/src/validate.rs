//! Table-shape validation.
//!
//! A frame is accepted only when it carries exactly the declared columns, in
//! declared order, with declared dtypes; non-nullable columns hold no nulls
//! and the unique key, when the table has one, never repeats.

use polars::prelude::{DataFrame, DataType};
use songplay_model::{ColumnType, TableKind, TableSchema};
use tracing::debug;

use crate::error::{OutputError, Result};

/// The polars dtype a declared column is stored as.
pub fn polars_dtype(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Utf8 => DataType::String,
        ColumnType::Int32 => DataType::Int32,
        ColumnType::Int64 => DataType::Int64,
        ColumnType::Float64 => DataType::Float64,
    }
}

/// Checks `frame` against the schema of `table`.
pub fn validate_frame(table: TableKind, frame: &DataFrame) -> Result<()> {
    let schema = table.schema();
    check_columns(schema, frame)?;

    for spec in schema.columns {
        let column = frame
            .column(spec.name)
            .map_err(OutputError::polars(table))?;

        let expected = polars_dtype(spec.column_type);
        if column.dtype() != &expected {
            return Err(OutputError::ColumnType {
                table,
                column: spec.name.to_string(),
                expected: spec.column_type,
                found: column.dtype().to_string(),
            });
        }

        if !spec.nullable && column.null_count() > 0 {
            return Err(OutputError::UnexpectedNulls {
                table,
                column: spec.name.to_string(),
                nulls: column.null_count(),
            });
        }
    }

    if let Some(key) = schema.unique_key {
        let column = frame.column(key).map_err(OutputError::polars(table))?;
        let distinct = column
            .as_materialized_series()
            .n_unique()
            .map_err(OutputError::polars(table))?;
        if distinct != frame.height() {
            return Err(OutputError::DuplicateKey {
                table,
                column: key.to_string(),
                rows: frame.height(),
                distinct,
            });
        }
    }

    debug!(table = %table, rows = frame.height(), "table shape validated");
    Ok(())
}

fn check_columns(schema: &TableSchema, frame: &DataFrame) -> Result<()> {
    let found: Vec<&str> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    let expected: Vec<&str> = schema.column_names().collect();
    if found == expected {
        return Ok(());
    }
    Err(OutputError::ColumnMismatch {
        table: schema.kind,
        expected: expected.join(", "),
        found: found.join(", "),
    })
}
