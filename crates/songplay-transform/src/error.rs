use polars::prelude::PolarsError;
use songplay_model::TableKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("timestamp {ts} is outside the representable calendar range")]
    TimestampOutOfRange { ts: i64 },

    #[error("surrogate id for partition {partition} offset {offset} does not fit in 64 bits")]
    SurrogateOverflow { partition: usize, offset: usize },

    #[error("failed to build {table} frame: {source}")]
    Frame {
        table: TableKind,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
