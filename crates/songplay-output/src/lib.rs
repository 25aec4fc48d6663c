//! Output of the star-schema tables.
//!
//! - **validate**: table-shape checks against the declared schema
//! - **partition**: Hive-style `key=value` directory naming
//! - **writer**: the [`TableWriter`] seam and its Parquet implementation

pub mod error;
pub mod partition;
pub mod validate;
pub mod writer;

pub use error::{OutputError, Result};
pub use partition::{HIVE_DEFAULT_PARTITION, partition_dir, partition_value};
pub use validate::{polars_dtype, validate_frame};
pub use writer::{ParquetTableWriter, SUCCESS_MARKER, TableWriteReport, TableWriter};
