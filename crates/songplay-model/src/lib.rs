//! Data model for the song-play star schema.
//!
//! - **records**: raw catalog and activity records as decoded from the feeds
//! - **tables**: dimension and fact rows produced by the transform crate
//! - **schema**: column layout, partition keys and unique keys per output table
//! - **config**: explicit pipeline configuration

pub mod config;
pub mod error;
pub mod records;
pub mod schema;
pub mod tables;

pub use config::{FieldOverrides, PipelineConfig, SaveMode, SourceConfig};
pub use error::{ConfigError, Result};
pub use records::{Feed, RawActivityRecord, RawCatalogRecord};
pub use schema::{ColumnSpec, ColumnType, TableKind, TableSchema};
pub use tables::{Artist, Song, SongPlay, TimeRow, User};
