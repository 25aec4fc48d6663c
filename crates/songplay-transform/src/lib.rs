//! Star-schema derivation for the song-play pipeline.
//!
//! Every builder is a pure function from borrowed input records to owned
//! output rows:
//!
//! - **catalog**: Song and Artist dimensions from catalog records
//! - **activity**: restriction of the log to song-play events
//! - **users**: latest profile per user
//! - **time**: calendar decomposition of play timestamps
//! - **songplays**: exact three-key join of plays against the catalog
//! - **surrogate**: partition-offset surrogate ids for fact rows
//! - **frame**: conversion of rows into Polars DataFrames for the writer
//! - **star**: all of the above, run concurrently

pub mod activity;
pub mod catalog;
pub mod error;
pub mod frame;
pub mod keys;
pub mod songplays;
pub mod star;
pub mod surrogate;
pub mod time;
pub mod users;

pub use activity::filter_plays;
pub use catalog::{CatalogDimensions, build_artists, build_catalog_dimensions, build_songs};
pub use error::{Result, TransformError};
pub use frame::{artists_frame, songplays_frame, songs_frame, time_frame, users_frame};
pub use songplays::{CatalogIndex, FactOutput, build_songplays, build_songplays_partitioned};
pub use star::{BuildStats, StarSchema, build_star_schema};
pub use surrogate::{
    DEFAULT_PARTITION_ROWS, PARTITION_SHIFT, max_partition_rows, partition_offset_id,
};
pub use time::{build_time, decompose_timestamp, year_month};
pub use users::build_users;
