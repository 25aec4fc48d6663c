//! Feed readers for the song-play pipeline.
//!
//! - **discovery**: resolve a location plus path pattern to an ordered file list
//! - **json**: decode single-object and newline-delimited JSON documents
//! - **reader**: read a whole feed into raw records

pub mod discovery;
pub mod error;
pub mod json;
pub mod reader;

pub use discovery::discover_files;
pub use error::{IngestError, Result};
pub use json::decode_documents;
pub use reader::{FeedBatch, read_activity, read_catalog, read_feed};
