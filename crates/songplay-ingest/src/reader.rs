//! Feed readers.
//!
//! Files are decoded in parallel; the concatenated result keeps file order
//! and record order within each file, which downstream tie-breaks rely on.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use songplay_model::{Feed, PipelineConfig, RawActivityRecord, RawCatalogRecord, SourceConfig};

use crate::discovery::discover_files;
use crate::error::{IngestError, Result};
use crate::json::decode_documents;

/// Records read from one feed.
#[derive(Debug, Clone)]
pub struct FeedBatch<T> {
    pub records: Vec<T>,
    /// Number of files the records came from.
    pub files: usize,
}

impl<T> FeedBatch<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the catalog feed named by `config`.
pub fn read_catalog(config: &PipelineConfig) -> Result<FeedBatch<RawCatalogRecord>> {
    read_feed(
        Feed::Catalog,
        &config.catalog,
        &config.field_overrides.catalog,
    )
}

/// Reads the activity feed named by `config`.
pub fn read_activity(config: &PipelineConfig) -> Result<FeedBatch<RawActivityRecord>> {
    read_feed(
        Feed::Activity,
        &config.activity,
        &config.field_overrides.activity,
    )
}

/// Reads every file of a feed.
///
/// # Errors
///
/// Fails when the pattern matches no files, when the files hold no records,
/// or when any file cannot be read or decoded.
pub fn read_feed<T>(
    feed: Feed,
    source: &SourceConfig,
    overrides: &BTreeMap<String, String>,
) -> Result<FeedBatch<T>>
where
    T: DeserializeOwned + Send,
{
    let span = info_span!("read_feed", feed = %feed, location = %source.location.display());
    let _guard = span.enter();
    let start = Instant::now();

    let files = discover_files(&source.location, &source.pattern)?;
    if files.is_empty() {
        return Err(IngestError::NoFiles {
            feed,
            location: source.location.clone(),
            pattern: source.pattern.clone(),
        });
    }
    debug!(file_count = files.len(), pattern = %source.pattern, "discovered files");

    let per_file: Vec<Vec<T>> = files
        .par_iter()
        .map(|path| {
            let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
                path: path.clone(),
                source,
            })?;
            let records = decode_documents(path, &text, overrides)?;
            debug!(path = %path.display(), records = records.len(), "decoded file");
            Ok(records)
        })
        .collect::<Result<_>>()?;

    let records: Vec<T> = per_file.into_iter().flatten().collect();
    if records.is_empty() {
        return Err(IngestError::NoRecords {
            feed,
            location: source.location.clone(),
        });
    }

    info!(
        feed = %feed,
        file_count = files.len(),
        record_count = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "feed read"
    );

    Ok(FeedBatch {
        records,
        files: files.len(),
    })
}
