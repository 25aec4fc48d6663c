//! Partitioned Parquet table writer.
//!
//! Layout under the output root:
//!
//! ```text
//! <root>/<table dir>/[<key>=<value>/...]part-NNNNN.parquet
//! <root>/<table dir>/_SUCCESS
//! ```
//!
//! Partitioned tables get one directory tier per partition key, in declared
//! order, and one part file per distinct key combination. Partition columns
//! live only in the directory names. The `_SUCCESS` marker is written last,
//! so a table directory without it is incomplete.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{DataFrame, ParquetWriter};
use songplay_model::{SaveMode, TableKind};
use tracing::{debug, info, info_span};

use crate::error::{OutputError, Result};
use crate::partition::partition_dir;
use crate::validate::validate_frame;

/// Name of the completion marker in every written table directory.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Outcome of writing one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWriteReport {
    pub table: TableKind,
    /// Table directory.
    pub path: PathBuf,
    pub rows: usize,
    /// Distinct partition directories; zero for unpartitioned tables.
    pub partitions: usize,
    pub files: Vec<PathBuf>,
}

/// Destination for the built tables.
pub trait TableWriter: Send + Sync {
    /// Validates `frame` against the table schema and persists it.
    fn write_table(&self, table: TableKind, frame: &DataFrame) -> Result<TableWriteReport>;

    /// Fails if any of `tables` cannot be written under the save mode.
    ///
    /// Called once before the first write so a conflict on a later table
    /// does not leave earlier tables behind.
    fn check_targets(&self, tables: &[TableKind]) -> Result<()>;
}

/// Writes tables as Hive-partitioned Parquet directories on the local file system.
#[derive(Debug, Clone)]
pub struct ParquetTableWriter {
    root: PathBuf,
    mode: SaveMode,
}

impl ParquetTableWriter {
    pub fn new(root: impl Into<PathBuf>, mode: SaveMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    pub fn table_path(&self, table: TableKind) -> PathBuf {
        self.root.join(table.dir_name())
    }

    fn check_target(&self, table: TableKind) -> Result<()> {
        let dir = self.table_path(table);
        if self.mode == SaveMode::ErrorIfExists && dir.exists() {
            return Err(OutputError::TableExists { table, path: dir });
        }
        Ok(())
    }

    /// Applies the save mode and returns an empty table directory.
    fn prepare_dir(&self, table: TableKind) -> Result<PathBuf> {
        self.check_target(table)?;
        let dir = self.table_path(table);
        if dir.exists() {
            debug!(table = %table, path = %dir.display(), "removing existing table");
            fs::remove_dir_all(&dir).map_err(OutputError::io(&dir))?;
        }
        fs::create_dir_all(&dir).map_err(OutputError::io(&dir))?;
        Ok(dir)
    }
}

impl TableWriter for ParquetTableWriter {
    fn check_targets(&self, tables: &[TableKind]) -> Result<()> {
        tables.iter().try_for_each(|table| self.check_target(*table))
    }

    fn write_table(&self, table: TableKind, frame: &DataFrame) -> Result<TableWriteReport> {
        validate_frame(table, frame)?;

        let span = info_span!("write_table", table = %table);
        let _guard = span.enter();
        let start = Instant::now();

        let dir = self.prepare_dir(table)?;
        let schema = table.schema();
        let mut files = Vec::new();
        let mut partitions = 0;

        if schema.is_partitioned() {
            if frame.height() > 0 {
                let parts = frame
                    .partition_by_stable(schema.partition_by.iter().copied(), true)
                    .map_err(OutputError::polars(table))?;
                let body: Vec<&str> = schema
                    .column_names()
                    .filter(|name| !schema.partition_by.contains(name))
                    .collect();
                partitions = parts.len();

                for (index, part) in parts.iter().enumerate() {
                    let mut part_dir = dir.clone();
                    for key in schema.partition_by {
                        let value = part
                            .column(key)
                            .and_then(|column| column.get(0))
                            .map_err(OutputError::polars(table))?;
                        part_dir.push(partition_dir(key, &value));
                    }
                    let mut body_frame = part
                        .select(body.iter().copied())
                        .map_err(OutputError::polars(table))?;
                    files.push(write_part(table, &part_dir, index, &mut body_frame)?);
                }
            }
        } else {
            let mut whole = frame.clone();
            files.push(write_part(table, &dir, 0, &mut whole)?);
        }

        let marker = dir.join(SUCCESS_MARKER);
        fs::write(&marker, b"").map_err(OutputError::io(&marker))?;

        info!(
            rows = frame.height(),
            partitions,
            files = files.len(),
            path = %dir.display(),
            duration_ms = start.elapsed().as_millis(),
            "table written"
        );

        Ok(TableWriteReport {
            table,
            path: dir,
            rows: frame.height(),
            partitions,
            files,
        })
    }
}

fn write_part(
    table: TableKind,
    dir: &Path,
    index: usize,
    frame: &mut DataFrame,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(OutputError::io(dir))?;
    let path = dir.join(format!("part-{index:05}.parquet"));
    let file = File::create(&path).map_err(OutputError::io(&path))?;
    ParquetWriter::new(file)
        .finish(frame)
        .map_err(OutputError::polars(table))?;
    debug!(path = %path.display(), rows = frame.height(), "part written");
    Ok(path)
}
