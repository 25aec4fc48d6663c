use std::path::PathBuf;

use songplay_model::TableKind;
use songplay_output::TableWriteReport;
use songplay_transform::BuildStats;

/// Per-table outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub table: TableKind,
    pub rows: usize,
    pub partitions: usize,
    pub files: usize,
    /// Table directory; `None` when nothing was written.
    pub path: Option<PathBuf>,
}

impl TableSummary {
    pub fn not_written(table: TableKind, rows: usize) -> Self {
        Self {
            table,
            rows,
            partitions: 0,
            files: 0,
            path: None,
        }
    }
}

impl From<TableWriteReport> for TableSummary {
    fn from(report: TableWriteReport) -> Self {
        Self {
            table: report.table,
            rows: report.rows,
            partitions: report.partitions,
            files: report.files.len(),
            path: Some(report.path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output: PathBuf,
    pub dry_run: bool,
    pub catalog_files: usize,
    pub activity_files: usize,
    pub stats: BuildStats,
    pub tables: Vec<TableSummary>,
}

impl RunSummary {
    pub fn table(&self, table: TableKind) -> Option<&TableSummary> {
        self.tables.iter().find(|summary| summary.table == table)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|summary| summary.rows).sum()
    }
}
