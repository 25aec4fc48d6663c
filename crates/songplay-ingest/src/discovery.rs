//! File discovery by path pattern.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Lists the files under `root` matching `pattern`.
///
/// The pattern is a `/`-separated list of segments, one per directory level,
/// so `song_data/*/*/*/*.json` only matches files exactly five levels deep.
/// Each segment is a shell wildcard (`*`, `?` and `[...]` classes).
///
/// Returns files sorted by path; that order is the feed's record order.
pub fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let segments = pattern
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .map(|segment| {
            Pattern::new(segment).map_err(|source| IngestError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    if segments.is_empty() {
        return Ok(Vec::new());
    }
    let depth = segments.len();

    let walker = WalkDir::new(root)
        .min_depth(depth)
        .max_depth(depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let level = entry.depth();
            if level == 0 {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| segments[level - 1].matches(name))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| IngestError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
