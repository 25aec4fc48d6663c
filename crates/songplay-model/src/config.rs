//! Pipeline configuration.
//!
//! Every location the pipeline touches is named here and passed into the
//! entry point; nothing is read from globals. A configuration can be loaded
//! from a JSON file and then adjusted by the caller (the CLI applies its
//! flags on top).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::records::Feed;

pub const DEFAULT_CATALOG_PATTERN: &str = "song_data/*/*/*/*.json";
pub const DEFAULT_ACTIVITY_PATTERN: &str = "log_data/*/*/*.json";
pub const DEFAULT_PLAY_ACTION: &str = "NextSong";

/// Where a feed lives and which files under it belong to the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: PathBuf,
    /// `/`-separated segments relative to `location`; `*` matches within a segment.
    pub pattern: String,
}

/// Schema-mapping overrides: canonical field name -> field name in the source documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverrides {
    #[serde(default)]
    pub catalog: BTreeMap<String, String>,
    #[serde(default)]
    pub activity: BTreeMap<String, String>,
}

impl FieldOverrides {
    pub fn for_feed(&self, feed: Feed) -> &BTreeMap<String, String> {
        match feed {
            Feed::Catalog => &self.catalog,
            Feed::Activity => &self.activity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty() && self.activity.is_empty()
    }
}

/// Behaviour when an output table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Fail the run.
    #[default]
    ErrorIfExists,
    /// Remove the existing table before writing.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub catalog: SourceConfig,
    pub activity: SourceConfig,
    /// Root directory receiving one sub-directory per table.
    pub output: PathBuf,
    /// Page value marking a song-play event.
    #[serde(default = "default_play_action")]
    pub play_action: String,
    #[serde(default)]
    pub field_overrides: FieldOverrides,
    #[serde(default)]
    pub save_mode: SaveMode,
    /// Build and validate every table without writing.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_play_action() -> String {
    DEFAULT_PLAY_ACTION.to_string()
}

impl PipelineConfig {
    /// Both feeds under one input root with the default directory layout.
    pub fn new(input_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let input_root = input_root.into();
        Self {
            catalog: SourceConfig {
                location: input_root.clone(),
                pattern: DEFAULT_CATALOG_PATTERN.to_string(),
            },
            activity: SourceConfig {
                location: input_root,
                pattern: DEFAULT_ACTIVITY_PATTERN.to_string(),
            },
            output: output.into(),
            play_action: default_play_action(),
            field_overrides: FieldOverrides::default(),
            save_mode: SaveMode::default(),
            dry_run: false,
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn source(&self, feed: Feed) -> &SourceConfig {
        match feed {
            Feed::Catalog => &self.catalog,
            Feed::Activity => &self.activity,
        }
    }

    #[must_use]
    pub fn with_save_mode(mut self, mode: SaveMode) -> Self {
        self.save_mode = mode;
        self
    }

    #[must_use]
    pub fn with_play_action(mut self, action: impl Into<String>) -> Self {
        self.play_action = action.into();
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }

    /// Checks the configuration before any input is touched.
    pub fn validate(&self) -> Result<()> {
        for feed in [Feed::Catalog, Feed::Activity] {
            if self.source(feed).pattern.trim().is_empty() {
                return Err(ConfigError::EmptyPattern { feed });
            }
            validate_overrides(feed, self.field_overrides.for_feed(feed))?;
        }
        if self.play_action.trim().is_empty() {
            return Err(ConfigError::EmptyPlayAction);
        }
        Ok(())
    }
}

fn validate_overrides(feed: Feed, overrides: &BTreeMap<String, String>) -> Result<()> {
    let known = feed.fields();
    let mut sources = BTreeSet::new();
    for (canonical, source) in overrides {
        if !known.contains(&canonical.as_str()) {
            return Err(ConfigError::UnknownField {
                feed,
                field: canonical.clone(),
            });
        }
        if !sources.insert(source.as_str()) {
            return Err(ConfigError::DuplicateSourceField {
                feed,
                source_field: source.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_source_layout() {
        let config = PipelineConfig::new("/data/in", "/data/out");
        assert_eq!(config.catalog.location, PathBuf::from("/data/in"));
        assert_eq!(config.catalog.pattern, "song_data/*/*/*/*.json");
        assert_eq!(config.activity.pattern, "log_data/*/*/*.json");
        assert_eq!(config.play_action, "NextSong");
        assert_eq!(config.save_mode, SaveMode::ErrorIfExists);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_override() {
        let mut config = PipelineConfig::new("in", "out");
        config
            .field_overrides
            .activity
            .insert("sessionKey".to_string(), "session".to_string());
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownField { feed: Feed::Activity, .. }
        ));
    }

    #[test]
    fn rejects_duplicate_source_field() {
        let mut config = PipelineConfig::new("in", "out");
        config
            .field_overrides
            .catalog
            .insert("title".to_string(), "name".to_string());
        config
            .field_overrides
            .catalog
            .insert("artist_name".to_string(), "name".to_string());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSourceField { .. }));
    }

    #[test]
    fn rejects_blank_play_action() {
        let config = PipelineConfig::new("in", "out").with_play_action("  ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPlayAction)
        ));
    }

    #[test]
    fn rejects_empty_pattern() {
        let mut config = PipelineConfig::new("in", "out");
        config.catalog.pattern.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPattern { feed: Feed::Catalog })
        ));
    }
}
