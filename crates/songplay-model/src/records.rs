//! Raw feed records.
//!
//! Field names follow the source JSON documents. Descriptive fields are
//! nullable and propagate as nulls into the output tables.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The two input feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Catalog,
    Activity,
}

impl Feed {
    /// Canonical field names accepted by the feed's decoder.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Feed::Catalog => RawCatalogRecord::FIELDS,
            Feed::Activity => RawActivityRecord::FIELDS,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Catalog => f.write_str("catalog"),
            Feed::Activity => f.write_str("activity"),
        }
    }
}

/// One music-catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCatalogRecord {
    pub song_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    pub artist_id: String,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default)]
    pub artist_latitude: Option<f64>,
    #[serde(default)]
    pub artist_longitude: Option<f64>,
    /// Release year; the catalog uses 0 for unknown.
    #[serde(default)]
    pub year: Option<i32>,
}

impl RawCatalogRecord {
    pub const FIELDS: &'static [&'static str] = &[
        "song_id",
        "title",
        "duration",
        "artist_id",
        "artist_name",
        "artist_location",
        "artist_latitude",
        "artist_longitude",
        "year",
    ];
}

/// One logged user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityRecord {
    #[serde(default)]
    pub page: Option<String>,
    /// Empty for logged-out sessions.
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Title of the played song.
    #[serde(default)]
    pub song: Option<String>,
    /// Name of the played artist.
    #[serde(default)]
    pub artist: Option<String>,
    /// Played duration in seconds.
    #[serde(default)]
    pub length: Option<f64>,
    /// Epoch milliseconds.
    pub ts: i64,
}

impl RawActivityRecord {
    pub const FIELDS: &'static [&'static str] = &[
        "page",
        "userId",
        "firstName",
        "lastName",
        "gender",
        "level",
        "sessionId",
        "location",
        "userAgent",
        "song",
        "artist",
        "length",
        "ts",
    ];
}

/// Accepts `"39"`, `39` and `null` for identifiers the log writes inconsistently.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(value)) => value,
        Some(Raw::Int(value)) => value.to_string(),
        Some(Raw::Float(value)) => value.to_string(),
        None => String::new(),
    })
}
