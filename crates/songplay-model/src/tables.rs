//! Rows of the five output tables.

use serde::{Deserialize, Serialize};

/// Song dimension row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub song_id: String,
    pub title: Option<String>,
    pub artist_id: String,
    pub year: Option<i32>,
    pub duration: Option<f64>,
}

/// Artist dimension row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// User dimension row: the most recent known profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// Time dimension row, one per distinct activity timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRow {
    /// Source timestamp in epoch milliseconds.
    pub ts: i64,
    /// `yyyy-MM-dd HH:mm:ss` in UTC, sub-second precision dropped.
    pub start_time: String,
    pub year: i32,
    pub month: i32,
    pub day_of_month: i32,
    /// 1 = Sunday ... 7 = Saturday.
    pub day_of_week: i32,
    /// ISO-8601 week of year.
    pub week: i32,
    pub hour: i32,
}

/// Song-play fact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPlay {
    /// Opaque surrogate id; unique within a run, carries no ordering.
    pub songplay_id: i64,
    pub ts: i64,
    pub user_id: String,
    pub level: Option<String>,
    pub song_id: String,
    pub artist_id: String,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub year: i32,
    pub month: i32,
}
