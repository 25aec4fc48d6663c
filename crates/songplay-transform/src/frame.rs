//! Row to DataFrame conversion.
//!
//! Column order and dtypes follow [`songplay_model::TableKind::schema`]; the
//! writer validates frames against the same schema before persisting them.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use songplay_model::{Artist, Song, SongPlay, TableKind, TimeRow, User};

use crate::error::{Result, TransformError};

fn utf8<'a>(name: &str, values: impl Iterator<Item = Option<&'a str>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn int32(name: &str, values: impl Iterator<Item = Option<i32>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn int64(name: &str, values: impl Iterator<Item = Option<i64>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn float64(name: &str, values: impl Iterator<Item = Option<f64>>) -> Column {
    Series::new(name.into(), values.collect::<Vec<_>>()).into_column()
}

fn frame(table: TableKind, columns: Vec<Column>) -> Result<DataFrame> {
    DataFrame::new(columns).map_err(|source| TransformError::Frame { table, source })
}

pub fn songs_frame(rows: &[Song]) -> Result<DataFrame> {
    frame(
        TableKind::Songs,
        vec![
            utf8("song_id", rows.iter().map(|r| Some(r.song_id.as_str()))),
            utf8("title", rows.iter().map(|r| r.title.as_deref())),
            utf8("artist_id", rows.iter().map(|r| Some(r.artist_id.as_str()))),
            int32("year", rows.iter().map(|r| r.year)),
            float64("duration", rows.iter().map(|r| r.duration)),
        ],
    )
}

pub fn artists_frame(rows: &[Artist]) -> Result<DataFrame> {
    frame(
        TableKind::Artists,
        vec![
            utf8("artist_id", rows.iter().map(|r| Some(r.artist_id.as_str()))),
            utf8("name", rows.iter().map(|r| r.name.as_deref())),
            utf8("location", rows.iter().map(|r| r.location.as_deref())),
            float64("latitude", rows.iter().map(|r| r.latitude)),
            float64("longitude", rows.iter().map(|r| r.longitude)),
        ],
    )
}

pub fn users_frame(rows: &[User]) -> Result<DataFrame> {
    frame(
        TableKind::Users,
        vec![
            utf8("user_id", rows.iter().map(|r| Some(r.user_id.as_str()))),
            utf8("first_name", rows.iter().map(|r| r.first_name.as_deref())),
            utf8("last_name", rows.iter().map(|r| r.last_name.as_deref())),
            utf8("gender", rows.iter().map(|r| r.gender.as_deref())),
            utf8("level", rows.iter().map(|r| r.level.as_deref())),
        ],
    )
}

pub fn time_frame(rows: &[TimeRow]) -> Result<DataFrame> {
    frame(
        TableKind::Time,
        vec![
            int64("ts", rows.iter().map(|r| Some(r.ts))),
            utf8("start_time", rows.iter().map(|r| Some(r.start_time.as_str()))),
            int32("year", rows.iter().map(|r| Some(r.year))),
            int32("month", rows.iter().map(|r| Some(r.month))),
            int32("day_of_month", rows.iter().map(|r| Some(r.day_of_month))),
            int32("day_of_week", rows.iter().map(|r| Some(r.day_of_week))),
            int32("week", rows.iter().map(|r| Some(r.week))),
            int32("hour", rows.iter().map(|r| Some(r.hour))),
        ],
    )
}

pub fn songplays_frame(rows: &[SongPlay]) -> Result<DataFrame> {
    frame(
        TableKind::Songplays,
        vec![
            int64("songplay_id", rows.iter().map(|r| Some(r.songplay_id))),
            int64("ts", rows.iter().map(|r| Some(r.ts))),
            utf8("user_id", rows.iter().map(|r| Some(r.user_id.as_str()))),
            utf8("level", rows.iter().map(|r| r.level.as_deref())),
            utf8("song_id", rows.iter().map(|r| Some(r.song_id.as_str()))),
            utf8("artist_id", rows.iter().map(|r| Some(r.artist_id.as_str()))),
            int64("session_id", rows.iter().map(|r| r.session_id)),
            utf8("location", rows.iter().map(|r| r.location.as_deref())),
            utf8("user_agent", rows.iter().map(|r| r.user_agent.as_deref())),
            int32("year", rows.iter().map(|r| Some(r.year))),
            int32("month", rows.iter().map(|r| Some(r.month))),
        ],
    )
}
