//! Time dimension.
//!
//! Epoch-millisecond timestamps are truncated to whole seconds (integer
//! division toward zero) and decomposed in UTC. The same conversion feeds the
//! song-play partition columns, so a fact row's `(year, month)` always agrees
//! with the time dimension row of its timestamp.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Timelike, Utc};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};
use songplay_model::{RawActivityRecord, TimeRow};

use crate::error::{Result, TransformError};

/// Converts epoch milliseconds to a UTC instant at second precision.
pub fn to_instant(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts / 1000, 0).ok_or(TransformError::TimestampOutOfRange { ts })
}

/// Expands one timestamp into its calendar attributes.
pub fn decompose_timestamp(ts: i64) -> Result<TimeRow> {
    let instant = to_instant(ts)?;
    Ok(TimeRow {
        ts,
        start_time: instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        year: instant.year(),
        month: instant.month() as i32,
        day_of_month: instant.day() as i32,
        day_of_week: instant.weekday().number_from_sunday() as i32,
        week: instant.iso_week().week() as i32,
        hour: instant.hour() as i32,
    })
}

/// `(year, month)` of a timestamp, as used for partitioning.
pub fn year_month(ts: i64) -> Result<(i32, i32)> {
    let instant = to_instant(ts)?;
    Ok((instant.year(), instant.month() as i32))
}

/// One row per distinct timestamp in the filtered plays, ordered by timestamp.
pub fn build_time(plays: &[RawActivityRecord]) -> Result<Vec<TimeRow>> {
    let distinct: BTreeSet<i64> = plays.iter().map(|record| record.ts).collect();
    distinct
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(decompose_timestamp)
        .collect()
}
