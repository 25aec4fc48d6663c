//! The full star schema in one call.
//!
//! The catalog path and the three activity paths share no state, so they run
//! as parallel rayon tasks. Only the fact builder reads both feeds.

use std::time::Instant;

use polars::prelude::DataFrame;
use songplay_model::{
    Artist, RawActivityRecord, RawCatalogRecord, Song, SongPlay, TableKind, TimeRow, User,
};
use tracing::{debug, info, info_span};

use crate::activity::filter_plays;
use crate::catalog::{CatalogDimensions, build_catalog_dimensions};
use crate::error::Result;
use crate::frame::{artists_frame, songplays_frame, songs_frame, time_frame, users_frame};
use crate::songplays::{FactOutput, build_songplays};
use crate::time::build_time;
use crate::users::build_users;

/// Record accounting for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub catalog_records: usize,
    pub activity_records: usize,
    /// Activity records kept by the play filter.
    pub plays: usize,
    /// Plays dropped because no catalog record matched.
    pub unmatched_plays: usize,
    /// Artist tuples dropped because their id was already taken.
    pub conflicting_artists: usize,
}

impl BuildStats {
    /// Activity records dropped by the play filter.
    pub fn non_play_records(&self) -> usize {
        self.activity_records - self.plays
    }
}

/// All five tables of one run.
#[derive(Debug, Clone, Default)]
pub struct StarSchema {
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
    pub users: Vec<User>,
    pub time: Vec<TimeRow>,
    pub songplays: Vec<SongPlay>,
    pub stats: BuildStats,
}

impl StarSchema {
    pub fn row_count(&self, table: TableKind) -> usize {
        match table {
            TableKind::Songs => self.songs.len(),
            TableKind::Artists => self.artists.len(),
            TableKind::Users => self.users.len(),
            TableKind::Time => self.time.len(),
            TableKind::Songplays => self.songplays.len(),
        }
    }

    /// The table as a DataFrame laid out per its schema.
    pub fn frame(&self, table: TableKind) -> Result<DataFrame> {
        match table {
            TableKind::Songs => songs_frame(&self.songs),
            TableKind::Artists => artists_frame(&self.artists),
            TableKind::Users => users_frame(&self.users),
            TableKind::Time => time_frame(&self.time),
            TableKind::Songplays => songplays_frame(&self.songplays),
        }
    }
}

fn timed<T>(name: &'static str, build: impl FnOnce() -> T) -> T {
    let span = info_span!("build", table = name);
    span.in_scope(|| {
        let start = Instant::now();
        let out = build();
        debug!(table = name, duration_ms = start.elapsed().as_millis(), "built");
        out
    })
}

/// Derives every table from the raw feeds.
pub fn build_star_schema(
    catalog: &[RawCatalogRecord],
    activity: &[RawActivityRecord],
    play_action: &str,
) -> Result<StarSchema> {
    let start = Instant::now();

    let (dimensions, activity_tables) = rayon::join(
        || timed("catalog", || build_catalog_dimensions(catalog)),
        || {
            let plays = timed("plays", || filter_plays(activity, play_action));
            let (users, (time, facts)) = rayon::join(
                || timed("users", || build_users(&plays)),
                || {
                    rayon::join(
                        || timed("time", || build_time(&plays)),
                        || timed("songplays", || build_songplays(&plays, catalog)),
                    )
                },
            );
            (plays.len(), users, time, facts)
        },
    );

    let CatalogDimensions {
        songs,
        artists,
        conflicting_artists,
    } = dimensions;
    let (plays, users, time, facts) = activity_tables;
    let time = time?;
    let FactOutput {
        rows: songplays,
        unmatched_plays,
        ..
    } = facts?;

    let stats = BuildStats {
        catalog_records: catalog.len(),
        activity_records: activity.len(),
        plays,
        unmatched_plays,
        conflicting_artists,
    };
    info!(
        songs = songs.len(),
        artists = artists.len(),
        users = users.len(),
        time = time.len(),
        songplays = songplays.len(),
        plays,
        unmatched_plays,
        duration_ms = start.elapsed().as_millis(),
        "star schema built"
    );

    Ok(StarSchema {
        songs,
        artists,
        users,
        time,
        songplays,
        stats,
    })
}
