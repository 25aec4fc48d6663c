//! Song and Artist dimensions.

use std::collections::HashSet;

use songplay_model::{Artist, RawCatalogRecord, Song};
use tracing::debug;

use crate::keys::optional_float_key;

/// Dimensions derived from the catalog feed.
#[derive(Debug, Clone, Default)]
pub struct CatalogDimensions {
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
    /// Distinct artist tuples dropped because their artist id was already taken.
    pub conflicting_artists: usize,
}

#[derive(PartialEq, Eq, Hash)]
struct SongKey<'a> {
    song_id: &'a str,
    title: Option<&'a str>,
    artist_id: &'a str,
    year: Option<i32>,
    duration: Option<u64>,
}

impl<'a> SongKey<'a> {
    fn of(record: &'a RawCatalogRecord) -> Self {
        Self {
            song_id: &record.song_id,
            title: record.title.as_deref(),
            artist_id: &record.artist_id,
            year: record.year,
            duration: optional_float_key(record.duration),
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
struct ArtistKey<'a> {
    artist_id: &'a str,
    name: Option<&'a str>,
    location: Option<&'a str>,
    latitude: Option<u64>,
    longitude: Option<u64>,
}

impl<'a> ArtistKey<'a> {
    fn of(record: &'a RawCatalogRecord) -> Self {
        Self {
            artist_id: &record.artist_id,
            name: record.artist_name.as_deref(),
            location: record.artist_location.as_deref(),
            latitude: optional_float_key(record.artist_latitude),
            longitude: optional_float_key(record.artist_longitude),
        }
    }
}

/// Projects and deduplicates songs on the full
/// `(song_id, title, artist_id, year, duration)` tuple.
///
/// A song id that appears with different attributes yields one row per
/// distinct tuple. Rows keep first-seen order.
pub fn build_songs(records: &[RawCatalogRecord]) -> Vec<Song> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut songs = Vec::new();
    for record in records {
        if seen.insert(SongKey::of(record)) {
            songs.push(Song {
                song_id: record.song_id.clone(),
                title: record.title.clone(),
                artist_id: record.artist_id.clone(),
                year: record.year,
                duration: record.duration,
            });
        }
    }
    songs
}

/// Projects artists and keeps exactly one row per artist id.
///
/// Identical tuples collapse first; if an artist id still carries more than
/// one distinct tuple, the first-seen tuple wins.
pub fn build_artists(records: &[RawCatalogRecord]) -> (Vec<Artist>, usize) {
    let mut tuples = HashSet::with_capacity(records.len());
    let mut ids = HashSet::with_capacity(records.len());
    let mut artists = Vec::new();
    let mut conflicting = 0usize;
    for record in records {
        if !tuples.insert(ArtistKey::of(record)) {
            continue;
        }
        if !ids.insert(record.artist_id.as_str()) {
            conflicting += 1;
            continue;
        }
        artists.push(Artist {
            artist_id: record.artist_id.clone(),
            name: record.artist_name.clone(),
            location: record.artist_location.clone(),
            latitude: record.artist_latitude,
            longitude: record.artist_longitude,
        });
    }
    (artists, conflicting)
}

/// Builds both catalog dimensions.
pub fn build_catalog_dimensions(records: &[RawCatalogRecord]) -> CatalogDimensions {
    let songs = build_songs(records);
    let (artists, conflicting_artists) = build_artists(records);
    if conflicting_artists > 0 {
        debug!(
            conflicting_artists,
            "artist ids with conflicting attributes kept their first-seen row"
        );
    }
    CatalogDimensions {
        songs,
        artists,
        conflicting_artists,
    }
}
