//! Song-play fact table.
//!
//! Plays are matched against the raw catalog with an inner join on
//! `song == title`, `length == duration` and `artist == artist_name`. The
//! duration comparison is exact floating-point equality (signed zeros are
//! equal); a play that differs by any amount does not match. Plays without a
//! match are dropped, and a play matching several catalog records yields one
//! fact row per match.

use std::collections::HashMap;

use rayon::prelude::{
    IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator, ParallelSlice,
};
use songplay_model::{RawActivityRecord, RawCatalogRecord, SongPlay};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::keys::float_key;
use crate::surrogate::{DEFAULT_PARTITION_ROWS, max_partition_rows, partition_offset_id};
use crate::time::year_month;

#[derive(Debug, PartialEq, Eq, Hash)]
struct JoinKey<'a> {
    title: &'a str,
    duration: u64,
    artist_name: &'a str,
}

impl<'a> JoinKey<'a> {
    /// `None` when any key field is null; nulls never compare equal.
    fn of_catalog(record: &'a RawCatalogRecord) -> Option<Self> {
        Some(Self {
            title: record.title.as_deref()?,
            duration: float_key(record.duration?),
            artist_name: record.artist_name.as_deref()?,
        })
    }

    fn of_play(record: &'a RawActivityRecord) -> Option<Self> {
        Some(Self {
            title: record.song.as_deref()?,
            duration: float_key(record.length?),
            artist_name: record.artist.as_deref()?,
        })
    }
}

/// Hash index of catalog records by join key.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    records: &'a [RawCatalogRecord],
    entries: HashMap<JoinKey<'a>, Vec<usize>>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(records: &'a [RawCatalogRecord]) -> Self {
        let mut entries: HashMap<JoinKey<'a>, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            if let Some(key) = JoinKey::of_catalog(record) {
                entries.entry(key).or_default().push(idx);
            }
        }
        Self { records, entries }
    }

    /// Number of distinct join keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog records matching `play`, in catalog order.
    pub fn matches<'s>(
        &'s self,
        play: &'s RawActivityRecord,
    ) -> impl Iterator<Item = &'a RawCatalogRecord> + 's {
        let entries: &'s HashMap<JoinKey<'s>, Vec<usize>> = &self.entries;
        let records = self.records;
        JoinKey::of_play(play)
            .and_then(|key| entries.get(&key))
            .into_iter()
            .flatten()
            .map(move |&idx| &records[idx])
    }

    pub fn contains(&self, play: &RawActivityRecord) -> bool {
        self.matches(play).next().is_some()
    }
}

/// Fact rows plus join accounting.
#[derive(Debug, Clone, Default)]
pub struct FactOutput {
    pub rows: Vec<SongPlay>,
    /// Plays with at least one catalog match.
    pub matched_plays: usize,
    /// Plays dropped by the inner join.
    pub unmatched_plays: usize,
}

/// Builds the song-play fact table with the default partition size.
pub fn build_songplays(
    plays: &[RawActivityRecord],
    catalog: &[RawCatalogRecord],
) -> Result<FactOutput> {
    build_songplays_partitioned(plays, catalog, DEFAULT_PARTITION_ROWS)
}

/// Builds the song-play fact table, assigning surrogate ids per partition of
/// `partition_rows` joined rows.
///
/// `partition_rows` is clamped to `1..=max_partition_rows()`.
pub fn build_songplays_partitioned(
    plays: &[RawActivityRecord],
    catalog: &[RawCatalogRecord],
    partition_rows: usize,
) -> Result<FactOutput> {
    let partition_rows = partition_rows.clamp(1, max_partition_rows());
    let index = CatalogIndex::new(catalog);

    let matched_plays = plays
        .par_iter()
        .filter(|play| index.contains(play))
        .count();

    let joined: Vec<(&RawActivityRecord, &RawCatalogRecord)> = plays
        .par_iter()
        .flat_map_iter(|play| index.matches(play).map(move |song| (play, song)))
        .collect();

    let rows = joined
        .par_chunks(partition_rows)
        .enumerate()
        .flat_map_iter(|(partition, chunk)| {
            chunk.iter().enumerate().map(move |(offset, (play, song))| {
                let songplay_id = partition_offset_id(partition, offset)
                    .ok_or(TransformError::SurrogateOverflow { partition, offset })?;
                fact_row(songplay_id, play, song)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let unmatched_plays = plays.len() - matched_plays;
    debug!(
        catalog_keys = index.len(),
        matched_plays,
        unmatched_plays,
        fact_rows = rows.len(),
        "song plays joined"
    );

    Ok(FactOutput {
        rows,
        matched_plays,
        unmatched_plays,
    })
}

fn fact_row(
    songplay_id: i64,
    play: &RawActivityRecord,
    song: &RawCatalogRecord,
) -> Result<SongPlay> {
    let (year, month) = year_month(play.ts)?;
    Ok(SongPlay {
        songplay_id,
        ts: play.ts,
        user_id: play.user_id.clone(),
        level: play.level.clone(),
        song_id: song.song_id.clone(),
        artist_id: song.artist_id.clone(),
        session_id: play.session_id,
        location: play.location.clone(),
        user_agent: play.user_agent.clone(),
        year,
        month,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn song(song_id: &str, title: &str, artist: &str, duration: f64) -> RawCatalogRecord {
        RawCatalogRecord {
            song_id: song_id.to_string(),
            title: Some(title.to_string()),
            duration: Some(duration),
            artist_id: format!("{song_id}-artist"),
            artist_name: Some(artist.to_string()),
            artist_location: None,
            artist_latitude: None,
            artist_longitude: None,
            year: Some(2000),
        }
    }

    fn play(title: Option<&str>, artist: Option<&str>, length: Option<f64>) -> RawActivityRecord {
        RawActivityRecord {
            page: Some("NextSong".to_string()),
            user_id: "26".to_string(),
            first_name: None,
            last_name: None,
            gender: None,
            level: Some("free".to_string()),
            session_id: Some(583),
            location: Some("San Jose-Sunnyvale-Santa Clara, CA".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            song: title.map(str::to_string),
            artist: artist.map(str::to_string),
            length,
            ts: 1_542_241_826_796,
        }
    }

    #[test]
    fn exact_match_produces_fact_row() {
        let catalog = vec![song("S1", "Test Song", "Test Artist", 210.5)];
        let plays = vec![play(Some("Test Song"), Some("Test Artist"), Some(210.5))];

        let out = build_songplays(&plays, &catalog).unwrap();

        assert_eq!(out.rows.len(), 1);
        let row = &out.rows[0];
        assert_eq!(row.song_id, "S1");
        assert_eq!(row.artist_id, "S1-artist");
        assert_eq!(row.user_id, "26");
        assert_eq!(row.session_id, Some(583));
        assert_eq!((row.year, row.month), (2018, 11));
        assert_eq!(out.matched_plays, 1);
        assert_eq!(out.unmatched_plays, 0);
    }

    #[test]
    fn near_duration_does_not_match() {
        let catalog = vec![song("S1", "Test Song", "Test Artist", 210.5)];
        let plays = vec![play(Some("Test Song"), Some("Test Artist"), Some(210.500001))];

        let out = build_songplays(&plays, &catalog).unwrap();

        assert!(out.rows.is_empty());
        assert_eq!(out.unmatched_plays, 1);
    }

    #[test]
    fn any_differing_key_field_drops_the_play() {
        let catalog = vec![song("S1", "Test Song", "Test Artist", 210.5)];
        let plays = vec![
            play(Some("Other Song"), Some("Test Artist"), Some(210.5)),
            play(Some("Test Song"), Some("Other Artist"), Some(210.5)),
            play(Some("test song"), Some("Test Artist"), Some(210.5)),
        ];

        let out = build_songplays(&plays, &catalog).unwrap();

        assert!(out.rows.is_empty());
        assert_eq!(out.unmatched_plays, 3);
    }

    #[test]
    fn null_key_fields_never_match() {
        let mut untitled = song("S1", "x", "Test Artist", 210.5);
        untitled.title = None;
        let catalog = vec![untitled];
        let plays = vec![
            play(None, Some("Test Artist"), Some(210.5)),
            play(Some("x"), Some("Test Artist"), None),
        ];

        let out = build_songplays(&plays, &catalog).unwrap();
        assert!(out.rows.is_empty());
    }

    #[test]
    fn duplicate_catalog_entries_multiply_rows() {
        let catalog = vec![
            song("S1", "Test Song", "Test Artist", 210.5),
            song("S2", "Test Song", "Test Artist", 210.5),
        ];
        let plays = vec![play(Some("Test Song"), Some("Test Artist"), Some(210.5))];

        let out = build_songplays(&plays, &catalog).unwrap();

        let ids: Vec<_> = out.rows.iter().map(|r| r.song_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert_eq!(out.matched_plays, 1);
    }

    #[test]
    fn surrogate_ids_unique_across_partitions() {
        let catalog = vec![song("S1", "Test Song", "Test Artist", 210.5)];
        let plays: Vec<_> = (0..10)
            .map(|_| play(Some("Test Song"), Some("Test Artist"), Some(210.5)))
            .collect();

        let out = build_songplays_partitioned(&plays, &catalog, 3).unwrap();

        let ids: HashSet<_> = out.rows.iter().map(|r| r.songplay_id).collect();
        assert_eq!(ids.len(), 10);
        assert!(ids.contains(&partition_offset_id(3, 0).unwrap()));
    }

    #[test]
    fn oversized_partition_is_clamped() {
        let catalog = vec![song("S1", "Test Song", "Test Artist", 210.5)];
        let plays: Vec<_> = (0..4)
            .map(|_| play(Some("Test Song"), Some("Test Artist"), Some(210.5)))
            .collect();

        let out = build_songplays_partitioned(&plays, &catalog, usize::MAX).unwrap();

        let mut ids: Vec<_> = out.rows.iter().map(|r| r.songplay_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
