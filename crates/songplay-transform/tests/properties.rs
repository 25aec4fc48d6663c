//! Property tests for the table builders.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use proptest::prelude::*;
use songplay_model::{RawActivityRecord, RawCatalogRecord};
use songplay_transform::{
    build_artists, build_songplays_partitioned, build_songs, build_time, build_users,
    decompose_timestamp, filter_plays,
};

const BASE_TS: i64 = 1_541_000_000_000;
const TEN_DAYS_MS: i64 = 10 * 86_400_000;

fn catalog_record() -> impl Strategy<Value = RawCatalogRecord> {
    (
        prop::sample::select(vec!["S1", "S2", "S3"]),
        prop::option::of(prop::sample::select(vec!["Song A", "Song B"])),
        prop::option::of(prop::sample::select(vec![180.0f64, 210.5, 0.0, -0.0])),
        prop::sample::select(vec!["A1", "A2"]),
        prop::option::of(prop::sample::select(vec!["Artist X", "Artist Y"])),
        prop::option::of(prop::sample::select(vec![1999i32, 2000])),
        prop::option::of(prop::sample::select(vec![35.1f64, -120.5])),
    )
        .prop_map(
            |(song_id, title, duration, artist_id, artist_name, year, latitude)| {
                RawCatalogRecord {
                    song_id: song_id.to_string(),
                    title: title.map(str::to_string),
                    duration,
                    artist_id: artist_id.to_string(),
                    artist_name: artist_name.map(str::to_string),
                    artist_location: None,
                    artist_latitude: latitude,
                    artist_longitude: None,
                    year,
                }
            },
        )
}

fn activity_record() -> impl Strategy<Value = RawActivityRecord> {
    (
        prop::sample::select(vec!["NextSong", "Home", "Logout"]),
        prop::sample::select(vec!["1", "2", "3"]),
        prop::sample::select(vec!["free", "paid"]),
        prop::option::of(prop::sample::select(vec!["Song A", "Song B"])),
        prop::option::of(prop::sample::select(vec!["Artist X", "Artist Y"])),
        prop::option::of(prop::sample::select(vec![180.0f64, 210.5, 0.0])),
        0i64..8,
        0i64..3,
    )
        .prop_map(
            |(page, user_id, level, song, artist, length, step, session)| RawActivityRecord {
                page: Some(page.to_string()),
                user_id: user_id.to_string(),
                first_name: None,
                last_name: None,
                gender: None,
                level: Some(level.to_string()),
                session_id: Some(session),
                location: None,
                user_agent: None,
                song: song.map(str::to_string),
                artist: artist.map(str::to_string),
                length,
                ts: BASE_TS + step * TEN_DAYS_MS,
            },
        )
}

fn matches(play: &RawActivityRecord, song: &RawCatalogRecord) -> bool {
    let same_title = play.song.is_some() && play.song == song.title;
    let same_artist = play.artist.is_some() && play.artist == song.artist_name;
    let same_duration = match (play.length, song.duration) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    same_title && same_artist && same_duration
}

proptest! {
    #[test]
    fn songs_and_artists_are_distinct(catalog in prop::collection::vec(catalog_record(), 0..40)) {
        let songs = build_songs(&catalog);
        let song_keys: HashSet<_> = songs
            .iter()
            .map(|s| (s.song_id.clone(), s.title.clone(), s.artist_id.clone(), s.year, s.duration.map(|d| d + 0.0).map(f64::to_bits)))
            .collect();
        prop_assert_eq!(song_keys.len(), songs.len());
        let input_keys: HashSet<_> = catalog
            .iter()
            .map(|s| (s.song_id.clone(), s.title.clone(), s.artist_id.clone(), s.year, s.duration.map(|d| d + 0.0).map(f64::to_bits)))
            .collect();
        prop_assert_eq!(&song_keys, &input_keys);

        let (artists, _) = build_artists(&catalog);
        let artist_ids: BTreeSet<_> = artists.iter().map(|a| a.artist_id.clone()).collect();
        prop_assert_eq!(artist_ids.len(), artists.len());
        let input_ids: BTreeSet<_> = catalog.iter().map(|r| r.artist_id.clone()).collect();
        prop_assert_eq!(artist_ids, input_ids);
    }

    #[test]
    fn users_reflect_latest_play(activity in prop::collection::vec(activity_record(), 0..60)) {
        let plays = filter_plays(&activity, "NextSong");
        let users = build_users(&plays);

        let mut expected: BTreeMap<&str, &RawActivityRecord> = BTreeMap::new();
        for play in &plays {
            let best = expected.entry(play.user_id.as_str()).or_insert(play);
            if play.ts > best.ts {
                *best = play;
            }
        }

        prop_assert_eq!(users.len(), expected.len());
        for user in &users {
            let latest = expected[user.user_id.as_str()];
            prop_assert_eq!(&user.level, &latest.level);
        }
    }

    #[test]
    fn time_covers_exactly_the_play_timestamps(activity in prop::collection::vec(activity_record(), 0..60)) {
        let plays = filter_plays(&activity, "NextSong");
        let time = build_time(&plays).unwrap();

        let expected: BTreeSet<i64> = plays.iter().map(|p| p.ts).collect();
        let actual: BTreeSet<i64> = time.iter().map(|t| t.ts).collect();
        prop_assert_eq!(time.len(), actual.len());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn facts_are_exact_matches_with_consistent_partitions(
        catalog in prop::collection::vec(catalog_record(), 0..20),
        activity in prop::collection::vec(activity_record(), 0..40),
        partition_rows in 1usize..8,
    ) {
        let plays = filter_plays(&activity, "NextSong");
        let out = build_songplays_partitioned(&plays, &catalog, partition_rows).unwrap();

        let expected_rows: usize = plays
            .iter()
            .map(|p| catalog.iter().filter(|s| matches(p, s)).count())
            .sum();
        prop_assert_eq!(out.rows.len(), expected_rows);

        let unmatched = plays.iter().filter(|p| !catalog.iter().any(|s| matches(p, s))).count();
        prop_assert_eq!(out.unmatched_plays, unmatched);

        for row in &out.rows {
            let backed = plays.iter().any(|p| {
                p.ts == row.ts
                    && p.user_id == row.user_id
                    && catalog
                        .iter()
                        .any(|s| s.song_id == row.song_id && s.artist_id == row.artist_id && matches(p, s))
            });
            prop_assert!(backed);

            let time = decompose_timestamp(row.ts).unwrap();
            prop_assert_eq!((row.year, row.month), (time.year, time.month));
        }

        let ids: HashSet<i64> = out.rows.iter().map(|r| r.songplay_id).collect();
        prop_assert_eq!(ids.len(), out.rows.len());
    }
}
