//! Activity filter.

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use songplay_model::RawActivityRecord;

/// Keeps only the records whose page equals `play_action`, in input order.
///
/// Every other action (navigation, login, settings) is dropped silently, as
/// are records without a page.
pub fn filter_plays(records: &[RawActivityRecord], play_action: &str) -> Vec<RawActivityRecord> {
    records
        .par_iter()
        .filter(|record| record.page.as_deref() == Some(play_action))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page: Option<&str>, ts: i64) -> RawActivityRecord {
        RawActivityRecord {
            page: page.map(str::to_string),
            user_id: "1".to_string(),
            first_name: None,
            last_name: None,
            gender: None,
            level: None,
            session_id: None,
            location: None,
            user_agent: None,
            song: None,
            artist: None,
            length: None,
            ts,
        }
    }

    #[test]
    fn keeps_only_plays_in_order() {
        let records = vec![
            record(Some("NextSong"), 3),
            record(Some("Home"), 1),
            record(None, 5),
            record(Some("NextSong"), 2),
            record(Some("nextsong"), 4),
        ];

        let plays = filter_plays(&records, "NextSong");

        let ts: Vec<_> = plays.iter().map(|r| r.ts).collect();
        assert_eq!(ts, vec![3, 2]);
    }

    #[test]
    fn custom_play_action() {
        let records = vec![record(Some("PlaySong"), 1), record(Some("NextSong"), 2)];
        let plays = filter_plays(&records, "PlaySong");
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].ts, 1);
    }
}
