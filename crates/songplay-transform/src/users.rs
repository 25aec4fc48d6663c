//! User dimension: latest known profile per user.

use std::collections::BTreeMap;

use songplay_model::{RawActivityRecord, User};

/// Resolves one row per distinct user id from the filtered plays.
///
/// The record with the greatest timestamp is the user's current profile.
/// When several records share that timestamp, the earliest one in input
/// order wins. Rows are returned ordered by user id.
pub fn build_users(plays: &[RawActivityRecord]) -> Vec<User> {
    let mut latest: BTreeMap<&str, &RawActivityRecord> = BTreeMap::new();
    for record in plays {
        latest
            .entry(record.user_id.as_str())
            .and_modify(|current| {
                if record.ts > current.ts {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    latest
        .into_values()
        .map(|record| User {
            user_id: record.user_id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            gender: record.gender.clone(),
            level: record.level.clone(),
        })
        .collect()
}
