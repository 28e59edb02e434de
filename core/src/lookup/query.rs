//! Point queries over a built lookup.
//!
//! Interval lists per ability are small (tens to low hundreds), so a linear
//! scan is fine. If that ever changes, a per-target binary search must give
//! identical answers.

use super::BuffLookupData;

/// Was the effect active on the given target at `at`? End-exclusive: an
/// effect removed at time T is not active at T. An ability absent from the
/// lookup is simply not active.
pub fn is_buff_active_on_target(
    lookup: &BuffLookupData,
    ability_game_id: i64,
    at: i64,
    target_id: i64,
) -> bool {
    lookup
        .intervals_for(ability_game_id)
        .iter()
        .any(|iv| iv.target_id == target_id && iv.contains(at))
}

/// Was the effect active on any target at `at`?
pub fn is_buff_active(lookup: &BuffLookupData, ability_game_id: i64, at: i64) -> bool {
    lookup
        .intervals_for(ability_game_id)
        .iter()
        .any(|iv| iv.contains(at))
}

/// Stack level of the effect on the given target at `at`, or 0 when the
/// effect is not active (or carries no stack timeline covering `at`).
pub fn stack_level_at(
    lookup: &BuffLookupData,
    ability_game_id: i64,
    at: i64,
    target_id: i64,
) -> u32 {
    lookup
        .stack_intervals_for(ability_game_id)
        .iter()
        .find(|iv| iv.target_id == target_id && iv.contains(at))
        .map(|iv| iv.level)
        .unwrap_or(0)
}
