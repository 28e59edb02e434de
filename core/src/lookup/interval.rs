use hashbrown::HashMap;

/// One span during which an effect was active on a target.
///
/// `start` is inclusive, `end` exclusive, both clamped into the owning
/// fight's bounds. Zero-length intervals are valid (instantaneous effects)
/// and contribute no duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuffInterval {
    pub target_id: i64,
    pub source_id: Option<i64>,
    pub start: i64,
    pub end: i64,
}

impl BuffInterval {
    /// Overlap with `[window_start, window_end)` in milliseconds, zero if
    /// disjoint.
    pub fn clipped_duration(&self, window_start: i64, window_end: i64) -> i64 {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (end - start).max(0)
    }

    /// End-exclusive containment check.
    pub fn contains(&self, at: i64) -> bool {
        self.start <= at && at < self.end
    }
}

/// One span during which an effect sat at exactly `level` stacks on a target.
///
/// For a given (effect, target) the stack intervals are non-overlapping and
/// collectively cover the same span as the plain interval(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackInterval {
    pub target_id: i64,
    pub level: u32,
    pub start: i64,
    pub end: i64,
}

impl StackInterval {
    pub fn clipped_duration(&self, window_start: i64, window_end: i64) -> i64 {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (end - start).max(0)
    }

    pub fn contains(&self, at: i64) -> bool {
        self.start <= at && at < self.end
    }
}

/// Normalized interval data for exactly one fight.
///
/// Keys are the string form of `abilityGameID` (the shape the serialized
/// lookup uses on the wire). Interval lists are ordered by ascending start;
/// consumers treat them as sets beyond that. Immutable after construction —
/// the cache owns each instance and hands out shared references only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuffLookupData {
    pub(crate) intervals: HashMap<String, Vec<BuffInterval>>,
    pub(crate) stack_intervals: HashMap<String, Vec<StackInterval>>,
    /// Events dropped for missing target/ability (malformed-log diagnostic).
    pub(crate) skipped_events: usize,
}

impl BuffLookupData {
    /// Intervals for an ability, empty slice if the ability never appeared.
    pub fn intervals_for(&self, ability_game_id: i64) -> &[BuffInterval] {
        self.intervals
            .get(ability_game_id.to_string().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stack-level sub-intervals for an ability, empty slice if none.
    pub fn stack_intervals_for(&self, ability_game_id: i64) -> &[StackInterval] {
        self.stack_intervals
            .get(ability_game_id.to_string().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if a stacking timeline was recorded for the ability.
    pub fn has_stack_data(&self, ability_game_id: i64) -> bool {
        !self.stack_intervals_for(ability_game_id).is_empty()
    }

    /// All ability ids present in the lookup.
    pub fn ability_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.intervals.keys().filter_map(|k| k.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Count of events the builder dropped as malformed.
    pub fn skipped_event_count(&self) -> usize {
        self.skipped_events
    }
}
