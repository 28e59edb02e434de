use serde::{Deserialize, Serialize};

/// Kind of buff/debuff lifecycle event.
///
/// The log spells these per hostility (`applybuff` / `applydebuff`, ...);
/// the serde aliases accept both so one event model covers both streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuffEventType {
    /// Effect applied to a target. Idempotent for interval purposes: a
    /// duplicate apply while the effect is already open is a no-op.
    #[serde(alias = "applybuff", alias = "applydebuff")]
    Apply,
    /// A further stack applied. Opens the interval if none is open.
    #[serde(alias = "applybuffstack", alias = "applydebuffstack")]
    ApplyStack,
    /// Duration refreshed in-game. Boundary-neutral; only relevant when it
    /// carries a changed stack count.
    #[serde(alias = "refreshbuff", alias = "refreshdebuff")]
    Refresh,
    /// Effect removed from the target. Closes the open interval.
    #[serde(alias = "removebuff", alias = "removedebuff")]
    Remove,
    /// One stack removed. Does NOT end the effect.
    #[serde(alias = "removebuffstack", alias = "removedebuffstack")]
    RemoveStack,
    /// Effect expired naturally. Treated like `Remove`.
    #[serde(alias = "fadebuff", alias = "fadedebuff")]
    Fade,
}

impl BuffEventType {
    /// True for the variants that close an open interval.
    pub fn ends_interval(&self) -> bool {
        matches!(self, BuffEventType::Remove | BuffEventType::Fade)
    }
}

/// One buff/debuff event from a fight's stream.
///
/// Timestamps are absolute milliseconds, non-decreasing within one fight's
/// stream (a precondition of the builder, not enforced here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffEvent {
    #[serde(rename = "type")]
    pub event_type: BuffEventType,
    pub timestamp: i64,
    #[serde(rename = "sourceID", default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    #[serde(rename = "targetID", default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    #[serde(
        rename = "abilityGameID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ability_game_id: Option<i64>,
    #[serde(
        rename = "stack",
        alias = "stacks",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stacks: Option<u32>,
}

impl BuffEvent {
    pub fn new(event_type: BuffEventType, timestamp: i64, ability: i64, target: i64) -> Self {
        Self {
            event_type,
            timestamp,
            source_id: None,
            target_id: Some(target),
            ability_game_id: Some(ability),
            stacks: None,
        }
    }

    pub fn with_source(mut self, source: i64) -> Self {
        self.source_id = Some(source);
        self
    }

    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = Some(stacks);
        self
    }
}
