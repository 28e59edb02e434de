//! Interval construction from a fight's event stream.

use hashbrown::HashMap;

use crate::combat_log::{BuffEvent, BuffEventType};

use super::{BuffInterval, BuffLookupData, StackInterval};

/// Open-interval state for one (ability, target) key.
#[derive(Debug, Clone, Copy)]
struct OpenBuff {
    start: i64,
    source_id: Option<i64>,
    /// Stack level currently active.
    level: u32,
    /// When the current stack level began.
    level_start: i64,
}

/// Build the interval lookup for one fight.
///
/// Events must already be in timestamp order (precondition; out-of-order
/// input produces undefined interval boundaries). All recorded boundaries
/// are clamped into `[fight_start, fight_end]`. Events missing a target or
/// ability id are skipped, never an error — the builder degrades to the
/// best-effort lookup over well-formed events.
///
/// Interval semantics, per event type:
/// - apply: opens an interval if none is open for the key, otherwise a no-op
///   (duplicate apply / missed remove)
/// - refresh: boundary-neutral; only a changed stack count matters
/// - remove/fade: closes the open interval; no-op when none is open
/// - removebuffstack: lowers the stack level, does NOT end the effect
/// - end of stream: still-open intervals close at `fight_end` (an effect
///   active when the fight ends is credited through the fight's end)
pub fn build_lookup(events: &[BuffEvent], fight_start: i64, fight_end: i64) -> BuffLookupData {
    let mut open: HashMap<(i64, i64), OpenBuff> = HashMap::new();
    let mut intervals: HashMap<String, Vec<BuffInterval>> = HashMap::new();
    let mut stack_intervals: HashMap<String, Vec<StackInterval>> = HashMap::new();
    let mut skipped = 0usize;

    let clamp = |ts: i64| ts.clamp(fight_start, fight_end);

    for event in events {
        let (Some(ability_id), Some(target_id)) = (event.ability_game_id, event.target_id) else {
            skipped += 1;
            continue;
        };
        let key = (ability_id, target_id);
        let ts = clamp(event.timestamp);

        match event.event_type {
            BuffEventType::Apply | BuffEventType::ApplyStack => {
                match open.get_mut(&key) {
                    Some(state) => {
                        // Already open: the apply itself is idempotent, but a
                        // stack change still advances the level timeline.
                        let new_level = match event.event_type {
                            BuffEventType::ApplyStack => event.stacks.unwrap_or(state.level + 1),
                            _ => event.stacks.unwrap_or(state.level),
                        };
                        if new_level != state.level {
                            push_stack(&mut stack_intervals, ability_id, target_id, state, ts);
                            state.level = new_level;
                            state.level_start = ts;
                        }
                    }
                    None => {
                        open.insert(
                            key,
                            OpenBuff {
                                start: ts,
                                source_id: event.source_id,
                                level: event.stacks.unwrap_or(1),
                                level_start: ts,
                            },
                        );
                    }
                }
            }
            BuffEventType::Refresh => {
                // Refresh extends duration in-game but the modeled
                // active/inactive state is unchanged. A carried stack count
                // that differs is a sub-interval boundary.
                if let Some(state) = open.get_mut(&key)
                    && let Some(stacks) = event.stacks
                    && stacks != state.level
                {
                    push_stack(&mut stack_intervals, ability_id, target_id, state, ts);
                    state.level = stacks;
                    state.level_start = ts;
                }
            }
            BuffEventType::RemoveStack => {
                if let Some(state) = open.get_mut(&key) {
                    let new_level = event
                        .stacks
                        .unwrap_or_else(|| state.level.saturating_sub(1))
                        .max(1);
                    if new_level != state.level {
                        push_stack(&mut stack_intervals, ability_id, target_id, state, ts);
                        state.level = new_level;
                        state.level_start = ts;
                    }
                }
            }
            BuffEventType::Remove | BuffEventType::Fade => {
                if let Some(state) = open.remove(&key) {
                    push_stack(&mut stack_intervals, ability_id, target_id, &state, ts);
                    intervals
                        .entry(ability_id.to_string())
                        .or_default()
                        .push(BuffInterval {
                            target_id,
                            source_id: state.source_id,
                            start: state.start,
                            end: ts,
                        });
                }
                // No open interval: malformed log, nothing to close.
            }
        }
    }

    // Effects still active when the fight ends are credited through fight_end.
    for ((ability_id, target_id), state) in open {
        push_stack(&mut stack_intervals, ability_id, target_id, &state, fight_end);
        intervals
            .entry(ability_id.to_string())
            .or_default()
            .push(BuffInterval {
                target_id,
                source_id: state.source_id,
                start: state.start,
                end: fight_end,
            });
    }

    for list in intervals.values_mut() {
        list.sort_by_key(|iv| iv.start);
    }
    for list in stack_intervals.values_mut() {
        list.sort_by_key(|iv| iv.start);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "dropped malformed buff events during build");
    }

    BuffLookupData {
        intervals,
        stack_intervals,
        skipped_events: skipped,
    }
}

/// Close the current stack-level sub-interval at `end`.
fn push_stack(
    stack_intervals: &mut HashMap<String, Vec<StackInterval>>,
    ability_id: i64,
    target_id: i64,
    state: &OpenBuff,
    end: i64,
) {
    stack_intervals
        .entry(ability_id.to_string())
        .or_default()
        .push(StackInterval {
            target_id,
            level: state.level,
            start: state.level_start,
            end,
        });
}
