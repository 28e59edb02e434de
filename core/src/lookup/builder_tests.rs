//! Tests for interval construction.
//!
//! Verifies that:
//! - Intervals stay inside the fight bounds
//! - Unclosed effects are credited through the fight's end
//! - Duplicate applies and refreshes are boundary-neutral
//! - Stack-level sub-intervals partition the active span

use crate::combat_log::{BuffEvent, BuffEventType};

use super::build_lookup;

const ABILITY: i64 = 18084;
const TARGET: i64 = 42;
const OTHER_TARGET: i64 = 43;

fn apply(ts: i64) -> BuffEvent {
    BuffEvent::new(BuffEventType::Apply, ts, ABILITY, TARGET)
}

fn remove(ts: i64) -> BuffEvent {
    BuffEvent::new(BuffEventType::Remove, ts, ABILITY, TARGET)
}

#[test]
fn apply_remove_produces_one_interval() {
    let lookup = build_lookup(&[apply(100), remove(200)], 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, 100);
    assert_eq!(intervals[0].end, 200);
    assert_eq!(intervals[0].target_id, TARGET);
}

#[test]
fn all_intervals_stay_within_fight_bounds() {
    // Events strictly outside the window should not occur but are clipped.
    let events = vec![
        BuffEvent::new(BuffEventType::Apply, -50, ABILITY, TARGET),
        BuffEvent::new(BuffEventType::Remove, 1200, ABILITY, TARGET),
        BuffEvent::new(BuffEventType::Apply, 500, ABILITY, OTHER_TARGET),
    ];
    let lookup = build_lookup(&events, 0, 1000);
    for iv in lookup.intervals_for(ABILITY) {
        assert!(0 <= iv.start, "start {} below fight start", iv.start);
        assert!(iv.start <= iv.end);
        assert!(iv.end <= 1000, "end {} past fight end", iv.end);
    }
}

#[test]
fn unclosed_interval_closes_at_fight_end() {
    let lookup = build_lookup(&[apply(300)], 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, 300);
    assert_eq!(intervals[0].end, 1000);
}

#[test]
fn duplicate_apply_is_idempotent() {
    let lookup = build_lookup(&[apply(100), apply(150), remove(200)], 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, 100);
    assert_eq!(intervals[0].end, 200);
}

#[test]
fn refresh_is_boundary_neutral() {
    let without = build_lookup(&[apply(100), remove(200)], 0, 1000);
    let with = build_lookup(
        &[
            apply(100),
            BuffEvent::new(BuffEventType::Refresh, 150, ABILITY, TARGET),
            remove(200),
        ],
        0,
        1000,
    );
    assert_eq!(
        without.intervals_for(ABILITY),
        with.intervals_for(ABILITY)
    );
}

#[test]
fn remove_without_apply_is_a_noop() {
    let lookup = build_lookup(&[remove(200)], 0, 1000);
    assert!(lookup.intervals_for(ABILITY).is_empty());
}

#[test]
fn remove_stack_does_not_end_the_effect() {
    let events = vec![
        apply(100).with_stacks(2),
        BuffEvent::new(BuffEventType::RemoveStack, 150, ABILITY, TARGET).with_stacks(1),
        remove(300),
    ];
    let lookup = build_lookup(&events, 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, 100);
    assert_eq!(intervals[0].end, 300);
}

#[test]
fn malformed_events_are_skipped() {
    let mut missing_target = apply(100);
    missing_target.target_id = None;
    let mut missing_ability = apply(150);
    missing_ability.ability_game_id = None;

    let lookup = build_lookup(&[missing_target, missing_ability, apply(200), remove(300)], 0, 1000);
    assert_eq!(lookup.skipped_event_count(), 2);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, 200);
}

#[test]
fn per_target_intervals_are_independent() {
    let events = vec![
        apply(100),
        BuffEvent::new(BuffEventType::Apply, 120, ABILITY, OTHER_TARGET),
        remove(200),
        BuffEvent::new(BuffEventType::Remove, 250, ABILITY, OTHER_TARGET),
    ];
    let lookup = build_lookup(&events, 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 2);
    let on_other: Vec<_> = intervals
        .iter()
        .filter(|iv| iv.target_id == OTHER_TARGET)
        .collect();
    assert_eq!(on_other.len(), 1);
    assert_eq!((on_other[0].start, on_other[0].end), (120, 250));
}

#[test]
fn intervals_are_sorted_by_start() {
    // Two targets, second target's interval starts first.
    let events = vec![
        BuffEvent::new(BuffEventType::Apply, 50, ABILITY, OTHER_TARGET),
        apply(100),
        remove(150),
        BuffEvent::new(BuffEventType::Remove, 400, ABILITY, OTHER_TARGET),
    ];
    let lookup = build_lookup(&events, 0, 1000);
    let starts: Vec<i64> = lookup.intervals_for(ABILITY).iter().map(|iv| iv.start).collect();
    assert_eq!(starts, vec![50, 100]);
}

#[test]
fn stack_sub_intervals_partition_the_active_span() {
    let events = vec![
        apply(100),
        BuffEvent::new(BuffEventType::ApplyStack, 200, ABILITY, TARGET).with_stacks(2),
        BuffEvent::new(BuffEventType::ApplyStack, 350, ABILITY, TARGET).with_stacks(3),
        remove(500),
    ];
    let lookup = build_lookup(&events, 0, 1000);

    let stacks = lookup.stack_intervals_for(ABILITY);
    assert_eq!(stacks.len(), 3);
    assert_eq!((stacks[0].level, stacks[0].start, stacks[0].end), (1, 100, 200));
    assert_eq!((stacks[1].level, stacks[1].start, stacks[1].end), (2, 200, 350));
    assert_eq!((stacks[2].level, stacks[2].start, stacks[2].end), (3, 350, 500));

    // Sub-intervals cover exactly the plain interval's span.
    let total: i64 = stacks.iter().map(|s| s.end - s.start).sum();
    let iv = &lookup.intervals_for(ABILITY)[0];
    assert_eq!(total, iv.end - iv.start);
}

#[test]
fn stack_timeline_survives_missing_remove() {
    let events = vec![
        apply(100).with_stacks(1),
        BuffEvent::new(BuffEventType::Refresh, 300, ABILITY, TARGET).with_stacks(2),
    ];
    let lookup = build_lookup(&events, 0, 1000);
    let stacks = lookup.stack_intervals_for(ABILITY);
    assert_eq!(stacks.len(), 2);
    assert_eq!((stacks[0].level, stacks[0].end), (1, 300));
    assert_eq!((stacks[1].level, stacks[1].end), (2, 1000));
}

#[test]
fn zero_length_interval_is_permitted() {
    let lookup = build_lookup(&[apply(100), remove(100)], 0, 1000);
    let intervals = lookup.intervals_for(ABILITY);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, intervals[0].end);
    assert_eq!(intervals[0].clipped_duration(0, 1000), 0);
}

#[test]
fn empty_stream_builds_empty_lookup() {
    let lookup = build_lookup(&[], 0, 1000);
    assert!(lookup.is_empty());
    assert_eq!(lookup.skipped_event_count(), 0);
}
