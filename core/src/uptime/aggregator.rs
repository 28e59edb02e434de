use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashSet;
use raidsight_types::{Fight, HostilityType, StackLevelUptime, UptimeRecord};

use crate::game_data;
use crate::lookup::BuffLookupData;

/// One fight's lookup paired with its aggregation window.
#[derive(Debug, Clone)]
pub struct FightLookup {
    pub lookup: Arc<BuffLookupData>,
    pub start: i64,
    pub end: i64,
}

impl FightLookup {
    pub fn new(lookup: Arc<BuffLookupData>, fight: &Fight) -> Self {
        Self {
            lookup,
            start: fight.start_time,
            end: fight.end_time,
        }
    }

    fn window_ms(&self) -> i64 {
        self.end - self.start
    }
}

/// What to aggregate and how to label it.
#[derive(Debug, Clone)]
pub struct UptimeParams<'a> {
    /// Abilities to report on.
    pub ability_ids: &'a [i64],
    /// Targets to include. Empty means every target seen in the lookups.
    pub target_ids: &'a [i64],
    pub is_debuff: bool,
    pub hostility: HostilityType,
    /// Optional curated allow-list applied after aggregation.
    pub important_only: Option<&'a [i64]>,
}

/// Per-stack-level accumulator.
#[derive(Debug, Default, Clone, Copy)]
struct LevelAccum {
    duration_ms: i64,
    applications: u32,
}

/// Aggregate uptimes for the given abilities across all fights in scope.
///
/// Fights whose window is zero or negative contribute neither active time
/// nor denominator. With a non-empty target set, each fight's possible
/// duration is `window × |targets|`; durations for in-set targets are summed
/// against that. Abilities with no qualifying intervals produce no record
/// (widgets render an explicit empty state instead).
///
/// Records are sorted by descending uptime percentage (stable). Percentages
/// are not clamped; a value above 100 signals overlapping same-target
/// intervals in the log and is logged as a warning.
pub fn compute_uptimes(fights: &[FightLookup], params: &UptimeParams) -> Vec<UptimeRecord> {
    let target_set: HashSet<i64> = params.target_ids.iter().copied().collect();
    let target_factor = target_set.len().max(1) as i64;

    let total_possible_ms: i64 = fights
        .iter()
        .filter(|f| f.window_ms() > 0)
        .map(|f| f.window_ms() * target_factor)
        .sum();
    if total_possible_ms == 0 {
        return Vec::new();
    }

    let mut records = Vec::with_capacity(params.ability_ids.len());

    for &ability_id in params.ability_ids {
        let mut active_ms = 0i64;
        let mut applications = 0u32;
        let mut levels: BTreeMap<u32, LevelAccum> = BTreeMap::new();

        for fight in fights.iter().filter(|f| f.window_ms() > 0) {
            for iv in fight.lookup.intervals_for(ability_id) {
                if !target_set.is_empty() && !target_set.contains(&iv.target_id) {
                    continue;
                }
                let clipped = iv.clipped_duration(fight.start, fight.end);
                if clipped > 0 {
                    active_ms += clipped;
                    applications += 1;
                }
            }
            for sub in fight.lookup.stack_intervals_for(ability_id) {
                if !target_set.is_empty() && !target_set.contains(&sub.target_id) {
                    continue;
                }
                let clipped = sub.clipped_duration(fight.start, fight.end);
                if clipped > 0 {
                    let acc = levels.entry(sub.level).or_default();
                    acc.duration_ms += clipped;
                    acc.applications += 1;
                }
            }
        }

        if applications == 0 {
            continue;
        }

        let pct = percentage(active_ms, total_possible_ms);
        if pct > 100.0 {
            tracing::warn!(
                ability_id,
                percentage = pct,
                "uptime above 100%: overlapping same-target intervals in log"
            );
        }

        let game_max = game_data::max_stacks(ability_id);
        let is_stacking = game_max > 1 || levels.len() > 1;

        let mut record = UptimeRecord {
            ability_game_id: ability_id,
            ability_name: game_data::display_name(ability_id),
            total_duration_ms: active_ms,
            uptime_percentage: pct,
            application_count: applications,
            is_debuff: params.is_debuff,
            hostility: params.hostility,
            stack_level: None,
            max_stacks: None,
            all_stacks: Vec::new(),
        };

        if is_stacking && !levels.is_empty() {
            let all_stacks: Vec<StackLevelUptime> = levels
                .iter()
                .map(|(&level, acc)| StackLevelUptime {
                    level,
                    total_duration_ms: acc.duration_ms,
                    uptime_percentage: percentage(acc.duration_ms, total_possible_ms),
                    application_count: acc.applications,
                })
                .collect();

            // Default display level is the lowest observed; the headline
            // figures follow it, all levels stay available for switching.
            let lowest = &all_stacks[0];
            record.total_duration_ms = lowest.total_duration_ms;
            record.uptime_percentage = lowest.uptime_percentage;
            record.application_count = lowest.application_count;
            record.stack_level = Some(lowest.level);
            let observed_max = all_stacks.last().map(|s| s.level).unwrap_or(1);
            record.max_stacks = Some(game_max.max(observed_max));
            record.all_stacks = all_stacks;
        }

        records.push(record);
    }

    records.sort_by(|a, b| {
        b.uptime_percentage
            .partial_cmp(&a.uptime_percentage)
            .unwrap_or(Ordering::Equal)
    });

    if let Some(allowed) = params.important_only {
        records.retain(|r| allowed.contains(&r.ability_game_id));
    }

    records
}

fn percentage(active_ms: i64, possible_ms: i64) -> f64 {
    100.0 * active_ms as f64 / possible_ms as f64
}
