use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use clap::ValueEnum;
use raidsight_core::{
    AppConfig, FightScope, HostilityType, LookupCache, ScopeLoader, UptimeParams, UptimeRecord,
    compute_uptimes, game_data,
};

use crate::provider::FileProvider;

/// Which effect stream the uptimes come from. Controls the record labels
/// and which configured list `--important` filters against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EffectKind {
    /// Debuffs players apply to enemies
    Debuffs,
    /// Buffs enemies apply to players
    Buffs,
}

pub struct UptimeOptions {
    pub scope: FightScope,
    pub kind: EffectKind,
    pub targets: Vec<i64>,
    pub abilities: Vec<i64>,
    pub important: bool,
    /// Effect ids `--important` filters against, from the config.
    pub important_ids: Vec<i64>,
    /// Also print zero rows for queried effects that never appeared.
    pub show_empty: bool,
    pub json: bool,
}

/// The configured important-effect list for one stream.
pub fn important_ids_for(kind: EffectKind, config: &AppConfig) -> Vec<i64> {
    match kind {
        EffectKind::Debuffs => config.important_debuffs.clone(),
        EffectKind::Buffs => config.important_hostile_buffs.clone(),
    }
}

pub async fn list_fights(provider: FileProvider) -> anyhow::Result<()> {
    let code = provider.report_code().to_string();
    let loader = ScopeLoader::new(Arc::new(provider), Arc::new(LookupCache::new()));
    let fights = loader.open_report(&code).await?;

    if fights.is_empty() {
        println!("report {code} has no fights");
        return Ok(());
    }

    println!("{:<6} {:>12} {:>12} Name", "ID", "Start", "End");
    for fight in &fights {
        println!(
            "{:<6} {:>12} {:>12} {}",
            fight.id,
            fight.start_time,
            fight.end_time,
            fight.name.as_deref().unwrap_or("-")
        );
    }
    println!("\nTotal: {} fights", fights.len());
    Ok(())
}

pub async fn uptimes(provider: FileProvider, opts: UptimeOptions) -> anyhow::Result<()> {
    let code = provider.report_code().to_string();
    let loader = ScopeLoader::new(Arc::new(provider), Arc::new(LookupCache::new()));
    loader.open_report(&code).await?;

    let loaded = loader.load_scope(opts.scope).await?;
    tracing::debug!(scope = %opts.scope, fights = loaded.len(), "scope loaded");
    if loaded.is_empty() {
        println!("no fights in scope {}", opts.scope);
        return Ok(());
    }

    let abilities: Vec<i64> = if opts.abilities.is_empty() {
        // Every effect seen in the loaded fights, in stable id order.
        let mut ids = BTreeSet::new();
        for fight in &loaded {
            ids.extend(fight.lookup.ability_ids());
        }
        ids.into_iter().collect()
    } else {
        opts.abilities.clone()
    };

    let important_only = opts.important.then_some(opts.important_ids.as_slice());

    let params = UptimeParams {
        ability_ids: &abilities,
        target_ids: &opts.targets,
        is_debuff: opts.kind == EffectKind::Debuffs,
        hostility: match opts.kind {
            EffectKind::Debuffs => HostilityType::Hostile,
            EffectKind::Buffs => HostilityType::Friendly,
        },
        important_only,
    };
    let records = compute_uptimes(&loaded, &params);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() && !opts.show_empty {
        println!("no effects recorded in scope {}", opts.scope);
        return Ok(());
    }

    println!(
        "{:<30} {:>8} {:>10} {:>8}",
        "Effect", "Uptime", "Duration", "Applies"
    );
    println!("{}", "-".repeat(60));
    for record in &records {
        print_record(record);
    }
    if opts.show_empty {
        let candidates = if opts.important {
            &opts.important_ids
        } else {
            &abilities
        };
        for id in missing_effect_ids(&records, candidates) {
            println!(
                "{:<30} {:>7.1}% {:>9.1}s {:>8}",
                game_data::display_name(id),
                0.0,
                0.0,
                0
            );
        }
    }
    Ok(())
}

/// Queried ids that produced no record, in query order.
fn missing_effect_ids(records: &[UptimeRecord], candidates: &[i64]) -> Vec<i64> {
    let shown: HashSet<i64> = records.iter().map(|r| r.ability_game_id).collect();
    candidates
        .iter()
        .copied()
        .filter(|id| !shown.contains(id))
        .collect()
}

fn print_record(record: &UptimeRecord) {
    println!(
        "{:<30} {:>7.1}% {:>9.1}s {:>8}",
        record.ability_name,
        record.uptime_percentage,
        record.total_duration_ms as f64 / 1000.0,
        record.application_count
    );
    for level in &record.all_stacks {
        println!(
            "  {:<28} {:>7.1}% {:>9.1}s {:>8}",
            format!("{} stack(s)", level.level),
            level.uptime_percentage,
            level.total_duration_ms as f64 / 1000.0,
            level.application_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn important_ids_follow_the_config() {
        let config = AppConfig {
            important_debuffs: vec![111, 222],
            important_hostile_buffs: vec![333],
            ..AppConfig::default()
        };
        assert_eq!(important_ids_for(EffectKind::Debuffs, &config), vec![111, 222]);
        assert_eq!(important_ids_for(EffectKind::Buffs, &config), vec![333]);
    }

    #[test]
    fn missing_effects_are_the_unrecorded_candidates() {
        let record = UptimeRecord {
            ability_game_id: 18084,
            ability_name: "Burning".to_string(),
            total_duration_ms: 50,
            uptime_percentage: 50.0,
            application_count: 1,
            is_debuff: true,
            hostility: HostilityType::Hostile,
            stack_level: None,
            max_stacks: None,
            all_stacks: Vec::new(),
        };
        assert_eq!(
            missing_effect_ids(&[record], &[18084, 21929, 148801]),
            vec![21929, 148801]
        );
        assert!(missing_effect_ids(&[], &[]).is_empty());
    }
}
