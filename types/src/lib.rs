//! Shared result types for Raidsight
//!
//! This crate contains the serializable types that cross the boundary between
//! the analysis core (raidsight-core) and whatever frontend consumes it:
//! fights, scope selections, and aggregated uptime records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Fights
// ─────────────────────────────────────────────────────────────────────────────

/// A single timed encounter within a report.
///
/// Timestamps are absolute milliseconds as reported by the combat log. The
/// fight list for a report is ordered with index 0 as the most recent fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    pub id: i32,
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "endTime")]
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Fight {
    pub fn new(id: i32, start_time: i64, end_time: i64) -> Self {
        Self {
            id,
            start_time,
            end_time,
            name: None,
        }
    }

    /// Fight length in milliseconds. Zero or negative means the fight carries
    /// no aggregation weight and is skipped by scope loading.
    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scope
// ─────────────────────────────────────────────────────────────────────────────

/// User-selected window of fights to aggregate over.
///
/// `BossOnly` is a recognized selection whose filtering is not implemented;
/// it resolves to the same fight list as `AllFights` (known gap, kept visible
/// rather than guessed at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FightScope {
    #[default]
    #[serde(rename = "most-recent")]
    MostRecent,
    #[serde(rename = "last-3")]
    LastThree,
    #[serde(rename = "last-5")]
    LastFive,
    #[serde(rename = "all-fights")]
    AllFights,
    #[serde(rename = "boss-only")]
    BossOnly,
}

impl FightScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FightScope::MostRecent => "most-recent",
            FightScope::LastThree => "last-3",
            FightScope::LastFive => "last-5",
            FightScope::AllFights => "all-fights",
            FightScope::BossOnly => "boss-only",
        }
    }
}

impl fmt::Display for FightScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FightScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most-recent" => Ok(FightScope::MostRecent),
            "last-3" => Ok(FightScope::LastThree),
            "last-5" => Ok(FightScope::LastFive),
            "all-fights" => Ok(FightScope::AllFights),
            "boss-only" => Ok(FightScope::BossOnly),
            other => Err(format!("unknown scope '{other}'")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Uptime Results
// ─────────────────────────────────────────────────────────────────────────────

/// Whether an effect was applied to friendly or hostile actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostilityType {
    #[default]
    Friendly,
    Hostile,
}

/// Uptime figures for a single stack level of a stacking effect.
///
/// Duration counts time spent at exactly this level, not "at least" it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackLevelUptime {
    pub level: u32,
    pub total_duration_ms: i64,
    pub uptime_percentage: f64,
    pub application_count: u32,
}

/// Aggregated uptime for one effect over the selected scope.
///
/// For stacking effects, the headline figures are those of the lowest
/// observed stack level (the default display level) and `all_stacks` carries
/// the complete per-level breakdown for interactive switching.
///
/// `uptime_percentage` is deliberately not clamped: a value above 100 means
/// overlapping same-target intervals were present in the log and is surfaced
/// as a data-quality signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeRecord {
    pub ability_game_id: i64,
    pub ability_name: String,
    pub total_duration_ms: i64,
    pub uptime_percentage: f64,
    pub application_count: u32,
    pub is_debuff: bool,
    pub hostility: HostilityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stacks: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_stacks: Vec<StackLevelUptime>,
}
