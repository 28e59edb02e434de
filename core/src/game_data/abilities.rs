//! Ability metadata for tracked buffs and debuffs.
//!
//! Ids and names follow the game's status-effect table. `max_stacks == 1`
//! means the effect does not stack.

use phf::phf_map;

/// Metadata for one trackable effect.
#[derive(Debug, Clone, Copy)]
pub struct AbilityInfo {
    pub name: &'static str,
    pub is_debuff: bool,
    pub max_stacks: u32,
}

impl AbilityInfo {
    const fn new(name: &'static str, is_debuff: bool, max_stacks: u32) -> Self {
        Self {
            name,
            is_debuff,
            max_stacks,
        }
    }
}

/// Ability metadata indexed by `abilityGameID`
pub static ABILITY_INFO: phf::Map<i64, AbilityInfo> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════
    // Status-effect debuffs (applied BY players to enemies)
    // ═══════════════════════════════════════════════════════════════════════
    18084i64 => AbilityInfo::new("Burning", true, 1),
    21929i64 => AbilityInfo::new("Poisoned", true, 1),
    148801i64 => AbilityInfo::new("Hemorrhaging", true, 1),

    // ═══════════════════════════════════════════════════════════════════════
    // Status-effect hostile buffs (applied TO players by enemies)
    // ═══════════════════════════════════════════════════════════════════════
    178118i64 => AbilityInfo::new("Overcharged", false, 1),
    178127i64 => AbilityInfo::new("Sundered", false, 1),
    95134i64 => AbilityInfo::new("Concussion", false, 1),
    95136i64 => AbilityInfo::new("Chill", false, 1),
    178123i64 => AbilityInfo::new("Diseased", false, 1),

    // ═══════════════════════════════════════════════════════════════════════
    // Stacking effects
    // ═══════════════════════════════════════════════════════════════════════
    126597i64 => AbilityInfo::new("Touch of Z'en", true, 5),
    134336i64 => AbilityInfo::new("Stagger", true, 3),
    120017i64 => AbilityInfo::new("Elemental Weakness", true, 3),
};

/// Curated "important" debuff ids for dashboard widgets.
pub static STATUS_EFFECT_DEBUFFS: &[i64] = &[18084, 21929, 148801];

/// Curated "important" hostile buff ids for dashboard widgets.
pub static STATUS_EFFECT_HOSTILE_BUFFS: &[i64] = &[178118, 178127, 95134, 95136, 178123];

/// Metadata for an ability id, if bundled.
pub fn ability_info(ability_game_id: i64) -> Option<&'static AbilityInfo> {
    ABILITY_INFO.get(&ability_game_id)
}

/// Display name with the generic fallback used across the dashboard.
pub fn display_name(ability_game_id: i64) -> String {
    match ability_info(ability_game_id) {
        Some(info) => info.name.to_string(),
        None => format!("Ability {ability_game_id}"),
    }
}

/// Stack limit for the ability, 1 when unknown or non-stacking.
pub fn max_stacks(ability_game_id: i64) -> u32 {
    ability_info(ability_game_id).map(|i| i.max_stacks).unwrap_or(1)
}

/// True when the bundled table marks the ability a debuff.
pub fn is_debuff_ability(ability_game_id: i64) -> bool {
    ability_info(ability_game_id).map(|i| i.is_debuff).unwrap_or(false)
}
