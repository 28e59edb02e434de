//! Bundled game metadata.
//!
//! Display names, debuff flags and stack limits for the effects the
//! dashboard cares about. A frontend with live ability metadata can override
//! display names; these tables are the offline fallback.

mod abilities;

pub use abilities::{
    AbilityInfo, STATUS_EFFECT_DEBUFFS, STATUS_EFFECT_HOSTILE_BUFFS, ability_info,
    display_name, is_debuff_ability, max_stacks,
};
