pub mod cache;
pub mod combat_log;
pub mod context;
pub mod game_data;
pub mod lookup;
pub mod scope;
pub mod uptime;

// Re-exports for convenience
pub use cache::{BuildError, LookupCache, LookupKey};
pub use combat_log::{BuffEvent, BuffEventType};
pub use context::{AppConfig, ConfigError};
pub use game_data::*;
pub use lookup::{
    BuffInterval, BuffLookupData, StackInterval, build_lookup, is_buff_active,
    is_buff_active_on_target, stack_level_at,
};
pub use raidsight_types::{
    Fight, FightScope, HostilityType, StackLevelUptime, UptimeRecord,
};
pub use scope::{EventProvider, LoadError, LoadPhase, ProviderError, ScopeLoader, resolve_scope};
pub use uptime::{FightLookup, UptimeParams, compute_uptimes};
