//! Buff interval lookup.
//!
//! This module provides:
//! - **Builder**: converts one fight's ordered event stream into normalized
//!   active-time intervals, clipped to the fight bounds
//! - **Lookup data**: the immutable per-fight interval map
//! - **Point queries**: "was effect E active on target T at time P"
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │           ordered BuffEvents for one fight                   │
//! │  apply(A,T,t=100) refresh(A,T,t=130) remove(A,T,t=200) ...   │
//! └──────────────────────────────────────────────────────────────┘
//!                            │ build_lookup
//!                            ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  BuffLookupData: "A" → [{target T, 100..200}], stack levels  │
//! └──────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!               point queries · uptime aggregation
//! ```

mod builder;
mod interval;
mod query;

#[cfg(test)]
mod builder_tests;

pub use builder::build_lookup;
pub use interval::{BuffInterval, BuffLookupData, StackInterval};
pub use query::{is_buff_active, is_buff_active_on_target, stack_level_at};
