//! Uptime aggregation over one or more fights.
//!
//! Takes the per-fight lookups the scope loader accumulated, intersects
//! intervals with each fight's window, and produces sorted
//! percentage-uptime records. Multi-fight percentages are duration-weighted:
//! `100 × Σ active / Σ window`, never a naive per-fight average.

mod aggregator;


pub use aggregator::{FightLookup, UptimeParams, compute_uptimes};
