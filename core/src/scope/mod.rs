//! Fight scope selection and loading.
//!
//! The user picks a scope (most recent fight, last 3, last 5, all). The
//! resolver turns that into a concrete fight list; the loader then builds
//! each fight's lookup sequentially through the shared cache, discarding
//! results that a newer selection has superseded.
//!
//! ```text
//!   FightScope ──resolve_scope──▶ &[Fight] ──ScopeLoader──▶ Vec<FightLookup>
//!                                               │
//!                                     LookupCache (single-flight)
//! ```

mod loader;
mod provider;
mod resolver;


pub use loader::{LoadError, LoadPhase, ScopeLoader};
pub use provider::{EventProvider, ProviderError};
pub use resolver::resolve_scope;
