//! Raw combat-log event model.
//!
//! Events arrive from the data-fetching layer as JSON and are deserialized
//! into [`BuffEvent`]s. Fields the log may omit are optional; the interval
//! builder decides what counts as malformed.

mod event;

pub use event::{BuffEvent, BuffEventType};
