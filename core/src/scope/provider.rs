use raidsight_types::Fight;

use crate::combat_log::BuffEvent;

/// Source of report data: fight lists and per-fight buff event streams.
///
/// Implementations fetch from an API, a local dump, or test fixtures. Event
/// streams must be ordered by non-decreasing timestamp; providers that read
/// raw logs are expected to deliver them that way.
pub trait EventProvider: Send + Sync {
    /// Fights for a report, most recent first.
    fn fetch_fights(
        &self,
        report_code: &str,
    ) -> impl Future<Output = Result<Vec<Fight>, ProviderError>> + Send;

    /// Buff and debuff events for one fight.
    fn fetch_buff_events(
        &self,
        report_code: &str,
        fight: &Fight,
    ) -> impl Future<Output = Result<Vec<BuffEvent>, ProviderError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("report '{0}' not found")]
    ReportNotFound(String),

    #[error("fight {fight_id} not found in report '{report_code}'")]
    FightNotFound { report_code: String, fight_id: i32 },

    #[error("malformed report data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
