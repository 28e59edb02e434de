//! Report dumps on disk.
//!
//! A dump is one JSON document holding a report's code, its fight list
//! (most recent first) and the buff/debuff event stream per fight:
//!
//! ```json
//! {
//!   "code": "a1b2c3",
//!   "fights": [{ "id": 1, "startTime": 0, "endTime": 300000 }],
//!   "events_by_fight": {
//!     "1": [{ "type": "applydebuff", "timestamp": 1500,
//!             "targetID": 42, "abilityGameID": 18084 }]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use raidsight_core::scope::{EventProvider, ProviderError};
use raidsight_core::{BuffEvent, Fight};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ReportDump {
    code: String,
    fights: Vec<Fight>,
    #[serde(default)]
    events_by_fight: HashMap<i32, Vec<BuffEvent>>,
}

/// [`EventProvider`] backed by a report dump file.
pub struct FileProvider {
    dump: ReportDump,
}

impl FileProvider {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading report dump {}", path.display()))?;
        let dump: ReportDump = serde_json::from_str(&data)
            .with_context(|| format!("parsing report dump {}", path.display()))?;
        Ok(Self { dump })
    }

    pub fn report_code(&self) -> &str {
        &self.dump.code
    }
}

impl EventProvider for FileProvider {
    async fn fetch_fights(&self, report_code: &str) -> Result<Vec<Fight>, ProviderError> {
        if report_code != self.dump.code {
            return Err(ProviderError::ReportNotFound(report_code.to_string()));
        }
        Ok(self.dump.fights.clone())
    }

    async fn fetch_buff_events(
        &self,
        _report_code: &str,
        fight: &Fight,
    ) -> Result<Vec<BuffEvent>, ProviderError> {
        // A fight with no buff activity simply has no entry.
        Ok(self
            .dump
            .events_by_fight
            .get(&fight.id)
            .cloned()
            .unwrap_or_default())
    }
}
