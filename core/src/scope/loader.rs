use std::sync::Arc;

use hashbrown::HashMap;
use raidsight_types::{Fight, FightScope};
use tokio::sync::Mutex;

use crate::cache::{BuildError, LookupCache, LookupKey};
use crate::lookup::{BuffLookupData, build_lookup};
use crate::scope::provider::{EventProvider, ProviderError};
use crate::scope::resolver::resolve_scope;
use crate::uptime::FightLookup;

/// Where a scope load currently stands. Exposed for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading { fights_loaded: usize, total: usize },
    AllLoaded,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no report loaded")]
    NoReport,

    #[error("superseded by a newer selection")]
    Superseded,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

struct LoaderState {
    report_code: Option<String>,
    fights: Vec<Fight>,
    /// Bumped by every `open_report`/`load_scope`; loads carrying an older
    /// generation discard their results instead of publishing them.
    generation: u64,
    phase: LoadPhase,
    lookups: HashMap<i32, Arc<BuffLookupData>>,
}

/// Loads the fights a scope selects, one at a time, through the cache.
///
/// Fights load sequentially so partial results appear fight by fight and a
/// changed selection wastes at most one in-flight build. Each completed
/// fight is re-checked against the loader generation before being
/// published; a stale load stops with [`LoadError::Superseded`].
pub struct ScopeLoader<P> {
    provider: Arc<P>,
    cache: Arc<LookupCache>,
    state: Mutex<LoaderState>,
}

impl<P: EventProvider> ScopeLoader<P> {
    pub fn new(provider: Arc<P>, cache: Arc<LookupCache>) -> Self {
        Self {
            provider,
            cache,
            state: Mutex::new(LoaderState {
                report_code: None,
                fights: Vec::new(),
                generation: 0,
                phase: LoadPhase::Idle,
                lookups: HashMap::new(),
            }),
        }
    }

    /// Fetch a report's fight list and make it the active report. Clears
    /// per-fight state from any previous report and invalidates in-progress
    /// loads.
    pub async fn open_report(&self, report_code: &str) -> Result<Vec<Fight>, LoadError> {
        let fights = self.provider.fetch_fights(report_code).await?;
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.report_code = Some(report_code.to_string());
        state.fights = fights.clone();
        state.lookups.clear();
        state.phase = LoadPhase::Idle;
        tracing::info!(report_code, fights = fights.len(), "report opened");
        Ok(fights)
    }

    /// Build lookups for every fight the scope selects.
    ///
    /// Zero-length fights are skipped entirely. A fight whose build fails is
    /// logged and skipped; the rest of the scope still loads. Returns the
    /// loaded fights in scope order, ready for uptime aggregation.
    pub async fn load_scope(&self, scope: FightScope) -> Result<Vec<FightLookup>, LoadError> {
        let (generation, report_code, selected) = {
            let mut state = self.state.lock().await;
            let report_code = state.report_code.clone().ok_or(LoadError::NoReport)?;
            state.generation += 1;
            let generation = state.generation;
            // The accumulation belongs to one selection; a new selection
            // starts from nothing (the cache still holds the built lookups,
            // so re-selected fights come back cheap).
            state.lookups.clear();
            let selected = resolve_scope(&state.fights, scope).to_vec();
            state.phase = LoadPhase::Loading {
                fights_loaded: 0,
                total: selected.len(),
            };
            (generation, report_code, selected)
        };

        let mut loaded = Vec::with_capacity(selected.len());
        for (index, fight) in selected.iter().enumerate() {
            if fight.duration_ms() <= 0 {
                tracing::debug!(fight_id = fight.id, "skipping zero-length fight");
                continue;
            }

            let built = self.build_one(&report_code, fight).await;

            let mut state = self.state.lock().await;
            if state.generation != generation {
                tracing::debug!(fight_id = fight.id, "scope load superseded, discarding");
                return Err(LoadError::Superseded);
            }
            match built {
                Ok(lookup) => {
                    state.lookups.insert(fight.id, Arc::clone(&lookup));
                    loaded.push(FightLookup::new(lookup, fight));
                }
                Err(err) => {
                    tracing::warn!(fight_id = fight.id, error = %err, "fight failed to load, skipping");
                }
            }
            state.phase = LoadPhase::Loading {
                fights_loaded: index + 1,
                total: selected.len(),
            };
        }

        let mut state = self.state.lock().await;
        if state.generation != generation {
            return Err(LoadError::Superseded);
        }
        state.phase = LoadPhase::AllLoaded;
        Ok(loaded)
    }

    async fn build_one(
        &self,
        report_code: &str,
        fight: &Fight,
    ) -> Result<Arc<BuffLookupData>, BuildError> {
        let key = LookupKey::new(report_code, fight.id);
        self.cache
            .get_or_build(key, || async {
                let events = self
                    .provider
                    .fetch_buff_events(report_code, fight)
                    .await?;
                let (start, end) = (fight.start_time, fight.end_time);
                // Interval construction is pure CPU work; keep it off the
                // async threads for large event streams.
                let lookup =
                    tokio::task::spawn_blocking(move || build_lookup(&events, start, end))
                        .await
                        .map_err(|err| BuildError::Task(err.to_string()))?;
                Ok(Arc::new(lookup))
            })
            .await
    }

    /// The lookup for one loaded fight, for point-in-time queries.
    pub async fn lookup_for_fight(&self, fight_id: i32) -> Option<Arc<BuffLookupData>> {
        self.state.lock().await.lookups.get(&fight_id).cloned()
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.lock().await.phase
    }

    pub async fn fights(&self) -> Vec<Fight> {
        self.state.lock().await.fights.clone()
    }
}
