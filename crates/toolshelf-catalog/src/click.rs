use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use std::sync::Arc;
use toolshelf_core::{CatalogError, ClickOutcome, ClickTracker, Clock, Repository, SystemClock};
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, CatalogError>;

pub const DEFAULT_DEDUP_WINDOW: SignedDuration = SignedDuration::from_secs(10);

#[derive(Debug, Clone, TypedBuilder)]
pub struct ClickConfig {
    /// Clicks on the same tool closer together than this are counted once.
    #[builder(default = DEFAULT_DEDUP_WINDOW)]
    pub dedup_window: SignedDuration,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Counts clicks per tool with a dedup window and at most one write in
/// progress per tool.
///
/// The dedup and in-flight state lives in this value only. Construct it once
/// and share it; separate instances do not see each other's clicks.
pub struct ClickAccumulator<R> {
    repository: R,
    clock: Arc<dyn Clock>,
    config: ClickConfig,
    last_recorded: DashMap<String, Timestamp>,
    in_flight: DashMap<String, ()>,
}

impl<R: Repository> ClickAccumulator<R> {
    pub fn new(repository: R, config: ClickConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: R, config: ClickConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            config,
            last_recorded: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    fn recently_recorded(&self, id: &str, now: Timestamp) -> bool {
        self.last_recorded
            .get(id)
            .is_some_and(|last| now.duration_since(*last) < self.config.dedup_window)
    }

    /// Atomically claims `id`. Returns `None` when another click on the same
    /// tool already holds it.
    fn admit(&self, id: &str) -> Option<InFlightGuard<'_>> {
        match self.in_flight.entry(id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightGuard {
                    in_flight: &self.in_flight,
                    id: id.to_string(),
                })
            }
        }
    }

    fn mark_recorded(&self, id: &str, now: Timestamp) {
        let window = self.config.dedup_window;
        self.last_recorded
            .retain(|_, last| now.duration_since(*last) < window);
        self.last_recorded.insert(id.to_string(), now);
    }
}

/// Releases the in-flight claim on every exit path.
struct InFlightGuard<'a> {
    in_flight: &'a DashMap<String, ()>,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.id);
    }
}

#[async_trait]
impl<R: Repository> ClickTracker for ClickAccumulator<R> {
    async fn record_click(&self, id: &str) -> Result<ClickOutcome> {
        if self.recently_recorded(id, self.clock.now()) {
            tracing::debug!(id, "click deduplicated");
            return Ok(ClickOutcome::Deduplicated);
        }

        let Some(_guard) = self.admit(id) else {
            tracing::debug!(id, "click already in progress");
            return Ok(ClickOutcome::InProgress);
        };

        let mut tools = self.repository.list().await?;
        let tool = tools
            .iter_mut()
            .find(|tool| tool.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        tool.clicks = tool.clicks.saturating_add(1);
        let clicks = tool.clicks;
        self.mark_recorded(id, self.clock.now());

        match self.repository.replace_all(&tools).await {
            Ok(()) => {
                tracing::debug!(id, clicks, "click recorded");
                Ok(ClickOutcome::Recorded { clicks })
            }
            Err(e) => {
                tracing::warn!(id, clicks, error = %e, "click counted but not persisted");
                Ok(ClickOutcome::Unsaved {
                    clicks,
                    reason: e.to_string(),
                })
            }
        }
    }
}
