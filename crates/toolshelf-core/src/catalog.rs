use crate::tool::{Tool, ToolPatch};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::CatalogError>;

#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Returns every tool in persisted order.
    async fn list(&self) -> Result<Vec<Tool>>;

    /// Returns the tool with the given id, or `NotFound`.
    async fn get(&self, id: &str) -> Result<Tool>;

    /// Stores a new tool. The id, click counter and upload date are assigned
    /// by the catalog; the values in `input` for those fields are ignored.
    async fn create(&self, input: ToolPatch) -> Result<Tool>;

    /// Shallow-merges `patch` over the stored tool and returns the result.
    async fn update(&self, id: &str, patch: ToolPatch) -> Result<Tool>;

    /// Removes the tool with the given id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// What happened to a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The counter was incremented and persisted.
    Recorded { clicks: u64 },
    /// A click for the same tool was recorded within the dedup window.
    Deduplicated,
    /// Another click for the same tool is being persisted right now.
    InProgress,
    /// The counter was incremented but the write failed.
    Unsaved { clicks: u64, reason: String },
}

#[async_trait]
pub trait ClickTracker: Send + Sync + 'static {
    /// Records a click on a tool.
    ///
    /// Fails only with `NotFound` for an unknown tool or with a storage error
    /// when the current records cannot be read. Write failures are reported
    /// as [`ClickOutcome::Unsaved`].
    async fn record_click(&self, id: &str) -> Result<ClickOutcome>;
}
