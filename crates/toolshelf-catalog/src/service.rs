use async_trait::async_trait;
use std::sync::Arc;
use toolshelf_core::{Catalog, CatalogError, Clock, Repository, SystemClock, Tool, ToolPatch};

type Result<T> = std::result::Result<T, CatalogError>;

/// Placeholder stored for links the submitter left empty.
const LINK_PLACEHOLDER: &str = "#";

/// A concrete implementation of the `Catalog` trait.
///
/// Every operation is a read-modify-write of the whole collection through
/// the repository. Concurrent mutations are not serialized; the last write
/// wins.
#[derive(Clone)]
pub struct CatalogService<R> {
    repository: R,
    clock: Arc<dyn Clock>,
}

impl<R: Repository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    /// Creates a service reading the current date from `clock`.
    pub fn with_clock(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn require_text(field: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) if !text.trim().is_empty() => Ok(()),
            _ => Err(CatalogError::Validation(format!("`{field}` must not be empty"))),
        }
    }

    fn reject_blank(field: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) if text.trim().is_empty() => Err(CatalogError::Validation(format!(
                "`{field}` must not be empty"
            ))),
            _ => Ok(()),
        }
    }
}

/// Returns one more than the largest numeric id, or `"1"` when there is
/// none. Ids that are not plain non-negative integers are ignored.
///
/// Fails once the largest id is `u64::MAX`, since no unused numeric id
/// follows it.
pub fn next_id(tools: &[Tool]) -> Result<String> {
    let max = tools
        .iter()
        .filter_map(|tool| tool.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    max.checked_add(1)
        .map(|id| id.to_string())
        .ok_or_else(|| CatalogError::Validation(format!("id space exhausted after `{max}`")))
}

#[async_trait]
impl<R: Repository> Catalog for CatalogService<R> {
    async fn list(&self) -> Result<Vec<Tool>> {
        Ok(self.repository.list().await?)
    }

    async fn get(&self, id: &str) -> Result<Tool> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn create(&self, input: ToolPatch) -> Result<Tool> {
        Self::require_text("name", input.name.as_deref())?;
        Self::require_text("description", input.description.as_deref())?;

        let mut tools = self.repository.list().await?;

        let mut tool = Tool::default();
        tool.apply(input);
        tool.id = next_id(&tools)?;
        tool.clicks = 0;
        tool.upload_date = self.clock.today().to_string();
        if tool.download_link.is_empty() {
            tool.download_link = LINK_PLACEHOLDER.to_string();
        }
        if tool.original_post_link.is_empty() {
            tool.original_post_link = LINK_PLACEHOLDER.to_string();
        }

        tools.push(tool.clone());
        self.repository.replace_all(&tools).await?;

        tracing::info!(id = %tool.id, name = %tool.name, "tool created");
        Ok(tool)
    }

    async fn update(&self, id: &str, patch: ToolPatch) -> Result<Tool> {
        Self::reject_blank("name", patch.name.as_deref())?;
        Self::reject_blank("description", patch.description.as_deref())?;

        let mut tools = self.repository.list().await?;
        let tool = tools
            .iter_mut()
            .find(|tool| tool.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        tool.apply(patch);
        let updated = tool.clone();
        self.repository.replace_all(&tools).await?;

        tracing::info!(id = %updated.id, "tool updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut tools = self.repository.list().await?;
        let before = tools.len();
        tools.retain(|tool| tool.id != id);
        if tools.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.repository.replace_all(&tools).await?;

        tracing::info!(id, "tool deleted");
        Ok(())
    }
}
