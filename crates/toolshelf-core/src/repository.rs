use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use std::sync::Arc;

/// A read-only view of the record store.
///
/// Implementations must not cache: every call reflects the persisted state
/// at the time of the call.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Returns every stored tool in persisted order.
    async fn list(&self) -> Result<Vec<Tool>>;

    /// Retrieves a single tool.
    /// Returns `None` if no tool has the given id.
    async fn get(&self, id: &str) -> Result<Option<Tool>> {
        Ok(self.list().await?.into_iter().find(|tool| tool.id == id))
    }
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Overwrites the whole collection with `tools`.
    ///
    /// There is no partial write: callers read the full list, mutate it and
    /// hand the complete result back. Concurrent writers race and the last
    /// one wins.
    async fn replace_all(&self, tools: &[Tool]) -> Result<()>;
}

#[async_trait]
impl<T: ReadRepository + ?Sized> ReadRepository for Arc<T> {
    async fn list(&self) -> Result<Vec<Tool>> {
        (**self).list().await
    }

    async fn get(&self, id: &str) -> Result<Option<Tool>> {
        (**self).get(id).await
    }
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn replace_all(&self, tools: &[Tool]) -> Result<()> {
        (**self).replace_all(tools).await
    }
}
