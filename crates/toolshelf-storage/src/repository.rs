use crate::codec::Codec;
use crate::document::Document;
use async_trait::async_trait;
use toolshelf_core::error::Result;
use toolshelf_core::{ReadRepository, Repository, Tool};

/// Repository backed by the record block of a host document.
///
/// Every call reads the document afresh; nothing is cached between calls.
/// A write re-reads the current document so that bytes outside the record
/// block written by someone else in the meantime are preserved.
#[derive(Debug)]
pub struct DocumentRepository<D> {
    document: D,
    codec: Codec,
}

impl<D: Document> DocumentRepository<D> {
    pub fn new(document: D) -> Self {
        Self::with_codec(document, Codec::new())
    }

    pub fn with_codec(document: D, codec: Codec) -> Self {
        Self { document, codec }
    }

    pub fn document(&self) -> &D {
        &self.document
    }
}

#[async_trait]
impl<D: Document> ReadRepository for DocumentRepository<D> {
    async fn list(&self) -> Result<Vec<Tool>> {
        let contents = self.document.read().await?;
        let tools = self.codec.decode(&contents).inspect_err(|e| {
            tracing::error!(error = %e, "failed to decode record store");
        })?;
        Ok(tools)
    }
}

#[async_trait]
impl<D: Document> Repository for DocumentRepository<D> {
    async fn replace_all(&self, tools: &[Tool]) -> Result<()> {
        let contents = self.document.read().await?;
        let updated = self.codec.encode(tools, &contents)?;
        self.document.write(&updated).await?;
        tracing::debug!(count = tools.len(), "record store replaced");
        Ok(())
    }
}
