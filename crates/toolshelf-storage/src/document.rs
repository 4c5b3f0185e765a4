//! Byte-level access to the host document that embeds the record block.

mod file;
mod memory;

pub use file::FileDocument;
pub use memory::MemoryDocument;

use async_trait::async_trait;
use toolshelf_core::error::Result;

/// A whole-document store. Reads and writes always cover the full text.
#[async_trait]
pub trait Document: Send + Sync + 'static {
    async fn read(&self) -> Result<String>;

    /// Replaces the document contents.
    ///
    /// A failed write must leave the previous contents readable.
    async fn write(&self, contents: &str) -> Result<()>;
}
