use crate::codec::EMPTY_DOCUMENT;
use crate::document::Document;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use toolshelf_core::StorageError;
use toolshelf_core::error::Result;

/// A host document kept in memory.
///
/// Used for the `in-memory` storage mode and in tests. Writes can be made to
/// fail on demand to exercise persistence error paths.
#[derive(Debug)]
pub struct MemoryDocument {
    contents: Mutex<String>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryDocument {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(contents.into()),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// A document holding an empty record block.
    pub fn empty() -> Self {
        Self::new(EMPTY_DOCUMENT)
    }

    pub fn contents(&self) -> String {
        self.contents.lock().clone()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl Document for MemoryDocument {
    async fn read(&self) -> Result<String> {
        Ok(self.contents())
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Persistence(
                "writes are disabled for this document".to_string(),
            ));
        }
        *self.contents.lock() = contents.to_string();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
