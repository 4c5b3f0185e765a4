use crate::codec::EMPTY_DOCUMENT;
use crate::document::Document;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use toolshelf_core::StorageError;
use toolshelf_core::error::Result;

/// A host document on the local filesystem.
///
/// Every write goes to its own uniquely named temporary file in the same
/// directory, which is then renamed over the target. Readers see either the
/// old or the new contents, and concurrent writers never share a temporary
/// file; the last rename wins.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens `path`, creating it with an empty record block if it does not
    /// exist yet.
    pub async fn open_or_init(path: impl Into<PathBuf>) -> Result<Self> {
        let document = Self::new(path);
        match tokio::fs::try_exists(&document.path).await {
            Ok(true) => {}
            Ok(false) => {
                if let Some(parent) = document.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent)
                            .await
                            .map_err(|e| persistence(&document.path, e))?;
                    }
                }
                tracing::info!(path = %document.path.display(), "initializing empty record store");
                document.write(EMPTY_DOCUMENT).await?;
            }
            Err(e) => return Err(unavailable(&document.path, e)),
        }
        Ok(document)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn replace_contents(&self, contents: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut prefix = OsString::from(".");
        if let Some(name) = self.path.file_name() {
            prefix.push(name);
        }
        prefix.push(".");

        let mut temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| persistence(&self.path, e))?;
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| persistence(&self.path, e))?;
        }
        temp.write_all(contents)
            .map_err(|e| persistence(&self.path, e))?;
        temp.persist(&self.path)
            .map_err(|e| persistence(&self.path, e.error))?;
        Ok(())
    }
}

fn unavailable(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Unavailable(format!("{}: {err}", path.display()))
}

fn persistence(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Persistence(format!("{}: {err}", path.display()))
}

#[async_trait]
impl Document for FileDocument {
    async fn read(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    StorageError::Format(format!("{}: not valid UTF-8", self.path.display()))
                }
                _ => unavailable(&self.path, e),
            })
    }

    async fn write(&self, contents: &str) -> Result<()> {
        let document = self.clone();
        let bytes = contents.as_bytes().to_vec();
        tokio::task::spawn_blocking(move || document.replace_contents(&bytes))
            .await
            .map_err(|e| StorageError::Persistence(format!("{}: {e}", self.path.display())))??;
        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "record store written");
        Ok(())
    }
}
