use thiserror::Error;
use toolshelf_core::StorageError;

/// Errors raised while decoding or encoding the record block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("start marker `{0}` not found")]
    MissingMarker(String),
    #[error("close sequence `];` not found after the start marker")]
    MissingTerminator,
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },
    #[error("unexpected record shape: {0}")]
    Shape(String),
}

impl CodecError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }
}

impl From<CodecError> for StorageError {
    fn from(value: CodecError) -> Self {
        StorageError::Format(value.to_string())
    }
}
