//! Persistence for the tool catalog.
//!
//! Records live as an array literal embedded in a host source document.
//! [`codec`] converts between that literal and [`toolshelf_core::Tool`],
//! [`document`] abstracts where the host document lives, and
//! [`DocumentRepository`] ties both into the core repository contract.

pub mod codec;
pub mod document;
pub mod error;
pub mod repository;

pub use codec::Codec;
pub use document::{Document, FileDocument, MemoryDocument};
pub use error::CodecError;
pub use repository::DocumentRepository;
