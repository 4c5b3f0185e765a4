//! Core types and traits for the Toolshelf catalog.
//!
//! This crate provides the tool record model and the contracts shared by
//! the storage backends, the catalog services and the HTTP gateway.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod repository;
pub mod tool;

pub use catalog::{Catalog, ClickOutcome, ClickTracker};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CatalogError, StorageError};
pub use repository::{ReadRepository, Repository};
pub use tool::{Tool, ToolPatch};
