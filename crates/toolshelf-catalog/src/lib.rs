//! Catalog services for the tool directory.
//!
//! [`CatalogService`] implements create/read/update/delete on top of any
//! [`toolshelf_core::Repository`], [`ClickAccumulator`] implements
//! deduplicated click counting, and [`query`] holds the read-only filters
//! used by the HTTP layer.

pub mod click;
pub mod query;
pub mod service;

pub use click::{ClickAccumulator, ClickConfig};
pub use query::Page;
pub use service::CatalogService;
