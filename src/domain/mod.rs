//! Domain layer: entities and the ordered catalog
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;

pub use catalog::{Catalog, CatalogEntry, InOrder};
pub use entities::{Course, LineRejection};
pub use error::DomainError;
