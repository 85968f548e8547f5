//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the catalog's data rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("course number must not be empty")]
    EmptyCourseNumber,
}
