//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: unreadable sources, bad settings and I/O with context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("could not open file {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
