//! Error types shared by every group_members_report crate.

use thiserror::Error;

/// Top-level error type for credential loading, directory fetches and report output.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("authorization error: {0}")]
    Auth(String),

    #[error("directory API error: {0}")]
    Directory(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A convenience Result alias that defaults to [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
