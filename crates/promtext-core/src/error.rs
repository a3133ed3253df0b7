//! Shared error type across promtext crates.

use thiserror::Error;

/// Stable error codes (logged and asserted on in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration present but invalid.
    BadConfig,
    /// Required configuration key absent.
    MissingConfig,
    /// I/O failure (config file, socket).
    Io,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::MissingConfig => "MISSING_CONFIG",
            ErrorCode::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromTextError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PromTextError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("missing config: {0}")]
    MissingConfig(&'static str),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl PromTextError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PromTextError::BadConfig(_) => ErrorCode::BadConfig,
            PromTextError::MissingConfig(_) => ErrorCode::MissingConfig,
            PromTextError::Io(_) => ErrorCode::Io,
        }
    }
}
