//! Error types for calextract.

use std::path::PathBuf;

use thiserror::Error;

/// `EX_USAGE` from sysexits.h.
pub const EX_USAGE: u8 = 64;

/// Errors that can occur while collecting or exporting events.
#[derive(Error, Debug)]
pub enum CalExtractError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Access has been denied, please authorise this application to continue ({0})")]
    AccessDenied(String),

    #[error("Access has been restricted, please authorize this application to continue ({0})")]
    AccessRestricted(String),

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalExtractError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CalExtractError::Argument(_) => EX_USAGE,
            _ => 1,
        }
    }
}

/// Result type alias for calextract operations.
pub type CalExtractResult<T> = Result<T, CalExtractError>;
