use crate::presentation::formatters::{FormatError, UnsupportedFormatError};
use thiserror::Error;
use wealthgrabber_core::{AuthError, FlagConflict, RetrievalError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error("Could not render output: {0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Usage(String),

    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 2,
            Error::Auth(_)
            | Error::Retrieval(_)
            | Error::UnsupportedFormat(_)
            | Error::Format(_)
            | Error::AccountNotFound(_)
            | Error::Config(_) => 1,
        }
    }
}

impl From<FlagConflict> for Error {
    fn from(conflict: FlagConflict) -> Self {
        Error::Usage(conflict.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
