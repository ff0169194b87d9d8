//! Centralized error types for mailgrab.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailgrab library.
#[derive(Error, Debug)]
pub enum MailGrabError {
    /// I/O error with the associated file path.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The attachment output directory does not exist or cannot be inspected.
    #[error("Output directory unavailable: '{path}': {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No unused filename could be generated within the retry budget.
    #[error("No unused filename for '{base}' in '{dir}' after {attempts} attempts")]
    NameSpaceExhausted {
        base: String,
        dir: PathBuf,
        attempts: u32,
    },

    /// A MIME parsing or decoding error.
    #[error("MIME error: {0}")]
    MimeError(String),

    /// The IMAP server rejected a command or the connection failed.
    #[error("IMAP error: {0}")]
    ImapError(String),

    /// Login was refused for the given account.
    #[error("Authentication failed for '{0}'")]
    AuthFailed(String),

    /// The system credential store could not be accessed.
    #[error("Credential store error: {0}")]
    CredentialError(String),
}

/// Convenience alias for `Result<T, MailGrabError>`.
pub type Result<T> = std::result::Result<T, MailGrabError>;

impl MailGrabError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<imap::Error> for MailGrabError {
    fn from(source: imap::Error) -> Self {
        Self::ImapError(source.to_string())
    }
}
