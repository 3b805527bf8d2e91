//! Custom error types for the fmg-editor crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum FmgError {
    /// An error originating from I/O operations (open, seek, short read, write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is structurally invalid: header fields imply a layout that
    /// does not fit inside the file, or string data is not valid UTF-16.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The caller passed input that violates an operation's preconditions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A convenience `Result` type alias using the crate's `FmgError` type.
pub type Result<T> = std::result::Result<T, FmgError>;
