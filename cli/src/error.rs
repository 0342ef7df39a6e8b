#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate. Document acquisition failures live here;
//! everything downstream of the raw bytes is a `cannery_core` concern.

use cannery_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper (file reads, server bind).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Fetching the document over HTTP(S) failed.
    #[from(ignore)]
    #[display("Fetch Error: {_0}")]
    Fetch(String),

    /// Errors from the core build/match pipeline.
    #[display("{_0}")]
    Core(AppError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_conversion() {
        let err: CliError = AppError::EmptyArrayItems.into();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(format!("{}", err), "empty items in array");
    }

    #[test]
    fn test_fetch_display() {
        let err = CliError::Fetch("connection refused".into());
        assert_eq!(format!("{}", err), "Fetch Error: connection refused");
    }
}
