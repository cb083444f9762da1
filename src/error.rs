//! Error types and handling infrastructure for ctxsearch.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for top-level reporting.
//!
//! ## Error Classes
//!
//! - **Search aborts**: an invalid pattern or a missing root folder stops a search
//!   before any result is produced
//! - **Per-file failures**: I/O errors while reading one file; the walker recovers
//!   from these, explicit single-file operations (preview) surface them
//! - **User input**: empty keyword or no folder, rejected before a search starts
//! - **Front-end plumbing**: terminal, clipboard and worker channel failures

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ctxsearch operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The keyword does not compile as a regular expression
    #[error("Invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The root folder of a search does not exist
    #[error("Folder not found: {path}")]
    PathNotFound { path: PathBuf },

    /// The root of a search exists but is not a directory
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// File system related errors (permission denied, vanished file, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid user input caught before a search is started
    #[error("{message}")]
    InvalidInput { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// System clipboard unavailable or rejected the text
    #[error("Clipboard operation failed: {message}")]
    Clipboard { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for ctxsearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidPattern error for the rejected pattern
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidInput error with a user-facing message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a Clipboard error with a descriptive message
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True for errors raised by a bad regular expression
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

// Automatic conversion from io::Error to SearchError
impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/folder");

        let not_found = SearchError::PathNotFound { path: path.clone() };
        assert_eq!(not_found.to_string(), "Folder not found: /test/folder");

        let not_dir = SearchError::NotADirectory { path };
        assert_eq!(not_dir.to_string(), "Path is not a directory: /test/folder");

        let pattern = SearchError::invalid_pattern("(", "unclosed group");
        assert_eq!(
            pattern.to_string(),
            "Invalid regular expression '(': unclosed group"
        );

        let input = SearchError::invalid_input("Please enter a search keyword");
        assert_eq!(input.to_string(), "Please enter a search keyword");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            SearchError::ui("Terminal resize failed"),
            SearchError::UIError { .. }
        ));
        assert!(matches!(
            SearchError::clipboard("no display"),
            SearchError::Clipboard { .. }
        ));
        assert!(matches!(
            SearchError::other("Unknown error"),
            SearchError::Other { .. }
        ));
        assert!(SearchError::invalid_pattern("[", "x").is_invalid_pattern());
        assert!(!SearchError::other("x").is_invalid_pattern());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SearchError = io_err.into();

        match err {
            SearchError::FileError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected FileError variant"),
        }
    }
}
