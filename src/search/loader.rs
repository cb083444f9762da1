//! File content loading with best-effort text decoding.
//!
//! The walker reads every qualifying file through a [`ContentLoader`], which keeps
//! the traversal independent of where the bytes come from (tests count reads with
//! an instrumented loader).

use crate::error::{Result, SearchError};
use bstr::ByteSlice;
use std::path::Path;

/// Source of file content for the walker and the preview.
pub trait ContentLoader: Send + Sync {
    /// Read the full content of `path` as text.
    ///
    /// Invalid UTF-8 must not fail the read; it is decoded lossily.
    fn load(&self, path: &Path) -> Result<String>;
}

/// Loader reading straight from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentLoader;

impl ContentLoader for FsContentLoader {
    fn load(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| {
            SearchError::file_error(format!("Failed to read file: {}", path.display()), e)
        })?;
        Ok(decode_lossy(bytes))
    }
}

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// Valid input is moved into the returned string without copying.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().to_str_lossy().into_owned(),
    }
}
