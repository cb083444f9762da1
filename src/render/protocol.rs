//! Protocol definitions shared between the application loop and the search worker.

use crate::error::SearchError;
use crate::search::{HighlightedContent, MatchMode, MatchResult, SearchConfig};
use std::path::PathBuf;

/// Identifier attached to cross-task requests so responses can be correlated.
pub type RequestId = u64;

/// Commands sent from the application loop to the search worker.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    /// Walk a folder and collect matching files
    RunSearch {
        request_id: RequestId,
        config: SearchConfig,
    },
    /// Read one file and highlight the keyword in it
    LoadPreview {
        request_id: RequestId,
        path: PathBuf,
        keyword: String,
        mode: MatchMode,
    },
    Shutdown,
}

/// Responses emitted by the search worker back to the application loop.
#[derive(Debug)]
pub enum SearchResponse {
    SearchCompleted {
        request_id: RequestId,
        result: MatchResult,
    },
    PreviewLoaded {
        request_id: RequestId,
        path: PathBuf,
        content: HighlightedContent,
    },
    Error {
        request_id: RequestId,
        error: SearchError,
    },
}

impl SearchResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            SearchResponse::SearchCompleted { request_id, .. }
            | SearchResponse::PreviewLoaded { request_id, .. }
            | SearchResponse::Error { request_id, .. } => *request_id,
        }
    }
}
