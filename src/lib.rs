//! # ctxsearch - Folder Content Search with Keyword Highlighting
//!
//! Recursively searches a folder for files whose content contains a keyword,
//! restricted to a chosen set of file extensions, and renders the matches of a
//! file highlighted for preview.
//!
//! ## Features
//!
//! - **Two match modes**: literal substring (SIMD-accelerated via `memchr`) or
//!   regular expression (ripgrep's `grep-regex`)
//! - **Extension filter**: only files with a selected extension are ever read
//! - **Best-effort reads**: unreadable files are logged and skipped, invalid
//!   UTF-8 is decoded lossily
//! - **Highlighting**: HTML fragments for embedding, styled spans in the terminal
//! - **Terminal UI**: folder/keyword fields, result list, live preview, clipboard
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`catalog`] - Supported file types and extension filtering
//! - [`search`] - Matcher, walker, highlighter and the background search worker
//! - [`app`] - Search session and component coordination
//! - [`input`] - Key handling for the terminal UI
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`clipboard`] - System clipboard access for the copy actions
//!
//! ## Example
//!
//! ```no_run
//! use ctxsearch::{search, ExtensionSet, MatchMode, SearchConfig};
//!
//! let config = SearchConfig::new(
//!     "/home/me/notes",
//!     "quarterly",
//!     MatchMode::Literal,
//!     ExtensionSet::default_selection(),
//! );
//! for path in search(&config)?.iter() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), ctxsearch::SearchError>(())
//! ```

// Core modules
pub mod catalog;
pub mod error;
pub mod search;

// Front end
pub mod app;
pub mod clipboard;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{Result, SearchError};

// Public API surface for external usage
pub use app::{Application, SearchSession};
pub use catalog::{qualifies, ExtensionSet, FileType, CATALOG};
pub use search::{
    highlight, matches, search, ContentLoader, ContentMatcher, FolderWalker, HighlightedContent,
    MatchMode, MatchResult, SearchConfig,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
