//! Search-and-highlight engine.
//!
//! - [`options`] - search configuration and result types
//! - [`matcher`] - literal and regex content matching
//! - [`loader`] - best-effort file content loading
//! - [`walker`] - recursive folder search
//! - [`highlight`] - emphasis spans over escaped content
//! - [`worker`] - background worker driving searches for the terminal front end

pub mod highlight;
pub mod loader;
pub mod matcher;
pub mod options;
pub mod walker;
pub mod worker;

pub use highlight::{highlight, HighlightedContent, HtmlMarkup, Markup, Segment};
pub use loader::{decode_lossy, ContentLoader, FsContentLoader};
pub use matcher::{matches, ContentMatcher};
pub use options::{MatchMode, MatchResult, SearchConfig};
pub use walker::{search, FolderWalker};
pub use worker::search_worker_loop;
