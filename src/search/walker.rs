//! Recursive folder search.
//!
//! The walker enumerates regular files below a root in deterministic pre-order
//! (directory entries sorted by file name), filters them by extension, and tests
//! the content of the survivors against a compiled [`ContentMatcher`].
//!
//! ## Traversal policy
//!
//! - Symbolic links are never followed: symlinked directories are not descended
//!   and symlinked files are not read, so the walk is bounded even with link cycles
//! - Entries that cannot be listed or read are logged and skipped
//! - [`FolderWalker::cancel`] stops a running walk before its next entry
//! - The keyword is compiled before the first directory is opened

use crate::catalog::{qualifies, ExtensionSet};
use crate::error::{Result, SearchError};
use crate::search::loader::{ContentLoader, FsContentLoader};
use crate::search::matcher::ContentMatcher;
use crate::search::options::{MatchResult, SearchConfig};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use walkdir::WalkDir;

/// Folder search driver over a pluggable content source.
///
/// Clones share the cancellation flag.
#[derive(Clone)]
pub struct FolderWalker {
    loader: Arc<dyn ContentLoader>,
    cancelled: Arc<AtomicBool>,
}

impl FolderWalker {
    pub fn new(loader: Arc<dyn ContentLoader>) -> Self {
        Self {
            loader,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop running and future walks of this walker and all its clones.
    ///
    /// A cancelled walk returns what it matched so far.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// The content source used for reads
    pub fn loader(&self) -> &Arc<dyn ContentLoader> {
        &self.loader
    }

    /// Run one search.
    ///
    /// # Errors
    /// * `InvalidPattern` - regex keyword does not compile; no file is read
    /// * `PathNotFound` - the root folder does not exist
    /// * `NotADirectory` - the root exists but is not a directory
    pub fn search(&self, config: &SearchConfig) -> Result<MatchResult> {
        let matcher = ContentMatcher::new(&config.keyword, config.mode)?;
        self.search_with(&config.root, &matcher, &config.extensions)
    }

    /// Run one search with an already compiled matcher.
    pub fn search_with(
        &self,
        root: &Path,
        matcher: &ContentMatcher,
        extensions: &ExtensionSet,
    ) -> Result<MatchResult> {
        let root = resolve_root(root)?;
        let mut result = MatchResult::new();

        debug!(
            "Searching {} for {:?} ({}) in [{}]",
            root.display(),
            matcher.keyword(),
            matcher.mode(),
            extensions
        );

        let entries = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in entries {
            if self.is_cancelled() {
                info!("Search in {} cancelled", root.display());
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            // Symlinks report their own type here since links are not followed
            if !entry.file_type().is_file() {
                continue;
            }

            if !qualifies(&entry.file_name().to_string_lossy(), extensions) {
                continue;
            }

            match self.loader.load(entry.path()) {
                Ok(content) => {
                    result.files_scanned += 1;
                    if matcher.is_match(&content) {
                        result.push(entry.into_path());
                    }
                }
                Err(err) => {
                    result.files_skipped += 1;
                    warn!("Skipping {}: {}", entry.path().display(), err);
                }
            }
        }

        info!(
            "Search in {} finished: {} matches, {} files scanned, {} skipped",
            root.display(),
            result.len(),
            result.files_scanned,
            result.files_skipped
        );

        Ok(result)
    }
}

impl Default for FolderWalker {
    fn default() -> Self {
        Self::new(Arc::new(FsContentLoader))
    }
}

impl std::fmt::Debug for FolderWalker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderWalker").finish_non_exhaustive()
    }
}

/// Search the file system with the default loader.
pub fn search(config: &SearchConfig) -> Result<MatchResult> {
    FolderWalker::default().search(config)
}

/// Check the root and make it absolute so result paths are absolute.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SearchError::PathNotFound {
            path: root.to_path_buf(),
        },
        _ => SearchError::file_error(format!("Cannot access folder: {}", root.display()), e),
    })?;

    if !metadata.is_dir() {
        return Err(SearchError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| SearchError::file_error("Cannot resolve current directory", e))?;
        Ok(cwd.join(root))
    }
}
