//! Presentation-independent search session.
//!
//! The session owns everything the user has entered (folder, keyword, mode, file
//! types) and everything the last search produced (results, selection, preview).
//! Front ends call its command handlers and forward the [`SearchCommand`]s they
//! return to the search worker; responses come back through the `accept_*`
//! methods, which drop anything superseded by a newer request.

use crate::catalog::ExtensionSet;
use crate::error::{Result, SearchError};
use crate::render::protocol::{RequestId, SearchCommand};
use crate::search::{HighlightedContent, MatchMode, MatchResult, SearchConfig};
use std::path::{Path, PathBuf};

pub const MSG_EMPTY_KEYWORD: &str = "Please enter a search keyword";
pub const MSG_NO_FOLDER: &str = "Please choose a folder to search";
pub const MSG_NO_FILE_TYPES: &str = "Please select at least one file type";

/// Keyword and mode of the search whose results are on display.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveQuery {
    keyword: String,
    mode: MatchMode,
}

#[derive(Debug)]
pub struct SearchSession {
    /// Folder field text
    pub folder: String,
    /// Keyword field text
    pub keyword: String,
    pub mode: MatchMode,
    extensions: ExtensionSet,

    results: MatchResult,
    selected: Option<usize>,
    preview: Option<HighlightedContent>,
    active_query: Option<ActiveQuery>,

    next_request_id: RequestId,
    latest_search: Option<RequestId>,
    latest_preview: Option<RequestId>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            folder: String::new(),
            keyword: String::new(),
            mode: MatchMode::default(),
            extensions: ExtensionSet::default_selection(),
            results: MatchResult::new(),
            selected: None,
            preview: None,
            active_query: None,
            next_request_id: 1,
            latest_search: None,
            latest_preview: None,
        }
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    pub fn set_extensions(&mut self, extensions: ExtensionSet) {
        self.extensions = extensions;
    }

    pub fn results(&self) -> &MatchResult {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn preview(&self) -> Option<&HighlightedContent> {
        self.preview.as_ref()
    }

    /// True while a search request is awaiting its response
    pub fn is_searching(&self) -> bool {
        self.latest_search.is_some()
    }

    /// Validate the current input and build a search configuration.
    ///
    /// # Errors
    /// * `InvalidInput` for an empty keyword, no folder, or no file types
    pub fn build_config(&self) -> Result<SearchConfig> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(SearchError::invalid_input(MSG_EMPTY_KEYWORD));
        }

        let folder = self.folder.trim();
        if folder.is_empty() {
            return Err(SearchError::invalid_input(MSG_NO_FOLDER));
        }

        if self.extensions.is_empty() {
            return Err(SearchError::invalid_input(MSG_NO_FILE_TYPES));
        }

        Ok(SearchConfig::new(
            PathBuf::from(folder),
            keyword,
            self.mode,
            self.extensions.clone(),
        ))
    }

    /// Start a new search, discarding the previous results.
    ///
    /// Any response to an earlier request is ignored from here on.
    pub fn begin_search(&mut self) -> Result<SearchCommand> {
        let config = self.build_config()?;
        let request_id = self.allocate_request_id();

        self.latest_search = Some(request_id);
        self.latest_preview = None;
        self.results = MatchResult::new();
        self.selected = None;
        self.preview = None;
        self.active_query = Some(ActiveQuery {
            keyword: config.keyword.clone(),
            mode: config.mode,
        });

        Ok(SearchCommand::RunSearch { request_id, config })
    }

    /// Install search results. Returns false for a superseded response.
    pub fn accept_results(&mut self, request_id: RequestId, result: MatchResult) -> bool {
        if self.latest_search != Some(request_id) {
            return false;
        }
        self.latest_search = None;
        self.results = result;
        true
    }

    /// Install a preview. Returns false for a superseded response.
    pub fn accept_preview(&mut self, request_id: RequestId, content: HighlightedContent) -> bool {
        if self.latest_preview != Some(request_id) {
            return false;
        }
        self.latest_preview = None;
        self.preview = Some(content);
        true
    }

    /// Settle a failed request. Returns false if the request was superseded.
    pub fn reject(&mut self, request_id: RequestId) -> bool {
        if self.latest_search == Some(request_id) {
            self.latest_search = None;
            self.active_query = None;
            return true;
        }
        if self.latest_preview == Some(request_id) {
            self.latest_preview = None;
            self.preview = None;
            return true;
        }
        false
    }

    /// Select a result and request its preview.
    ///
    /// Returns `None` if the index is out of range or already selected.
    pub fn select(&mut self, index: usize) -> Option<SearchCommand> {
        if index >= self.results.len() || self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);
        self.preview = None;
        self.preview_command()
    }

    /// Move the selection by `delta`, clamped to the result list
    pub fn move_selection(&mut self, delta: isize) -> Option<SearchCommand> {
        if self.results.is_empty() {
            return None;
        }
        let last = self.results.len() - 1;
        let target = match self.selected {
            None => {
                if delta < 0 {
                    last
                } else {
                    0
                }
            }
            Some(current) => {
                let moved = current as isize + delta;
                moved.clamp(0, last as isize) as usize
            }
        };
        self.select(target)
    }

    pub fn select_first(&mut self) -> Option<SearchCommand> {
        self.select(0)
    }

    pub fn select_last(&mut self) -> Option<SearchCommand> {
        self.select(self.results.len().checked_sub(1)?)
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.results.get(self.selected?)
    }

    /// File name of the selected result, for the "copy file name" action
    pub fn copy_filename(&self) -> Option<String> {
        self.selected_path()?
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Full path of the selected result, for the "copy full path" action
    pub fn copy_full_path(&self) -> Option<String> {
        self.selected_path()
            .map(|path| path.to_string_lossy().into_owned())
    }

    fn preview_command(&mut self) -> Option<SearchCommand> {
        let path = self.selected_path()?.to_path_buf();
        let (keyword, mode) = match &self.active_query {
            Some(query) => (query.keyword.clone(), query.mode),
            None => (String::new(), self.mode),
        };
        let request_id = self.allocate_request_id();
        self.latest_preview = Some(request_id);
        Some(SearchCommand::LoadPreview {
            request_id,
            path,
            keyword,
            mode,
        })
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
