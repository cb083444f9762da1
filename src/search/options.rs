//! Search configuration and result types.

use crate::catalog::ExtensionSet;
use crate::error::{Result, SearchError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the keyword is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Case-sensitive substring, no pattern syntax
    #[default]
    Literal,
    /// Regular expression matched anywhere in the content
    Regex,
}

impl MatchMode {
    /// The other mode (used by the mode toggle)
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::Literal => MatchMode::Regex,
            MatchMode::Regex => MatchMode::Literal,
        }
    }

    /// Label shown in the terminal UI
    pub fn label(self) -> &'static str {
        match self {
            MatchMode::Literal => "Exact match",
            MatchMode::Regex => "Regular expression",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Literal => write!(f, "literal"),
            MatchMode::Regex => write!(f, "regex"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" | "exact" => Ok(MatchMode::Literal),
            "regex" | "regexp" => Ok(MatchMode::Regex),
            other => Err(SearchError::invalid_input(format!(
                "Unknown match mode: {other}"
            ))),
        }
    }
}

/// Everything one search invocation needs, built fresh per search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub keyword: String,
    pub mode: MatchMode,
    pub extensions: ExtensionSet,
}

impl SearchConfig {
    pub fn new(
        root: impl Into<PathBuf>,
        keyword: impl Into<String>,
        mode: MatchMode,
        extensions: ExtensionSet,
    ) -> Self {
        Self {
            root: root.into(),
            keyword: keyword.into(),
            mode,
            extensions,
        }
    }
}

/// Matching paths in traversal discovery order, plus walk counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    paths: Vec<PathBuf>,
    /// Files whose content was read and tested
    pub files_scanned: usize,
    /// Files that qualified but could not be read
    pub files_skipped: usize,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}
