//! Supported file types and extension filtering.
//!
//! The catalog is a fixed, ordered list of the file types the file-type dialog
//! offers. A search works on an [`ExtensionSet`], the user's selection from (or
//! beyond) that catalog, and [`qualifies`] decides per file name whether its
//! content gets inspected at all.

use std::collections::BTreeSet;
use std::fmt;

/// One selectable file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    /// Extension without the leading dot, lower case
    pub extension: &'static str,
    /// Label shown next to the checkbox
    pub label: &'static str,
}

/// The fixed catalog, in dialog order.
pub const CATALOG: [FileType; 10] = [
    FileType {
        extension: "txt",
        label: "Text files (.txt)",
    },
    FileType {
        extension: "pdf",
        label: "PDF files (.pdf)",
    },
    FileType {
        extension: "docx",
        label: "Word documents (.docx)",
    },
    FileType {
        extension: "xlsx",
        label: "Excel files (.xlsx)",
    },
    FileType {
        extension: "pptx",
        label: "PowerPoint files (.pptx)",
    },
    FileType {
        extension: "csv",
        label: "CSV files (.csv)",
    },
    FileType {
        extension: "html",
        label: "HTML files (.html)",
    },
    FileType {
        extension: "xml",
        label: "XML files (.xml)",
    },
    FileType {
        extension: "json",
        label: "JSON files (.json)",
    },
    FileType {
        extension: "md",
        label: "Markdown files (.md)",
    },
];

/// Number of leading catalog entries selected by default.
pub const DEFAULT_SELECTION_LEN: usize = 5;

/// A set of allowed extensions, normalized to lower case without a leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The default selection: the first five catalog entries
    pub fn default_selection() -> Self {
        CATALOG
            .iter()
            .take(DEFAULT_SELECTION_LEN)
            .map(|file_type| file_type.extension)
            .collect()
    }

    /// Insert an extension. Returns false if it normalized to nothing or was present.
    pub fn insert(&mut self, extension: &str) -> bool {
        match normalize(extension) {
            Some(ext) => self.extensions.insert(ext),
            None => false,
        }
    }

    /// Remove an extension. Returns true if it was present.
    pub fn remove(&mut self, extension: &str) -> bool {
        match normalize(extension) {
            Some(ext) => self.extensions.remove(&ext),
            None => false,
        }
    }

    /// Add the extension if absent, remove it otherwise
    pub fn toggle(&mut self, extension: &str) {
        if !self.remove(extension) {
            self.insert(extension);
        }
    }

    /// Membership test, same normalization as [`insert`](Self::insert)
    pub fn contains(&self, extension: &str) -> bool {
        normalize(extension).is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Extensions in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for ext in iter {
            set.insert(ext.as_ref());
        }
        set
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

fn normalize(extension: &str) -> Option<String> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Extract the extension of a file name: the text after the last dot.
///
/// Returns `None` when there is no dot or nothing follows it.
pub fn extension_of(filename: &str) -> Option<&str> {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Decide whether a file name qualifies for content inspection.
///
/// The comparison is case-insensitive; a name without an extension never qualifies.
/// The extension is only lower-cased, so `"notes.txt "` does not count as `txt`.
pub fn qualifies(filename: &str, allowed: &ExtensionSet) -> bool {
    extension_of(filename).is_some_and(|ext| allowed.extensions.contains(&ext.to_lowercase()))
}
