//! UI state management structures
//!
//! This module contains the view state for rendering: focus, dialog, preview
//! scroll offset and the status line. Search data lives in the session.

use crate::catalog::{ExtensionSet, FileType, CATALOG};
use crate::input::{Focus, ScrollDirection};
use crate::search::MatchMode;

/// Rows taken by the two input fields, the preview borders and the status line
const CHROME_ROWS: u16 = 3 + 3 + 2 + 1;

/// View state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// Widget holding keyboard focus
    pub focus: Focus,

    /// Open file-type dialog, if any
    pub dialog: Option<FileTypeDialog>,

    /// First preview line shown
    pub preview_scroll: u16,

    /// Status line content
    pub status_line: StatusLine,

    /// Terminal dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16, focus: Focus) -> Self {
        Self {
            focus,
            dialog: None,
            preview_scroll: 0,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Lines visible inside the preview pane
    pub fn preview_page_lines(&self) -> u16 {
        self.viewport_height.saturating_sub(CHROME_ROWS).max(1)
    }

    /// Scroll the preview, keeping the last line reachable but not beyond
    pub fn scroll_preview(&mut self, direction: ScrollDirection, lines: u16, total_lines: usize) {
        let max_scroll = u16::try_from(total_lines.saturating_sub(1)).unwrap_or(u16::MAX);
        self.preview_scroll = match direction {
            ScrollDirection::Up => self.preview_scroll.saturating_sub(lines),
            ScrollDirection::Down => self.preview_scroll.saturating_add(lines).min(max_scroll),
        };
    }

    pub fn reset_preview_scroll(&mut self) {
        self.preview_scroll = 0;
    }

    /// Update terminal dimensions
    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }
}

/// Checkbox dialog over the extension catalog.
///
/// Edits a copy of the selection; the caller applies it only on accept.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTypeDialog {
    pub cursor: usize,
    pub selection: ExtensionSet,
}

impl FileTypeDialog {
    pub fn new(current: &ExtensionSet) -> Self {
        Self {
            cursor: 0,
            selection: current.clone(),
        }
    }

    pub fn move_cursor(&mut self, direction: ScrollDirection) {
        self.cursor = match direction {
            ScrollDirection::Up => self.cursor.saturating_sub(1),
            ScrollDirection::Down => (self.cursor + 1).min(CATALOG.len() - 1),
        };
    }

    pub fn toggle_current(&mut self) {
        self.selection.toggle(CATALOG[self.cursor].extension);
    }

    /// Catalog entries with their checked state, in dialog order
    pub fn entries(&self) -> impl Iterator<Item = (&'static FileType, bool)> + '_ {
        CATALOG
            .iter()
            .map(|file_type| (file_type, self.selection.contains(file_type.extension)))
    }

    pub fn into_selection(self) -> ExtensionSet {
        self.selection
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    /// Render the message as an error
    pub is_error: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an informational message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.is_error = false;
    }

    /// Format the status line: mode, result summary, file types, message
    pub fn format_status_line(
        &self,
        mode: MatchMode,
        result_count: usize,
        searching: bool,
        extensions: &ExtensionSet,
    ) -> String {
        let summary = if searching {
            "Searching...".to_string()
        } else if result_count == 1 {
            "1 match".to_string()
        } else {
            format!("{} matches", result_count)
        };

        match &self.message {
            Some(message) => format!(
                "{} | {} | {} | {}",
                mode.label(),
                summary,
                extensions,
                message
            ),
            None => format!("{} | {} | {}", mode.label(), summary, extensions),
        }
    }
}
