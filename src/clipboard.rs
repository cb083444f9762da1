//! Clipboard access for the copy actions.
//!
//! The system clipboard is opened lazily once; when no clipboard is available
//! (headless session, no display server) every copy fails with a clipboard error
//! instead of aborting the application.

use crate::error::{Result, SearchError};
use arboard::Clipboard;

/// Destination of the "copy file name" / "copy full path" actions.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard.
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("System clipboard unavailable: {}", e);
                None
            }
        };
        Self { clipboard }
    }

    pub fn is_available(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| SearchError::clipboard("clipboard not available"))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| SearchError::clipboard(e.to_string()))
    }
}
