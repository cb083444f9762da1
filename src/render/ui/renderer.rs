//! Renderer seam between the application loop and the terminal.
//!
//! `Application` only talks to a `UIRenderer`, so the loop can be driven in tests
//! without a terminal.

use crate::app::SearchSession;
use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw one frame: input fields, result list, highlighted preview, status
    /// line, and the file-type dialog on top when it is open.
    fn render(&mut self, session: &SearchSession, view_state: &ViewState) -> Result<()>;

    /// Take over the terminal (raw mode, alternate screen)
    fn initialize(&mut self) -> Result<()>;

    /// Give the terminal back; safe to call twice
    fn cleanup(&mut self) -> Result<()>;

    /// (width, height) in cells
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
