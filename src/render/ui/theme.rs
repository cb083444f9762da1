//! Styles for the search front end.
//!
//! Plain ratatui `Style`/`Color` values; `--monochrome` swaps in the reversed-video set.

use ratatui::style::{Color, Modifier, Style};

/// Colors and styles used by [`TerminalUI`](super::TerminalUI)
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Keyword highlighting inside the preview
    pub search_match: Style,

    /// Border of the widget holding focus
    pub focused_border: Color,

    /// Border of every other widget
    pub border: Color,

    /// Status bar fill
    pub status_bg: Color,

    /// Status bar text
    pub status_fg: Color,

    /// Status text when the message is an error
    pub error_text: Color,

    /// Selected result / dialog cursor
    pub selection: Style,
}

impl Default for ColorTheme {
    /// Default theme; matches are dark red like the desktop tool's rich text view
    fn default() -> Self {
        Self {
            search_match: Style::default()
                .fg(Color::Rgb(0x8B, 0x00, 0x00))
                .add_modifier(Modifier::BOLD),
            focused_border: Color::Yellow,
            border: Color::DarkGray,
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
            selection: Style::default().fg(Color::White).bg(Color::Blue),
        }
    }
}

impl ColorTheme {
    /// Reverse video only, for terminals without color
    pub fn monochrome() -> Self {
        Self {
            search_match: Style::default().add_modifier(Modifier::REVERSED),
            focused_border: Color::White,
            border: Color::Gray,
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
            selection: Style::default().fg(Color::Black).bg(Color::White),
        }
    }
}
