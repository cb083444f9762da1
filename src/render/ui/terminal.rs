//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui.
//! It draws what the session and view state hold and never owns search data.

use crate::app::SearchSession;
use crate::catalog::CATALOG;
use crate::error::{Result, SearchError};
use crate::input::Focus;
use crate::render::ui::{ColorTheme, FileTypeDialog, UIRenderer, ViewState};
use crate::search::Segment;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn block<'a>(title: String, focused: bool, theme: &ColorTheme) -> Block<'a> {
        let color = if focused {
            theme.focused_border
        } else {
            theme.border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title)
    }

    /// Render a single-line text field; places the cursor when focused
    fn render_text_field(
        frame: &mut Frame,
        area: Rect,
        title: String,
        text: &str,
        focused: bool,
        theme: &ColorTheme,
    ) {
        let field = Paragraph::new(text.to_string()).block(Self::block(title, focused, theme));
        frame.render_widget(field, area);

        if focused {
            let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
            let max_x = area.x + area.width.saturating_sub(2);
            frame.set_cursor((area.x + 1).saturating_add(width).min(max_x), area.y + 1);
        }
    }

    /// Render the result list with the selected entry highlighted
    fn render_results(
        frame: &mut Frame,
        area: Rect,
        session: &SearchSession,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let items: Vec<ListItem> = session
            .results()
            .iter()
            .map(|path| ListItem::new(path.display().to_string()))
            .collect();

        let title = format!("Results ({})", session.results().len());
        let list = List::new(items)
            .block(Self::block(
                title,
                view_state.focus == Focus::Results,
                theme,
            ))
            .highlight_style(theme.selection)
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(session.selected());
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    /// Convert highlighted segments into a styled line
    fn create_highlighted_line<'a>(segments: &[Segment<'a>], theme: &ColorTheme) -> Line<'a> {
        let spans: Vec<Span<'a>> = segments
            .iter()
            .map(|segment| {
                if segment.emphasized {
                    Span::styled(segment.text, theme.search_match)
                } else {
                    Span::raw(segment.text)
                }
            })
            .collect();
        Line::from(spans)
    }

    /// Render the preview pane of the selected file
    fn render_preview(
        frame: &mut Frame,
        area: Rect,
        session: &SearchSession,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let title = match session.selected_path().and_then(|path| path.file_name()) {
            Some(name) => format!("Preview: {}", name.to_string_lossy()),
            None => "Preview".to_string(),
        };
        let block = Self::block(title, false, theme);

        let paragraph = match session.preview() {
            Some(preview) => {
                let lines: Vec<Line> = preview
                    .lines()
                    .iter()
                    .map(|segments| Self::create_highlighted_line(segments, theme))
                    .collect();
                Paragraph::new(lines).scroll((view_state.preview_scroll, 0))
            }
            None if session.selected().is_some() => Paragraph::new("Loading..."),
            None => Paragraph::new(""),
        };

        frame.render_widget(paragraph.block(block), area);
    }

    /// Render status line using theme colors
    fn render_status(
        frame: &mut Frame,
        area: Rect,
        session: &SearchSession,
        view_state: &ViewState,
        theme: &ColorTheme,
    ) {
        let status_text = view_state.status_line.format_status_line(
            session.mode,
            session.results().len(),
            session.is_searching(),
            session.extensions(),
        );

        let fg = if view_state.status_line.is_error {
            theme.error_text
        } else {
            theme.status_fg
        };
        let status = Paragraph::new(status_text).style(Style::default().bg(theme.status_bg).fg(fg));
        frame.render_widget(status, area);
    }

    /// Render the file-type checkbox dialog centered over everything else
    fn render_dialog(frame: &mut Frame, dialog: &FileTypeDialog, theme: &ColorTheme) {
        let area = centered_rect(44, CATALOG.len() as u16 + 4, frame.size());

        let items: Vec<ListItem> = dialog
            .entries()
            .map(|(file_type, checked)| {
                let mark = if checked { "[x]" } else { "[ ]" };
                ListItem::new(format!("{} {}", mark, file_type.label))
            })
            .collect();

        let list = List::new(items)
            .block(Self::block(
                "File types (Space toggle, Enter apply)".to_string(),
                true,
                theme,
            ))
            .highlight_style(theme.selection);

        let mut list_state = ListState::default();
        list_state.select(Some(dialog.cursor));

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw(frame: &mut Frame, session: &SearchSession, view_state: &ViewState, theme: &ColorTheme) {
        let size = frame.size();

        // Folder field, keyword field, body, status line
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(size);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
            .split(rows[2]);

        let dialog_open = view_state.dialog.is_some();

        Self::render_text_field(
            frame,
            rows[0],
            "Folder".to_string(),
            &session.folder,
            !dialog_open && view_state.focus == Focus::Folder,
            theme,
        );
        Self::render_text_field(
            frame,
            rows[1],
            format!("Keyword ({})", session.mode.label()),
            &session.keyword,
            !dialog_open && view_state.focus == Focus::Keyword,
            theme,
        );
        Self::render_results(frame, body[0], session, view_state, theme);
        Self::render_preview(frame, body[1], session, view_state, theme);
        Self::render_status(frame, rows[3], session, view_state, theme);

        if let Some(dialog) = &view_state.dialog {
            Self::render_dialog(frame, dialog, theme);
        }
    }
}

/// A rectangle of at most `width` x `height` centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, session: &SearchSession, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                Self::draw(frame, session, view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()
            .map_err(|e| SearchError::ui(format!("Cannot read terminal size: {e}")))?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
