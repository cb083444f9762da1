//! High-level input service.
//!
//! Polls crossterm events, runs the focus-aware input state machine, and yields
//! domain-level `InputAction`s that the application loop consumes.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Widget holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Folder,
    #[default]
    Keyword,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Folder => Focus::Keyword,
            Focus::Keyword => Focus::Results,
            Focus::Results => Focus::Folder,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Folder => Focus::Results,
            Focus::Keyword => Focus::Folder,
            Focus::Results => Focus::Keyword,
        }
    }

    /// True for the text fields
    pub fn is_text_field(self) -> bool {
        matches!(self, Focus::Folder | Focus::Keyword)
    }
}

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Focused(Focus),
    FileTypeDialog { return_to: Focus },
}

/// Direction for scroll and cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Quit,
    Focus(Focus),
    InsertChar(char),
    DeleteChar,
    ClearField,
    RunSearch,
    ToggleMode,
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    ScrollPreview {
        direction: ScrollDirection,
        lines: u16,
    },
    PreviewPageUp,
    PreviewPageDown,
    CopyFileName,
    CopyFullPath,
    OpenFileTypes,
    DialogMove(ScrollDirection),
    DialogToggle,
    DialogAccept,
    DialogCancel,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

fn is_plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// State machine mapping keys to actions depending on focus.
pub struct InputStateMachine {
    state: InputState,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::with_focus(Focus::default())
    }

    pub fn with_focus(focus: Focus) -> Self {
        Self {
            state: InputState::Focused(focus),
        }
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::FileTypeDialog { return_to } => self.handle_dialog_key(key_event, return_to),
            InputState::Focused(focus) => self.handle_focused_key(key_event, focus),
        }
    }

    fn focus(&mut self, focus: Focus) -> InputAction {
        self.state = InputState::Focused(focus);
        InputAction::Focus(focus)
    }

    fn handle_focused_key(&mut self, key_event: KeyEvent, focus: Focus) -> InputAction {
        let modifiers = key_event.modifiers;

        // Bindings shared by every focus
        match (key_event.code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return InputAction::Quit,
            (KeyCode::Tab, _) => return self.focus(focus.next()),
            (KeyCode::BackTab, _) => return self.focus(focus.previous()),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => return InputAction::ToggleMode,
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.state = InputState::FileTypeDialog { return_to: focus };
                return InputAction::OpenFileTypes;
            }
            (KeyCode::PageUp, _) => return InputAction::PreviewPageUp,
            (KeyCode::PageDown, _) => return InputAction::PreviewPageDown,
            _ => {}
        }

        if focus.is_text_field() {
            match (key_event.code, modifiers) {
                (KeyCode::Enter, _) => InputAction::RunSearch,
                (KeyCode::Esc, _) => self.focus(Focus::Results),
                (KeyCode::Backspace, _) => InputAction::DeleteChar,
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => InputAction::ClearField,
                (KeyCode::Up, _) => InputAction::SelectPrevious,
                (KeyCode::Down, _) => InputAction::SelectNext,
                (KeyCode::Char(ch), modifiers) if is_plain(modifiers) => {
                    InputAction::InsertChar(ch)
                }
                _ => InputAction::InvalidInput,
            }
        } else {
            match (key_event.code, modifiers) {
                (KeyCode::Char('j'), m) if is_plain(m) => InputAction::SelectNext,
                (KeyCode::Down, _) => InputAction::SelectNext,
                (KeyCode::Char('k'), m) if is_plain(m) => InputAction::SelectPrevious,
                (KeyCode::Up, _) => InputAction::SelectPrevious,
                (KeyCode::Char('g'), m) if is_plain(m) => InputAction::SelectFirst,
                (KeyCode::Home, _) => InputAction::SelectFirst,
                (KeyCode::Char('G'), m) if is_plain(m) => InputAction::SelectLast,
                (KeyCode::End, _) => InputAction::SelectLast,
                (KeyCode::Char('J'), m) if is_plain(m) => InputAction::ScrollPreview {
                    direction: ScrollDirection::Down,
                    lines: 1,
                },
                (KeyCode::Char('K'), m) if is_plain(m) => InputAction::ScrollPreview {
                    direction: ScrollDirection::Up,
                    lines: 1,
                },
                (KeyCode::Char(' '), m) if is_plain(m) => InputAction::PreviewPageDown,
                (KeyCode::Char('b'), m) if is_plain(m) => InputAction::PreviewPageUp,
                (KeyCode::Char('y'), m) if is_plain(m) => InputAction::CopyFileName,
                (KeyCode::Char('Y'), m) if is_plain(m) => InputAction::CopyFullPath,
                (KeyCode::Char('/'), m) if is_plain(m) => self.focus(Focus::Keyword),
                (KeyCode::Char('o'), m) if is_plain(m) => self.focus(Focus::Folder),
                (KeyCode::Char('m'), m) if is_plain(m) => InputAction::ToggleMode,
                (KeyCode::Char('t'), m) if is_plain(m) => {
                    self.state = InputState::FileTypeDialog { return_to: focus };
                    InputAction::OpenFileTypes
                }
                (KeyCode::Enter, _) => InputAction::RunSearch,
                (KeyCode::Char('q'), m) if is_plain(m) => InputAction::Quit,
                _ => InputAction::InvalidInput,
            }
        }
    }

    fn handle_dialog_key(&mut self, key_event: KeyEvent, return_to: Focus) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Up, _) => InputAction::DialogMove(ScrollDirection::Up),
            (KeyCode::Char('k'), m) if is_plain(m) => InputAction::DialogMove(ScrollDirection::Up),
            (KeyCode::Down, _) => InputAction::DialogMove(ScrollDirection::Down),
            (KeyCode::Char('j'), m) if is_plain(m) => {
                InputAction::DialogMove(ScrollDirection::Down)
            }
            (KeyCode::Char(' '), _) => InputAction::DialogToggle,
            (KeyCode::Enter, _) => {
                self.state = InputState::Focused(return_to);
                InputAction::DialogAccept
            }
            (KeyCode::Esc, _) => {
                self.state = InputState::Focused(return_to);
                InputAction::DialogCancel
            }
            (KeyCode::Char('q'), m) if is_plain(m) => {
                self.state = InputState::Focused(return_to);
                InputAction::DialogCancel
            }
            _ => InputAction::InvalidInput,
        }
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new(initial_focus: Focus) -> Self {
        Self {
            state_machine: InputStateMachine::with_focus(initial_focus),
        }
    }

    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let timeout = timeout.unwrap_or(Duration::from_millis(50));
        if event::poll(timeout)? {
            let event = event::read()?;
            return Ok(self.process_event(event));
        }
        Ok(None)
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the app loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
    initial_focus: Focus,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new(initial_focus);
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_action(Some(poll_interval)) {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        break;
                    }
                }
                Ok(None) => continue,
                Err(err) => {
                    log::error!("Input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
