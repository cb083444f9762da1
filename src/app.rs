//! Application orchestration layer
//!
//! This module wires the search session, the search worker, the input thread and the
//! renderer together. Input actions and worker responses are applied synchronously and
//! yield the [`SearchCommand`]s to forward; `run` only moves messages between channels.

pub mod session;

pub use session::{SearchSession, MSG_EMPTY_KEYWORD, MSG_NO_FILE_TYPES, MSG_NO_FOLDER};

use crate::clipboard::ClipboardSink;
use crate::error::{Result, SearchError};
use crate::input::{spawn_input_thread, Focus, InputAction, ScrollDirection};
use crate::render::protocol::{SearchCommand, SearchResponse};
use crate::render::ui::{FileTypeDialog, UIRenderer, ViewState};
use crate::search::{search_worker_loop, FolderWalker};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const MSG_NO_RESULTS: &str = "No matching files found.";
pub const MSG_NO_SELECTION: &str = "No file selected";

const COMMAND_CHANNEL_CAPACITY: usize = 16;
const RESPONSE_CHANNEL_CAPACITY: usize = 64;
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const WORKER_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Result of applying one input action.
#[derive(Debug, Default, PartialEq)]
pub struct ActionOutcome {
    /// Commands to forward to the search worker, in order
    pub commands: Vec<SearchCommand>,
    pub quit: bool,
}

impl ActionOutcome {
    fn none() -> Self {
        Self::default()
    }

    fn send(command: SearchCommand) -> Self {
        Self {
            commands: vec![command],
            quit: false,
        }
    }

    fn send_opt(command: Option<SearchCommand>) -> Self {
        Self {
            commands: command.into_iter().collect(),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            commands: Vec::new(),
            quit: true,
        }
    }
}

/// Application orchestrator - owns the session and view state, delegates the rest
pub struct Application {
    session: SearchSession,
    view_state: ViewState,
    ui_renderer: Box<dyn UIRenderer>,
    clipboard: Box<dyn ClipboardSink>,
    walker: FolderWalker,
}

impl Application {
    /// Create the application; focus starts on the first empty input field
    pub fn new(
        session: SearchSession,
        ui_renderer: Box<dyn UIRenderer>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Result<Self> {
        let (width, height) = ui_renderer.get_terminal_size()?;
        let focus = if session.folder.trim().is_empty() {
            Focus::Folder
        } else {
            Focus::Keyword
        };

        Ok(Self {
            session,
            view_state: ViewState::new(width, height, focus),
            ui_renderer,
            clipboard,
            walker: FolderWalker::default(),
        })
    }

    /// Replace the walker used by the search worker
    pub fn with_walker(mut self, walker: FolderWalker) -> Self {
        self.walker = walker;
        self
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Commands to issue before any input: a search when folder and keyword were given
    pub fn startup_commands(&mut self) -> Vec<SearchCommand> {
        if self.session.folder.trim().is_empty() || self.session.keyword.trim().is_empty() {
            return Vec::new();
        }
        self.process_action(InputAction::RunSearch).commands
    }

    /// Apply an input action to the session and view state
    pub fn process_action(&mut self, action: InputAction) -> ActionOutcome {
        match action {
            InputAction::Quit => ActionOutcome::quit(),
            InputAction::Focus(focus) => {
                self.view_state.focus = focus;
                ActionOutcome::none()
            }
            InputAction::InsertChar(ch) => {
                if let Some(field) = self.focused_field() {
                    field.push(ch);
                }
                ActionOutcome::none()
            }
            InputAction::DeleteChar => {
                if let Some(field) = self.focused_field() {
                    field.pop();
                }
                ActionOutcome::none()
            }
            InputAction::ClearField => {
                if let Some(field) = self.focused_field() {
                    field.clear();
                }
                ActionOutcome::none()
            }
            InputAction::RunSearch => match self.session.begin_search() {
                Ok(command) => {
                    debug!("search requested: {:?}", command);
                    self.view_state.status_line.clear_message();
                    self.view_state.reset_preview_scroll();
                    ActionOutcome::send(command)
                }
                Err(e) => {
                    self.view_state.status_line.set_error(e.to_string());
                    ActionOutcome::none()
                }
            },
            InputAction::ToggleMode => {
                self.session.mode = self.session.mode.toggled();
                self.view_state
                    .status_line
                    .set_message(format!("Mode: {}", self.session.mode.label()));
                ActionOutcome::none()
            }
            InputAction::SelectNext => self.after_selection(|s| s.move_selection(1)),
            InputAction::SelectPrevious => self.after_selection(|s| s.move_selection(-1)),
            InputAction::SelectFirst => self.after_selection(SearchSession::select_first),
            InputAction::SelectLast => self.after_selection(SearchSession::select_last),
            InputAction::ScrollPreview { direction, lines } => {
                self.scroll_preview(direction, lines);
                ActionOutcome::none()
            }
            InputAction::PreviewPageUp => {
                let page = self.view_state.preview_page_lines();
                self.scroll_preview(ScrollDirection::Up, page);
                ActionOutcome::none()
            }
            InputAction::PreviewPageDown => {
                let page = self.view_state.preview_page_lines();
                self.scroll_preview(ScrollDirection::Down, page);
                ActionOutcome::none()
            }
            InputAction::CopyFileName => {
                let text = self.session.copy_filename();
                self.copy(text);
                ActionOutcome::none()
            }
            InputAction::CopyFullPath => {
                let text = self.session.copy_full_path();
                self.copy(text);
                ActionOutcome::none()
            }
            InputAction::OpenFileTypes => {
                self.view_state.dialog = Some(FileTypeDialog::new(self.session.extensions()));
                ActionOutcome::none()
            }
            InputAction::DialogMove(direction) => {
                if let Some(dialog) = self.view_state.dialog.as_mut() {
                    dialog.move_cursor(direction);
                }
                ActionOutcome::none()
            }
            InputAction::DialogToggle => {
                if let Some(dialog) = self.view_state.dialog.as_mut() {
                    dialog.toggle_current();
                }
                ActionOutcome::none()
            }
            InputAction::DialogAccept => {
                if let Some(dialog) = self.view_state.dialog.take() {
                    let selection = dialog.into_selection();
                    if selection.is_empty() {
                        // Keep the previous selection
                        self.view_state.status_line.set_error(MSG_NO_FILE_TYPES);
                    } else {
                        self.view_state
                            .status_line
                            .set_message(format!("File types: {}", selection));
                        self.session.set_extensions(selection);
                    }
                }
                ActionOutcome::none()
            }
            InputAction::DialogCancel => {
                self.view_state.dialog = None;
                ActionOutcome::none()
            }
            InputAction::Resize { width, height } => {
                self.view_state.update_terminal_size(width, height);
                ActionOutcome::none()
            }
            InputAction::NoAction | InputAction::InvalidInput => ActionOutcome::none(),
        }
    }

    /// Apply a worker response; returns follow-up commands
    pub fn handle_response(&mut self, response: SearchResponse) -> Vec<SearchCommand> {
        match response {
            SearchResponse::SearchCompleted { request_id, result } => {
                let count = result.len();
                let scanned = result.files_scanned;
                let skipped = result.files_skipped;

                if !self.session.accept_results(request_id, result) {
                    debug!("dropping superseded search response {}", request_id);
                    return Vec::new();
                }
                info!(
                    "search {} finished: {} matches, {} files scanned, {} skipped",
                    request_id, count, scanned, skipped
                );

                if count == 0 {
                    self.view_state.status_line.set_message(MSG_NO_RESULTS);
                    return Vec::new();
                }

                if skipped > 0 {
                    self.view_state
                        .status_line
                        .set_message(format!("{} file(s) could not be read", skipped));
                } else {
                    self.view_state.status_line.clear_message();
                }
                self.view_state.reset_preview_scroll();
                self.session.select_first().into_iter().collect()
            }
            SearchResponse::PreviewLoaded {
                request_id,
                path,
                content,
            } => {
                if self.session.accept_preview(request_id, content) {
                    debug!("preview loaded: {}", path.display());
                    self.view_state.reset_preview_scroll();
                }
                Vec::new()
            }
            SearchResponse::Error { request_id, error } => {
                warn!("request {} failed: {}", request_id, error);
                if self.session.reject(request_id) {
                    self.view_state.status_line.set_error(error.to_string());
                }
                Vec::new()
            }
        }
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            INPUT_POLL_INTERVAL,
            self.view_state.focus,
        );

        let result = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        let _ = input_thread.join();
        result
    }

    /// Run against an arbitrary stream of input actions.
    ///
    /// The terminal is released before the worker is joined, and the worker gets
    /// a short grace period to abandon a running walk.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: mpsc::UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.view_state.update_terminal_size(width, height);

        let (search_tx, search_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);
        let worker = tokio::spawn(search_worker_loop(
            search_rx,
            response_tx,
            self.walker.clone(),
        ));

        let result = self
            .event_loop(&search_tx, &mut input_rx, &mut response_rx)
            .await;

        let cleanup = self.ui_renderer.cleanup();

        // Closing the response channel unblocks a worker waiting to deliver
        drop(response_rx);
        self.walker.cancel();
        let _ = search_tx.try_send(SearchCommand::Shutdown);
        if tokio::time::timeout(WORKER_SHUTDOWN_GRACE, worker)
            .await
            .is_err()
        {
            warn!("Search worker still busy at exit, leaving it behind");
        }

        cleanup?;
        result
    }

    async fn event_loop(
        &mut self,
        search_tx: &mpsc::Sender<SearchCommand>,
        input_rx: &mut mpsc::UnboundedReceiver<InputAction>,
        response_rx: &mut mpsc::Receiver<SearchResponse>,
    ) -> Result<()> {
        let startup = self.startup_commands();
        Self::dispatch(search_tx, startup).await?;
        self.ui_renderer.render(&self.session, &self.view_state)?;

        loop {
            tokio::select! {
                maybe_action = input_rx.recv() => {
                    let Some(action) = maybe_action else {
                        // Input thread stopped
                        break;
                    };
                    let outcome = self.process_action(action);
                    Self::dispatch(search_tx, outcome.commands).await?;
                    if outcome.quit {
                        break;
                    }
                }
                maybe_response = response_rx.recv() => {
                    let Some(response) = maybe_response else {
                        return Err(SearchError::other("search worker stopped"));
                    };
                    let commands = self.handle_response(response);
                    Self::dispatch(search_tx, commands).await?;
                }
            }

            self.ui_renderer.render(&self.session, &self.view_state)?;
        }

        Ok(())
    }

    async fn dispatch(
        search_tx: &mpsc::Sender<SearchCommand>,
        commands: Vec<SearchCommand>,
    ) -> Result<()> {
        for command in commands {
            search_tx
                .send(command)
                .await
                .map_err(|_| SearchError::other("search worker unavailable"))?;
        }
        Ok(())
    }

    fn focused_field(&mut self) -> Option<&mut String> {
        match self.view_state.focus {
            Focus::Folder => Some(&mut self.session.folder),
            Focus::Keyword => Some(&mut self.session.keyword),
            Focus::Results => None,
        }
    }

    fn after_selection(
        &mut self,
        select: impl FnOnce(&mut SearchSession) -> Option<SearchCommand>,
    ) -> ActionOutcome {
        let command = select(&mut self.session);
        if command.is_some() {
            self.view_state.reset_preview_scroll();
        }
        ActionOutcome::send_opt(command)
    }

    fn scroll_preview(&mut self, direction: ScrollDirection, lines: u16) {
        let total = self
            .session
            .preview()
            .map_or(0, |preview| preview.line_count());
        self.view_state.scroll_preview(direction, lines, total);
    }

    fn copy(&mut self, text: Option<String>) {
        let Some(text) = text else {
            self.view_state.status_line.set_error(MSG_NO_SELECTION);
            return;
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => self
                .view_state
                .status_line
                .set_message(format!("Copied: {}", text)),
            Err(e) => self.view_state.status_line.set_error(e.to_string()),
        }
    }
}
