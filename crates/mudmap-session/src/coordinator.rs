//! Per-chunk orchestration
//!
//! The coordinator owns the session state exclusively. Every chunk is taken
//! through normalize, command tracking, room extraction and the mapper before
//! the next one is looked at, so no locking is involved.

use crate::message::Action;
use crate::tracker::CommandTracker;
use crate::SessionError;
use mudmap_room::{extract_room_info, normalize, RoomInfo};
use mudmap_state::{Mapper, RoomEntry, SessionState, StateSnapshot};
use std::io;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Presentation side of the session
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send {
    /// Called after every change to the session state
    fn update(&mut self, snapshot: &StateSnapshot);

    /// One-off diagnostic, e.g. a failed terminal stream
    fn notify_error(&mut self, message: &str);
}

/// Outbound half of the terminal
#[cfg_attr(test, mockall::automock)]
pub trait TerminalWriter: Send {
    fn send_text(&mut self, text: &str) -> io::Result<()>;
}

/// Cancels a running stream loop from anywhere
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Arc<watch::Sender<bool>>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.0.borrow()
    }
}

/// What one chunk did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkOutcome {
    /// Command completed by this chunk
    pub command: Option<String>,

    /// Room recognised in this chunk
    pub room: Option<RoomInfo>,

    /// How the mapper handled that room
    pub entry: Option<RoomEntry>,
}

impl ChunkOutcome {
    pub fn changed(&self) -> bool {
        self.command.is_some() || self.room.is_some()
    }
}

/// Drives the session state from terminal output and renderer actions
pub struct SessionCoordinator {
    id: Uuid,
    state: SessionState,
    tracker: CommandTracker,
    renderer: Box<dyn Renderer>,
    terminal: Option<Box<dyn TerminalWriter>>,
    shutdown: Arc<watch::Sender<bool>>,
    failure_reported: bool,
    disposed: bool,
}

impl SessionCoordinator {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        let (shutdown, _) = watch::channel(false);
        let id = Uuid::new_v4();
        debug!(session = %id, "Session created");

        Self {
            id,
            state: SessionState::new(),
            tracker: CommandTracker::new(),
            renderer,
            terminal: None,
            shutdown: Arc::new(shutdown),
            failure_reported: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    pub fn tracker(&self) -> &CommandTracker {
        &self.tracker
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown.clone())
    }

    pub(crate) fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// A new stream is about to be consumed
    pub(crate) fn begin_stream(&mut self) {
        self.failure_reported = false;
        debug!(session = %self.id, "Terminal stream started");
    }

    /// Store the outbound terminal handle once a stream is available.
    pub fn attach_terminal(&mut self, terminal: Box<dyn TerminalWriter>) {
        if self.disposed {
            return;
        }
        self.terminal = Some(terminal);
    }

    pub fn detach_terminal(&mut self) {
        self.terminal = None;
    }

    pub fn is_attached(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Process one raw chunk of terminal output.
    pub fn on_terminal_data(&mut self, raw: &str) -> ChunkOutcome {
        let mut outcome = ChunkOutcome::default();
        if self.disposed {
            return outcome;
        }

        let text = normalize(raw);
        if text.is_empty() {
            return outcome;
        }

        if let Some(command) = self.tracker.track(&text) {
            self.state.record_command(command.clone());
            outcome.command = Some(command);
        }

        if let Some(room) = extract_room_info(&text) {
            outcome.entry = Some(Mapper::new(&mut self.state).on_enter_room(&room));
            outcome.room = Some(room);
        }

        if outcome.changed() {
            self.tick();
        }
        outcome
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::ToggleMapping => {
                self.toggle_mapping();
            }
            Action::ResetMap => self.reset_map(),
            Action::SendCommand(text) => {
                self.send_command(&text);
            }
            Action::SendLine(line) => {
                self.send_line(&line);
            }
            Action::EndOfInput => {
                debug!(session = %self.id, "Player input closed");
                self.detach_terminal();
            }
        }
    }

    /// Decode and handle a JSON message from the renderer.
    pub fn handle_message(&mut self, json: &str) -> Result<(), SessionError> {
        match json.parse::<Action>() {
            Ok(action) => {
                self.handle_action(action);
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring renderer message: {}", e);
                self.renderer.notify_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Record `text` as the last command and write it to the terminal.
    pub fn try_send_command(&mut self, text: &str) -> Result<(), SessionError> {
        if self.disposed {
            return Err(SessionError::NotAttached);
        }

        let command = text.trim();
        if command.is_empty() {
            return Err(SessionError::EmptyCommand);
        }

        self.state.record_command(command);
        self.tick();

        let terminal = self.terminal.as_mut().ok_or(SessionError::NotAttached)?;
        terminal.send_text(&format!("{command}\n"))?;
        Ok(())
    }

    /// Fire-and-forget variant of [`Self::try_send_command`]; true when the
    /// terminal accepted the write.
    pub fn send_command(&mut self, text: &str) -> bool {
        match self.try_send_command(text) {
            Ok(()) => true,
            Err(SessionError::EmptyCommand) => false,
            Err(e) => {
                debug!("Command not delivered: {}", e);
                false
            }
        }
    }

    /// Send a line typed by the player. A blank line is written as a bare
    /// line ending and not recorded; anything else is a command.
    pub fn send_line(&mut self, line: &str) -> bool {
        if !line.trim().is_empty() {
            return self.send_command(line);
        }
        if self.disposed {
            return false;
        }

        let Some(terminal) = self.terminal.as_mut() else {
            return false;
        };
        match terminal.send_text("\n") {
            Ok(()) => true,
            Err(e) => {
                debug!("Line not delivered: {}", e);
                false
            }
        }
    }

    pub fn toggle_mapping(&mut self) -> bool {
        let enabled = Mapper::new(&mut self.state).toggle_mapping();
        self.tick();
        enabled
    }

    pub fn reset_map(&mut self) {
        Mapper::new(&mut self.state).reset();
        self.tick();
    }

    /// Surface a stream failure to the renderer, once per stream.
    pub fn report_stream_failure(&mut self, message: &str) {
        if self.failure_reported || self.disposed {
            return;
        }
        self.failure_reported = true;
        self.renderer
            .notify_error(&format!("Terminal stream failed: {message}"));
    }

    /// Push the current state to the renderer
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }
        let snapshot = self.state.snapshot();
        self.renderer.update(&snapshot);
    }

    /// Tear the session down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.shutdown.send_replace(true);
        self.terminal = None;
        self.tracker.clear();
        self.state.reset();
        info!(session = %self.id, "Session disposed");
    }
}

impl Drop for SessionCoordinator {
    fn drop(&mut self) {
        self.dispose();
    }
}
