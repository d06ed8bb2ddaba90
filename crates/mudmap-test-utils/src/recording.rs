//! Collaborators that remember what the session did to them

use mudmap_session::{Renderer, TerminalWriter};
use mudmap_state::StateSnapshot;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Rendered {
    snapshots: Vec<StateSnapshot>,
    errors: Vec<String>,
}

/// Renderer that keeps every snapshot and diagnostic.
///
/// Clones share the same record, so a test can hand one clone to the
/// coordinator and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    inner: Arc<Mutex<Rendered>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Rendered> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshots(&self) -> Vec<StateSnapshot> {
        self.lock().snapshots.clone()
    }

    pub fn last_snapshot(&self) -> Option<StateSnapshot> {
        self.lock().snapshots.last().cloned()
    }

    pub fn update_count(&self) -> usize {
        self.lock().snapshots.len()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }
}

impl Renderer for RecordingRenderer {
    fn update(&mut self, snapshot: &StateSnapshot) {
        self.lock().snapshots.push(snapshot.clone());
    }

    fn notify_error(&mut self, message: &str) {
        self.lock().errors.push(message.to_string());
    }
}

/// Terminal writer that records sent text, or refuses every write
#[derive(Debug, Clone, Default)]
pub struct RecordingTerminal {
    sent: Arc<Mutex<Vec<String>>>,
    broken: bool,
}

impl RecordingTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal whose pipe is already gone
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TerminalWriter for RecordingTerminal {
    fn send_text(&mut self, text: &str) -> io::Result<()> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
