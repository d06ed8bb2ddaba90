//! Typed command reconstruction
//!
//! Interactive typing is echoed by the terminal a keystroke at a time, while
//! game output arrives in large writes. Chunks shorter than
//! [`KEYSTROKE_THRESHOLD`] characters are treated as keystroke echo and
//! accumulated; a line ending completes the command.

use tracing::trace;

/// Echo of a backspace: cursor left one column, erase one character
pub const BACKSPACE_ECHO: &str = "\x1b[1D\x1b[1X";

/// Chunks with fewer characters than this are keystroke echo
pub const KEYSTROKE_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackerState {
    /// Nothing typed since the last completed command
    #[default]
    Idle,

    /// Keystrokes are being collected
    Accumulating,
}

/// Rebuilds the last command typed by the user from echoed chunks
#[derive(Debug, Default)]
pub struct CommandTracker {
    pending: String,
    state: TrackerState,
}

impl CommandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one normalized chunk; returns the command it completed, if any.
    pub fn track(&mut self, chunk: &str) -> Option<String> {
        if chunk == BACKSPACE_ECHO {
            self.pending.pop();
            return None;
        }

        let ends_line = chunk.contains(|c: char| c == '\n' || c == '\r');

        if chunk.chars().count() < KEYSTROKE_THRESHOLD {
            if ends_line {
                return Some(self.complete());
            }
            self.pending.push_str(chunk);
            self.state = TrackerState::Accumulating;
            return None;
        }

        // Bulk output: only completes an echo that was already being typed
        if ends_line && !self.pending.is_empty() {
            return Some(self.complete());
        }

        None
    }

    fn complete(&mut self) -> String {
        self.state = TrackerState::Idle;
        let command = std::mem::take(&mut self.pending);
        trace!(command = %command, "Command completed");
        command
    }

    /// Keystrokes collected so far
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Drop any partially typed command
    pub fn clear(&mut self) {
        self.pending.clear();
        self.state = TrackerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(tracker: &mut CommandTracker, chunks: &[&str]) -> Vec<String> {
        chunks.iter().filter_map(|chunk| tracker.track(chunk)).collect()
    }

    #[test]
    fn test_keystrokes_complete_on_newline() {
        let mut tracker = CommandTracker::new();
        let completed = feed(&mut tracker, &["w", "a", "l", "k"]);
        assert!(completed.is_empty());
        assert_eq!(tracker.pending(), "walk");
        assert_eq!(tracker.state(), TrackerState::Accumulating);

        assert_eq!(tracker.track("\n").as_deref(), Some("walk"));
        assert_eq!(tracker.pending(), "");
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_carriage_return_completes() {
        let mut tracker = CommandTracker::new();
        assert_eq!(feed(&mut tracker, &["lo", "ok", "\r\n"]), vec!["look"]);
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut tracker = CommandTracker::new();
        let completed = feed(&mut tracker, &["n", "e", BACKSPACE_ECHO, "w", "\r"]);
        assert_eq!(completed, vec!["nw"]);
    }

    #[test]
    fn test_backspace_on_empty_buffer() {
        let mut tracker = CommandTracker::new();
        assert_eq!(tracker.track(BACKSPACE_ECHO), None);
        assert_eq!(tracker.pending(), "");
    }

    #[test]
    fn test_bulk_output_is_not_a_command() {
        let mut tracker = CommandTracker::new();
        assert_eq!(tracker.track("some game text\n"), None);
        assert_eq!(tracker.pending(), "");
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn test_bulk_output_completes_pending_echo() {
        let mut tracker = CommandTracker::new();
        feed(&mut tracker, &["s", "o", "u", "t", "h"]);
        assert_eq!(tracker.track("\r\nYou go south.\r\n").as_deref(), Some("south"));
    }

    #[test]
    fn test_bulk_output_without_line_end_keeps_pending() {
        let mut tracker = CommandTracker::new();
        feed(&mut tracker, &["u", "p"]);
        assert_eq!(tracker.track("A bell rings."), None);
        assert_eq!(tracker.pending(), "up");
    }

    #[test]
    fn test_threshold_counts_characters() {
        let mut tracker = CommandTracker::new();
        // Four characters, five bytes
        assert_eq!(tracker.track("café"), None);
        assert_eq!(tracker.pending(), "café");
    }

    #[test]
    fn test_enter_on_empty_buffer_completes_empty_command() {
        let mut tracker = CommandTracker::new();
        assert_eq!(tracker.track("\n").as_deref(), Some(""));
    }
}
