//! Snapshot renderers
//!
//! The summary renderer prints one status line per change, the JSON renderer
//! prints one snapshot document per line for other tools to consume.

use crossterm::style::{Color, Stylize};
use mudmap_session::Renderer;
use mudmap_state::StateSnapshot;
use std::io::Write;
use tracing::warn;

/// One colored status line per update
pub struct SummaryRenderer<W> {
    out: W,
    color: bool,
}

impl<W: Write + Send> SummaryRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn summary(&self, snapshot: &StateSnapshot) -> String {
        let mapping = if snapshot.mapping_enabled {
            self.paint("mapping on", Color::Green)
        } else {
            self.paint("mapping off", Color::DarkGrey)
        };

        let here = match &snapshot.current_room {
            Some(room) => {
                let mut here = self.paint(room.short_name(), Color::Cyan);
                if !room.percent().is_empty() {
                    here.push_str(&format!(" [{}]", room.percent()));
                }
                format!("{here} exits: {}", room.exits().join(" "))
            }
            None => "?".to_string(),
        };

        format!(
            "{mapping} | rooms: {} | here: {here} | last: {}",
            snapshot.rooms.len(),
            snapshot.last_command
        )
    }
}

impl<W: Write + Send> Renderer for SummaryRenderer<W> {
    fn update(&mut self, snapshot: &StateSnapshot) {
        let line = self.summary(snapshot);
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!("Failed to write summary: {}", e);
        }
    }

    fn notify_error(&mut self, message: &str) {
        let line = self.paint(&format!("error: {message}"), Color::Red);
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!("Failed to write diagnostic: {}", e);
        }
    }
}

/// Snapshots as JSON lines
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!("Failed to write snapshot: {}", e);
        }
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn update(&mut self, snapshot: &StateSnapshot) {
        match snapshot.to_json() {
            Ok(json) => self.write_line(&json),
            Err(e) => warn!("Failed to encode snapshot: {}", e),
        }
    }

    fn notify_error(&mut self, message: &str) {
        let line = serde_json::json!({ "error": message }).to_string();
        self.write_line(&line);
    }
}
