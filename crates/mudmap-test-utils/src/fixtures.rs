use anyhow::{Context, Result};
use mudmap_room::RoomInfo;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ROOMS_JSON: &str = include_str!("fixtures/rooms.json");

/// Captured terminal output and the room it must produce
#[derive(Debug, Clone, Deserialize)]
pub struct RoomFixture {
    pub label: String,
    pub input: String,
    pub output: RoomInfo,
}

/// All bundled room fixtures
pub fn room_fixtures() -> Result<Vec<RoomFixture>> {
    serde_json::from_str(ROOMS_JSON).context("Failed to parse bundled room fixtures")
}

pub struct TestFixtures {
    temp_dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Write a captured session for replay
    pub fn create_capture(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write capture {}", path.display()))?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

// Common test data
pub mod data {
    /// Keystroke echo for typing `look` and pressing enter
    pub const TYPED_LOOK: &[&str] = &["l", "o", "o", "k", "\r\n"];

    pub const CHATTER: &str = "Gandalf says, 'A wizard is never late.'\r\n";

    pub const COLORED_CHATTER: &str =
        "\x1b[1;33mThe sun rises in the east.\x1b[0m\r\n\x1b[K";

    /// A minimal, uncolored room block
    pub fn room_block(name: &str, description: &str, exits: &str) -> String {
        format!(
            "{name}\r\n+-----+\r\n|  X  | {description}\r\n+-----+\r\n[Obvious Exits: {exits}]\r\n"
        )
    }

    /// A session where the player types `look` and gets `room` back
    pub fn look_session(room: &str) -> Vec<String> {
        let mut chunks: Vec<String> = TYPED_LOOK.iter().map(|c| c.to_string()).collect();
        chunks.push(room.to_string());
        chunks.push(CHATTER.to_string());
        chunks
    }
}
