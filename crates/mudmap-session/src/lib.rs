//! Session processing for Mudmap
//!
//! Consumes the terminal stream chunk by chunk and keeps the session state
//! current: reconstructs typed commands, recognises rooms, updates the map
//! and tells the renderer when something changed.

pub mod coordinator;
pub mod decoder;
pub mod message;
pub mod stream;
pub mod tracker;

pub use coordinator::{ChunkOutcome, Renderer, SessionCoordinator, ShutdownHandle, TerminalWriter};
pub use decoder::ChunkDecoder;
pub use message::Action;
pub use stream::{SessionLoop, StreamEnd};
pub use tracker::{CommandTracker, TrackerState};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown renderer message: {0}")]
    UnknownMessage(String),

    #[error("No terminal attached")]
    NotAttached,

    #[error("Empty command")]
    EmptyCommand,
}
