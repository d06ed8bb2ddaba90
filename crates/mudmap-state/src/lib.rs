//! Session state for Mudmap
//!
//! Holds what a running session knows: the rooms discovered while mapping was
//! enabled, where the player is and was, and the last command issued.

pub mod mapper;
pub mod snapshot;
pub mod state;

pub use mapper::{Mapper, RoomEntry};
pub use snapshot::StateSnapshot;
pub use state::SessionState;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
