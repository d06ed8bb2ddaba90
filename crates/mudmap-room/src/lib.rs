//! Room recognition for Mudmap
//!
//! Turns ANSI-colored MUD output into structured room facts: the room name,
//! its mini-map, description and exits, plus a content-based identity used to
//! recognise the same room when it is seen again.

pub mod extract;
pub mod identity;
pub mod normalize;
pub mod room;

pub use extract::extract_room_info;
pub use identity::{generate_id, short_name, IdentityFields};
pub use normalize::normalize;
pub use room::RoomInfo;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("Invalid room: {0}")]
    InvalidRoom(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
