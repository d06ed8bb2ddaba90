//! Room bookkeeping
//!
//! Tracks where the player is and records rooms while mapping is enabled.
//! Rooms are identified by content only; exits stay literal tokens and are
//! never resolved to destination rooms.

use crate::state::SessionState;
use mudmap_room::RoomInfo;
use tracing::{debug, info};

/// What entering a room did to the room collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEntry {
    /// First sighting while mapping, the room was recorded
    Recorded,

    /// Mapping is on but the room was recorded earlier
    AlreadyKnown,

    /// Mapping is off, only the position was updated
    NotMapped,
}

/// Mapping operations over a borrowed session state
pub struct Mapper<'s> {
    state: &'s mut SessionState,
}

impl<'s> Mapper<'s> {
    pub fn new(state: &'s mut SessionState) -> Self {
        Self { state }
    }

    /// Move the player into `room`.
    ///
    /// The position always updates; the room is recorded only when mapping
    /// is enabled and its id is new. A recorded room is never overwritten.
    pub fn on_enter_room(&mut self, room: &RoomInfo) -> RoomEntry {
        if let Some(current) = self.state.current_room_id.take() {
            self.state.previous_room_id = Some(current);
        }
        self.state.current_room_id = Some(room.id().to_string());
        self.state.last_seen_room = Some(room.clone());

        if !self.state.mapping_enabled {
            return RoomEntry::NotMapped;
        }

        if self.state.rooms.contains_key(room.id()) {
            return RoomEntry::AlreadyKnown;
        }

        self.state
            .rooms
            .insert(room.id().to_string(), room.clone());
        debug!(id = room.id(), name = room.name(), "Recorded room");
        RoomEntry::Recorded
    }

    /// Flip the mapping flag and return the new value.
    pub fn toggle_mapping(&mut self) -> bool {
        self.state.mapping_enabled = !self.state.mapping_enabled;
        info!(enabled = self.state.mapping_enabled, "Mapping toggled");
        self.state.mapping_enabled
    }

    /// Forget every room and the player's position and disable mapping.
    pub fn reset(&mut self) {
        self.state.mapping_enabled = false;
        self.state.previous_room_id = None;
        self.state.current_room_id = None;
        self.state.last_seen_room = None;
        self.state.rooms.clear();
    }
}
