//! Session state
//!
//! One value per session, owned by the coordinator. Fields are only changed
//! through the coordinator and the [`Mapper`](crate::Mapper).

use crate::snapshot::StateSnapshot;
use mudmap_room::RoomInfo;
use std::collections::HashMap;

/// State of the active session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Whether newly observed rooms are recorded
    pub(crate) mapping_enabled: bool,

    /// Most recently completed command
    pub(crate) last_command: String,

    /// Rooms observed while mapping, keyed by room id
    pub(crate) rooms: HashMap<String, RoomInfo>,

    /// Room the player was in before the current one
    pub(crate) previous_room_id: Option<String>,

    /// Room the player is in
    pub(crate) current_room_id: Option<String>,

    /// Last room seen, recorded or not
    pub(crate) last_seen_room: Option<RoomInfo>,
}

impl SessionState {
    /// Create an empty state: mapping disabled, no rooms, no position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn mapping_enabled(&self) -> bool {
        self.mapping_enabled
    }

    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    pub fn previous_room_id(&self) -> Option<&str> {
        self.previous_room_id.as_deref()
    }

    pub fn current_room_id(&self) -> Option<&str> {
        self.current_room_id.as_deref()
    }

    /// Number of recorded rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Look up a recorded room
    pub fn room(&self, id: &str) -> Option<&RoomInfo> {
        self.rooms.get(id)
    }

    /// Iterate over recorded rooms in no particular order
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &RoomInfo)> {
        self.rooms.iter().map(|(id, room)| (id.as_str(), room))
    }

    /// The room the player is in: the recorded copy when mapped, otherwise
    /// the last room seen.
    pub fn current_room(&self) -> Option<&RoomInfo> {
        let id = self.current_room_id.as_deref()?;
        self.rooms
            .get(id)
            .or_else(|| self.last_seen_room.as_ref().filter(|room| room.id() == id))
    }

    /// Record a completed command.
    pub fn record_command(&mut self, command: impl Into<String>) {
        self.last_command = command.into();
    }

    /// Read-only view for renderers, with rooms as an explicit id list.
    pub fn snapshot(&self) -> StateSnapshot {
        let mut rooms: Vec<(String, RoomInfo)> = self
            .rooms
            .iter()
            .map(|(id, room)| (id.clone(), room.clone()))
            .collect();
        rooms.sort_by(|a, b| a.0.cmp(&b.0));

        StateSnapshot {
            mapping_enabled: self.mapping_enabled,
            last_command: self.last_command.clone(),
            rooms,
            previous_room_id: self.previous_room_id.clone(),
            current_room_id: self.current_room_id.clone(),
            current_room: self.current_room().cloned(),
        }
    }
}
