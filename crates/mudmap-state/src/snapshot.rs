//! Read-only state view handed to renderers

use crate::StateError;
use mudmap_room::RoomInfo;
use serde::{Deserialize, Serialize};

/// Copy of the session state at one point in time.
///
/// `rooms` is a list of `(id, room)` pairs. Snapshots taken from a session
/// list them sorted by id; ones built or decoded elsewhere may not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub mapping_enabled: bool,
    pub last_command: String,
    pub rooms: Vec<(String, RoomInfo)>,
    pub previous_room_id: Option<String>,
    pub current_room_id: Option<String>,
    pub current_room: Option<RoomInfo>,
}

impl StateSnapshot {
    /// Look up a recorded room by id
    pub fn room(&self, id: &str) -> Option<&RoomInfo> {
        self.rooms
            .iter()
            .find(|(room_id, _)| room_id == id)
            .map(|(_, room)| room)
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }
}
