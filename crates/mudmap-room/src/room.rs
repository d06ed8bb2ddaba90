//! Extracted room facts

use crate::identity::{generate_id, short_name, IdentityFields};
use crate::RoomError;
use serde::{Deserialize, Serialize};

/// Everything recognised about one room block.
///
/// Values are immutable once built: `short_name` and `id` are derived from
/// the other fields at construction time and cannot drift from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    /// Full room title
    name: String,

    /// Display name without area suffix or leading article
    short_name: String,

    /// Status indicator shown near the map (e.g. `85%`), empty if absent
    percent: String,

    /// Mini-map rows, borders removed
    minimap: Vec<String>,

    /// Whitespace-collapsed description
    description: String,

    /// Exit tokens in printed order
    exits: Vec<String>,

    /// Content hash over name, minimap, description and exits
    id: String,
}

impl RoomInfo {
    /// Build a room from its extracted fields, deriving short name and id.
    pub fn new(
        name: impl Into<String>,
        percent: impl Into<String>,
        minimap: Vec<String>,
        description: impl Into<String>,
        exits: Vec<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        let id = generate_id(&IdentityFields {
            name: &name,
            minimap: &minimap,
            description: &description,
            exits: &exits,
        });

        Self {
            short_name: short_name(&name),
            name,
            percent: percent.into(),
            minimap,
            description,
            exits,
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn percent(&self) -> &str {
        &self.percent
    }

    pub fn minimap(&self) -> &[String] {
        &self.minimap
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn exits(&self) -> &[String] {
        &self.exits
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The fields that participate in the room id
    pub fn identity(&self) -> IdentityFields<'_> {
        IdentityFields {
            name: &self.name,
            minimap: &self.minimap,
            description: &self.description,
            exits: &self.exits,
        }
    }

    /// Whether the stored id matches the room's content
    pub fn has_consistent_id(&self) -> bool {
        generate_id(&self.identity()) == self.id
    }

    /// Parse a room from its JSON form (`name, shortName, percent, minimap,
    /// description, exits, id`).
    pub fn from_json(json: &str) -> Result<Self, RoomError> {
        let room: Self = serde_json::from_str(json)?;
        if room.name.is_empty() {
            return Err(RoomError::InvalidRoom("room name is empty".to_string()));
        }
        Ok(room)
    }

    /// Serialize the room to JSON
    pub fn to_json(&self) -> Result<String, RoomError> {
        Ok(serde_json::to_string(self)?)
    }
}
