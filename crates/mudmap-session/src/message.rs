//! Renderer messages
//!
//! The view talks back with small JSON objects naming a target and an action,
//! e.g. `{"command":"mapper","action":"toggleMapping"}`. They are decoded into
//! [`Action`] and handled by an exhaustive match in the coordinator.

use crate::SessionError;
use serde::Deserialize;
use std::str::FromStr;

/// Something the renderer asked the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Flip room recording on or off
    ToggleMapping,

    /// Forget all rooms and the current position
    ResetMap,

    /// Write a command to the terminal
    SendCommand(String),

    /// A line typed by the player; a blank line still reaches the terminal
    SendLine(String),

    /// The player's input is exhausted, release the terminal
    EndOfInput,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    command: String,
    action: String,
    #[serde(default)]
    text: Option<String>,
}

impl FromStr for Action {
    type Err = SessionError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        let raw: RawMessage =
            serde_json::from_str(json).map_err(|e| SessionError::UnknownMessage(e.to_string()))?;

        match (raw.command.as_str(), raw.action.as_str()) {
            ("mapper" | "mapControl", "toggleMapping") => Ok(Action::ToggleMapping),
            ("mapper" | "mapControl", "reset") => Ok(Action::ResetMap),
            ("terminal", "sendCommand") => raw.text.map(Action::SendCommand).ok_or_else(|| {
                SessionError::UnknownMessage("terminal/sendCommand without text".to_string())
            }),
            (command, action) => Err(SessionError::UnknownMessage(format!("{command}/{action}"))),
        }
    }
}
