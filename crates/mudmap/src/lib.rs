//! Mudmap command-line front end
//!
//! Runs a MUD client (or replays a captured session), shows its output and
//! maintains the room map alongside it.

pub mod app;
pub mod render;
pub mod terminal;
