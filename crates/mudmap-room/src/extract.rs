//! Room block extraction
//!
//! A room block is recognised by two markers: the top border of the mini-map
//! (a line containing `+-`) and the bracketed `[Obvious Exits: ...]` line.
//! The layout this targets looks like:
//!
//! ```text
//! <1234hp 567sp> The Town Square
//! +-------[ 85% ]-------+
//! |    o    o    |  You stand in the middle of the square.
//! |     \  /     |  Merchants hawk their wares.
//! |   o--X--o    |
//! +--------------+
//! [Obvious Exits: n e s w (u)]
//! ```
//!
//! The room name sits on the closest line above the map (possibly carried by a
//! prompt), the mini-map is the `|`-bounded block, and the description is the
//! text trailing the right border of each boxed line.

use crate::room::RoomInfo;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Marker the recognition gate looks for
const EXITS_MARKER: &str = "Obvious Exits";

/// Marker of the exits line used to bound the description
const EXITS_LINE_MARKER: &str = "Obvious Exits:";

/// Top border of the mini-map
const MAP_MARKER: &str = "+-";

/// Literal label that opens the bracketed exits segment
const EXITS_LABEL: &str = "[Obvious Exits:";

fn prompt_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^<.*> (.*)$").expect("prompt pattern is valid"))
}

fn counter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*[0-9]+").expect("counter pattern is valid"))
}

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[\s*([0-9]+%)\s*\]").expect("percent pattern is valid"))
}

fn map_row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\|(.*)\|").expect("map row pattern is valid"))
}

fn boxed_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[|+](.*)?[|+](.*)$").expect("boxed line pattern is valid"))
}

fn exits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[Obvious Exits:( ?\(?[A-Za-z0-9_]\)?)+\]").expect("exits pattern is valid")
    })
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Recognise a room block in normalized text.
///
/// Returns `None` when the text is not a room: either marker is missing, or no
/// name or exit list can be recovered. A returned room always has a non-empty
/// name and at least one exit.
pub fn extract_room_info(text: &str) -> Option<RoomInfo> {
    if text.is_empty() {
        return None;
    }

    if !text.contains(EXITS_MARKER) || !text.contains(MAP_MARKER) {
        return None;
    }

    let lines: Vec<&str> = text.split('\n').collect();

    let Some(name) = extract_name(&lines) else {
        trace!("Room markers present but no name found");
        return None;
    };

    let Some(exits) = extract_exits(text) else {
        trace!("Room markers present but no exits segment found");
        return None;
    };

    let room = RoomInfo::new(
        name,
        extract_percent(text),
        extract_minimap(&lines),
        extract_description(&lines),
        exits,
    );

    debug!(
        id = room.id(),
        name = room.name(),
        exits = ?room.exits(),
        "Extracted room"
    );

    Some(room)
}

/// Find the room name above the first line that starts the map.
///
/// Scanning upward, the first non-empty line that is not a numeric counter is
/// the name. A game prompt (`<...> Name`) carries the name after its closing
/// `>` and ends the scan either way.
pub fn extract_name(lines: &[&str]) -> Option<String> {
    let map_start = lines.iter().position(|line| line.starts_with(MAP_MARKER))?;

    for line in lines[..map_start].iter().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('<') {
            return prompt_pattern()
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|name| name.as_str().to_string())
                .filter(|name| !name.is_empty());
        }

        if !counter_pattern().is_match(line) {
            return Some(line.to_string());
        }
    }

    None
}

/// First bracketed percentage, without brackets (`"[ 85% ]"` gives `"85%"`).
pub fn extract_percent(text: &str) -> String {
    percent_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Collect the `|`-bounded rows of the mini-map.
///
/// Starts at the first line containing `+-`, skips non-map lines until the
/// first row is found and stops at the first non-row after that.
pub fn extract_minimap(lines: &[&str]) -> Vec<String> {
    let Some(map_start) = lines.iter().position(|line| line.contains(MAP_MARKER)) else {
        return Vec::new();
    };

    let mut minimap = Vec::new();

    for line in &lines[map_start..] {
        let row = if line.starts_with('|') {
            map_row_pattern()
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        } else {
            None
        };

        match row {
            Some(row) => minimap.push(row),
            None if !minimap.is_empty() => break,
            None => {}
        }
    }

    minimap
}

/// Rebuild the description from the text trailing each boxed line between
/// the map start and the exits line.
pub fn extract_description(lines: &[&str]) -> String {
    let map_start = lines.iter().position(|line| line.contains(MAP_MARKER));
    let exits_line = lines.iter().position(|line| line.contains(EXITS_LINE_MARKER));

    let (Some(map_start), Some(exits_line)) = (map_start, exits_line) else {
        return String::new();
    };
    if map_start >= exits_line {
        return String::new();
    }

    let segments: Vec<&str> = lines[map_start..exits_line]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter_map(|line| boxed_line_pattern().captures(line))
        .filter_map(|caps| caps.get(2))
        .map(|m| m.as_str().trim())
        .collect();

    whitespace_pattern()
        .replace_all(&segments.join(" "), " ")
        .trim()
        .to_string()
}

/// Exit tokens from the `[Obvious Exits: ...]` segment, in printed order.
pub fn extract_exits(text: &str) -> Option<Vec<String>> {
    let segment = exits_pattern().find(text)?.as_str();
    let tokens = segment
        .strip_prefix(EXITS_LABEL)
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or_default();

    let exits: Vec<String> = tokens.split_whitespace().map(str::to_string).collect();
    if exits.is_empty() {
        None
    } else {
        Some(exits)
    }
}
