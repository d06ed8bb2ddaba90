//! Stable room identity
//!
//! A room id is a SHA-256 digest over a length-prefixed encoding of the
//! room's name, mini-map rows, description and exits, truncated to 16 bytes
//! and hex encoded. The encoding is order-sensitive: swapping two exits or two
//! map rows yields a different id.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in an id (32 hex characters)
const ID_BYTES: usize = 16;

/// Area names are appended to room titles after this separator
const AREA_SEPARATOR: &str = " - ";

/// Leading articles dropped from short names
const ARTICLES: [&str; 3] = ["a ", "an ", "the "];

/// Borrowed view of the fields that make up a room's identity
#[derive(Debug, Clone, Copy)]
pub struct IdentityFields<'a> {
    pub name: &'a str,
    pub minimap: &'a [String],
    pub description: &'a str,
    pub exits: &'a [String],
}

/// Derive the content id for a room.
pub fn generate_id(fields: &IdentityFields<'_>) -> String {
    let mut hasher = Sha256::new();

    update_str(&mut hasher, fields.name);
    update_list(&mut hasher, fields.minimap);
    update_str(&mut hasher, fields.description);
    update_list(&mut hasher, fields.exits);

    let digest = hasher.finalize();
    hex::encode(&digest[..ID_BYTES])
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_list(hasher: &mut Sha256, values: &[String]) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        update_str(hasher, value);
    }
}

/// Shorten a room title for display.
///
/// Drops anything after the first `" - "` and then a single leading article.
/// An empty name maps to `"?"`.
pub fn short_name(name: &str) -> String {
    if name.is_empty() {
        return "?".to_string();
    }

    let base = name.split(AREA_SEPARATOR).next().unwrap_or(name).trim();

    for article in ARTICLES {
        let matches = base
            .get(..article.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(article));
        if matches {
            return base[article.len()..].trim().to_string();
        }
    }

    base.to_string()
}
