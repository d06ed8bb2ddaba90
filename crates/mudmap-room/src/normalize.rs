//! Escape sequence stripping
//!
//! MUD output arrives with SGR color codes and erase-in-line sequences mixed
//! into the text. Everything downstream works on the plain text.

use regex::Regex;
use std::sync::OnceLock;

/// `ESC [ <params> m` (SGR) and `ESC [ <params> K` (erase in line)
fn csi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[mK]").expect("CSI pattern is valid"))
}

/// Strip color and erase-in-line sequences from a raw terminal chunk.
///
/// Other control sequences (cursor movement, erase-character) are left in
/// place so the command tracker can still recognise an echoed backspace.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    csi_pattern().replace_all(raw, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        let raw = "\x1b[1;32mThe Town Square\x1b[0m";
        assert_eq!(normalize(raw), "The Town Square");
    }

    #[test]
    fn test_strips_erase_in_line_and_extended_colors() {
        assert_eq!(normalize("\x1b[K\x1b[38;5;196mred\x1b[m"), "red");
    }

    #[test]
    fn test_keeps_cursor_sequences() {
        let backspace = "\x1b[1D\x1b[1X";
        assert_eq!(normalize(backspace), backspace);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }
}
