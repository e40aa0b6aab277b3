//! Small helpers shared by the config, prompt and codec layers.

use crate::draw::{Color, color::*};

// ============================================================================
// Color Parsing
// ============================================================================

/// Maps a color name or hex string to a [`Color`].
///
/// # Supported forms (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "magenta"/"pink", "cyan",
///   "white", "black", "gray"/"grey", "teal", "olive"
/// - `#rgb` and `#rrggbb`
pub fn name_to_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "magenta" | "pink" => Some(MAGENTA),
        "cyan" => Some(CYAN),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "gray" | "grey" => Some(GRAY),
        "teal" => Some(RULER_ZERO),
        "olive" => Some(RULER),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<char> = hex.chars().collect();
    match chars.as_slice() {
        [r, g, b] => Some(Color::from_rgb8(
            digit(*r)? * 17,
            digit(*g)? * 17,
            digit(*b)? * 17,
        )),
        [r1, r2, g1, g2, b1, b2] => Some(Color::from_rgb8(
            digit(*r1)? * 16 + digit(*r2)?,
            digit(*g1)? * 16 + digit(*g2)?,
            digit(*b1)? * 16 + digit(*b2)?,
        )),
        _ => None,
    }
}

// ============================================================================
// String Helpers
// ============================================================================

/// Longest common prefix of all `items`, respecting char boundaries.
/// Returns an empty string for an empty slice.
pub fn common_prefix<S: AsRef<str>>(items: &[S]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut prefix = first.as_ref();
    for item in rest {
        let item = item.as_ref();
        let shared = prefix
            .char_indices()
            .zip(item.chars())
            .find(|((_, a), b)| a != b)
            .map(|((index, _), _)| index)
            .unwrap_or_else(|| prefix.len().min(item.len()));
        prefix = &prefix[..shared];
    }
    prefix.to_string()
}
