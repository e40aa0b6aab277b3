//! Configuration enum types.

use crate::draw::{Color, color::MAGENTA};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification: a name, a hex string, or RGB components.
///
/// # Examples
/// ```toml
/// # Named color
/// selection = "white"
///
/// # Hex color
/// reference = "#f0f"
///
/// # Custom RGB color (0-255 per component)
/// viewport = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, magenta, cyan, white,
    /// black, gray) or hex notation (`#rgb`, `#rrggbb`)
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves to a concrete color. Unknown names fall back to magenta with a
    /// warning so a typo stays visible on screen.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using magenta", name);
                MAGENTA
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }

    pub(crate) fn named(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}
