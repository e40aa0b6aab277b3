//! Font descriptor for HUD and annotation text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Family, weight and style, resolved by Pango at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FontDescriptor {
    /// Installed font family name ("Sans", "Monospace", ...)
    pub family: String,
    /// "normal", "bold", "light" or a numeric weight
    pub weight: String,
    /// "normal", "italic" or "oblique"
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Pango description string, e.g. `"Sans Bold 14"`.
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];
        for extra in [&self.style, &self.weight] {
            if !extra.eq_ignore_ascii_case("normal") && !extra.is_empty() {
                parts.push(capitalize_first(extra));
            }
        }
        parts.push(format!("{}", size.round().max(1.0) as i32));
        parts.join(" ")
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
