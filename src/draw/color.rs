//! RGBA color type and the chart's default palette.

/// RGBA color with components in the range 0.0 to 1.0.
///
/// # Examples
///
/// ```
/// use sizechart::draw::Color;
/// let teal = Color::rgb(0.0, 0.47, 0.47);
/// assert_eq!(teal.to_hex(), "#007878");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// `#rrggbb` form used for SVG stroke and fill attributes. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Perceived brightness, used to pick a contrasting outline.
    pub fn brightness(&self) -> f64 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }
}

pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);
pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

/// Ruler line at world Y = 0 (`#077`).
pub const RULER_ZERO: Color = Color::rgb(0.0, 0.466_666_666_666_666_7, 0.466_666_666_666_666_7);
/// Every other ruler line and label (`#770`).
pub const RULER: Color = Color::rgb(0.466_666_666_666_666_7, 0.466_666_666_666_666_7, 0.0);
