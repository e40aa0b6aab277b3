//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{FontDescriptor, FrameStyle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chart defaults applied to a fresh scene and to newly loaded sprites.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChartConfig {
    /// Pixels per real-world unit written to new documents
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f64,

    /// Real-world unit label (e.g. "m", "ft")
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Start with grid labels in real units instead of pixels
    #[serde(default = "default_real_units")]
    pub real_units: bool,

    /// Initial canvas zoom (device pixels per world pixel)
    #[serde(default = "default_initial_scale")]
    pub initial_scale: f64,

    /// Overlap assigned to newly loaded sprites (valid range: 0.0 - 2.0)
    #[serde(default = "default_overlap")]
    pub default_overlap: f64,

    /// Pre-filled path in the write prompt
    #[serde(default = "default_output")]
    pub default_output: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: default_pixels_per_unit(),
            unit: default_unit(),
            real_units: default_real_units(),
            initial_scale: default_initial_scale(),
            default_overlap: default_overlap(),
            default_output: default_output(),
        }
    }
}

/// Sensitivities of the pan, zoom and drag-adjust gestures.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Fraction of the visible area panned per arrow key press
    #[serde(default = "default_pan_fraction")]
    pub pan_fraction: f64,

    /// Zoom factor for the keyboard zoom bindings
    #[serde(default = "default_key_zoom_factor")]
    pub key_zoom_factor: f64,

    /// Zoom factor per scroll step
    #[serde(default = "default_scroll_zoom_factor")]
    pub scroll_zoom_factor: f64,

    /// Exponential scale base per pixel of vertical motion
    #[serde(default = "default_scale_base")]
    pub scale_base: f64,

    /// Scale base while Ctrl is held
    #[serde(default = "default_scale_base_fine")]
    pub scale_base_fine: f64,

    /// Scale base while Shift is held
    #[serde(default = "default_scale_base_coarse")]
    pub scale_base_coarse: f64,

    /// Overlap change per pixel of horizontal motion
    #[serde(default = "default_overlap_sensitivity")]
    pub overlap_sensitivity: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pan_fraction: default_pan_fraction(),
            key_zoom_factor: default_key_zoom_factor(),
            scroll_zoom_factor: default_scroll_zoom_factor(),
            scale_base: default_scale_base(),
            scale_base_fine: default_scale_base_fine(),
            scale_base_coarse: default_scale_base_coarse(),
            overlap_sensitivity: default_overlap_sensitivity(),
        }
    }
}

/// On-screen colors and HUD text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Grid color while labels are in pixels
    #[serde(default = "default_pixel_grid")]
    pub pixel_grid: ColorSpec,

    /// Grid color while labels are in real units
    #[serde(default = "default_unit_grid")]
    pub unit_grid: ColorSpec,

    #[serde(default = "default_reference")]
    pub reference: ColorSpec,

    #[serde(default = "default_selection")]
    pub selection: ColorSpec,

    #[serde(default = "default_cursor")]
    pub cursor: ColorSpec,

    #[serde(default = "default_viewport")]
    pub viewport: ColorSpec,

    /// Outline of viewports with zero or negative extent
    #[serde(default = "default_invalid_viewport")]
    pub invalid_viewport: ColorSpec,

    #[serde(default = "default_hud")]
    pub hud: ColorSpec,

    /// Show the mode/selection/status lines
    #[serde(default = "default_show_hud")]
    pub show_hud: bool,

    /// HUD and label font size in points (valid range: 6.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    #[serde(default)]
    pub font: FontDescriptor,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            pixel_grid: default_pixel_grid(),
            unit_grid: default_unit_grid(),
            reference: default_reference(),
            selection: default_selection(),
            cursor: default_cursor(),
            viewport: default_viewport(),
            invalid_viewport: default_invalid_viewport(),
            hud: default_hud(),
            show_hud: default_show_hud(),
            font_size: default_font_size(),
            font: FontDescriptor::default(),
        }
    }
}

impl UiConfig {
    /// Resolves the configured colors into a frame style.
    pub fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            background: self.background.to_color(),
            pixel_grid: self.pixel_grid.to_color().with_alpha(0.6),
            unit_grid: self.unit_grid.to_color().with_alpha(0.6),
            reference: self.reference.to_color(),
            selection: self.selection.to_color(),
            cursor: self.cursor.to_color(),
            viewport: self.viewport.to_color(),
            invalid_viewport: self.invalid_viewport.to_color(),
            hud: self.hud.to_color(),
            ..FrameStyle::default()
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory viewport PNGs are written to
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,

    /// Draw the measurement grid into exported images
    #[serde(default)]
    pub include_grid: bool,

    /// chrono format string prefixed to exported file names; empty disables it
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            include_grid: false,
            filename_prefix: default_filename_prefix(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn default_pixels_per_unit() -> f64 {
    crate::scene::DEFAULT_PPU
}

fn default_unit() -> String {
    crate::scene::DEFAULT_UNIT.to_string()
}

fn default_real_units() -> bool {
    true
}

fn default_initial_scale() -> f64 {
    0.5
}

fn default_overlap() -> f64 {
    crate::scene::DEFAULT_OVERLAP
}

fn default_output() -> String {
    "chart.svg".to_string()
}

fn default_pan_fraction() -> f64 {
    0.1
}

fn default_key_zoom_factor() -> f64 {
    2.0
}

fn default_scroll_zoom_factor() -> f64 {
    1.1
}

fn default_scale_base() -> f64 {
    1.01
}

fn default_scale_base_fine() -> f64 {
    1.001
}

fn default_scale_base_coarse() -> f64 {
    1.1
}

fn default_overlap_sensitivity() -> f64 {
    0.01
}

fn default_background() -> ColorSpec {
    ColorSpec::named("black")
}

fn default_pixel_grid() -> ColorSpec {
    ColorSpec::named("gray")
}

fn default_unit_grid() -> ColorSpec {
    ColorSpec::named("#770")
}

fn default_reference() -> ColorSpec {
    ColorSpec::named("magenta")
}

fn default_selection() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_cursor() -> ColorSpec {
    ColorSpec::named("cyan")
}

fn default_viewport() -> ColorSpec {
    ColorSpec::named("orange")
}

fn default_invalid_viewport() -> ColorSpec {
    ColorSpec::named("red")
}

fn default_hud() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_show_hud() -> bool {
    true
}

fn default_font_size() -> f64 {
    14.0
}

fn default_export_directory() -> PathBuf {
    PathBuf::from("viewports")
}

fn default_filename_prefix() -> String {
    String::new()
}
