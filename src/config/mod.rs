//! Configuration file support for sizechart.
//!
//! Settings are read from `~/.config/sizechart/config.toml`. A missing file
//! means defaults; a present file is validated and out-of-range values are
//! clamped with a warning.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ChartConfig, ExportConfig, InteractionConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [chart]
/// pixels_per_unit = 100.0
/// unit = "ft"
///
/// [interaction]
/// scroll_zoom_factor = 1.2
///
/// [ui]
/// reference = "#f0f"
///
/// [keybindings]
/// write_document = ["W", "Ctrl+S"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub interaction: InteractionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// Warns and clamps `value` into `range`. Non-finite values become `fallback`.
fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64, fallback: f64) {
    if !value.is_finite() {
        log::warn!("Invalid {name} {value}, using {fallback}");
        *value = fallback;
    } else if !(min..=max).contains(value) {
        log::warn!("Invalid {name} {value:.4}, clamping to {min}-{max} range");
        *value = value.clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all numeric settings to usable ranges.
    ///
    /// - `pixels_per_unit`: 0.001 - 1e6
    /// - `initial_scale`: 0.001 - 1000
    /// - `default_overlap`: 0.0 - 2.0
    /// - `pan_fraction`: 0.01 - 1.0
    /// - zoom factors: 1.001 - 16
    /// - scale bases: 1.0001 - 2.0
    /// - `overlap_sensitivity`: 0.0001 - 1.0
    /// - `font_size`: 6.0 - 72.0
    pub fn validate_and_clamp(&mut self) {
        let chart = &mut self.chart;
        clamp_field("pixels_per_unit", &mut chart.pixels_per_unit, 0.001, 1e6, 128.0);
        clamp_field("initial_scale", &mut chart.initial_scale, 0.001, 1000.0, 0.5);
        clamp_field("default_overlap", &mut chart.default_overlap, 0.0, 2.0, 0.75);
        if chart.unit.trim().is_empty() {
            log::warn!("Empty unit label, falling back to 'm'");
            chart.unit = "m".to_string();
        }
        if chart.default_output.trim().is_empty() {
            log::warn!("Empty default_output, falling back to 'chart.svg'");
            chart.default_output = "chart.svg".to_string();
        }

        let interaction = &mut self.interaction;
        clamp_field("pan_fraction", &mut interaction.pan_fraction, 0.01, 1.0, 0.1);
        clamp_field("key_zoom_factor", &mut interaction.key_zoom_factor, 1.001, 16.0, 2.0);
        clamp_field("scroll_zoom_factor", &mut interaction.scroll_zoom_factor, 1.001, 16.0, 1.1);
        clamp_field("scale_base", &mut interaction.scale_base, 1.0001, 2.0, 1.01);
        clamp_field("scale_base_fine", &mut interaction.scale_base_fine, 1.0001, 2.0, 1.001);
        clamp_field("scale_base_coarse", &mut interaction.scale_base_coarse, 1.0001, 2.0, 1.1);
        clamp_field(
            "overlap_sensitivity",
            &mut interaction.overlap_sensitivity,
            0.0001,
            1.0,
            0.01,
        );

        clamp_field("font_size", &mut self.ui.font_size, 6.0, 72.0, 14.0);

        let valid_weight = matches!(
            self.ui.font.weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .ui
            .font
            .weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));
        if !valid_weight {
            log::warn!("Invalid font weight '{}', falling back to 'normal'", self.ui.font.weight);
            self.ui.font.weight = "normal".to_string();
        }
        if !matches!(
            self.ui.font.style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!("Invalid font style '{}', falling back to 'normal'", self.ui.font.style);
            self.ui.font.style = "normal".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sizechart");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it
    /// does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// its keybindings are invalid.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Parses, validates and clamps a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .context("Invalid keybindings")?;
        Ok(config)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.chart.pixels_per_unit, 128.0);
        assert_eq!(config.chart.unit, "m");
        assert!(config.chart.real_units);
        assert_eq!(config.chart.default_output, "chart.svg");
        assert_eq!(config.interaction.scale_base_coarse, 1.1);
        assert_eq!(config.interaction.overlap_sensitivity, 0.01);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            "[chart]\ndefault_overlap = 9.0\n[interaction]\npan_fraction = 0.0\n[ui]\nfont_size = 500.0\n",
        )
        .unwrap();
        assert_eq!(config.chart.default_overlap, 2.0);
        assert_eq!(config.interaction.pan_fraction, 0.01);
        assert_eq!(config.ui.font_size, 72.0);
    }

    #[test]
    fn duplicate_keybindings_are_rejected() {
        let err = Config::from_toml_str("[keybindings]\nscale = [\"D\"]\n").unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate keybinding"));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.chart.unit = "ft".to_string();
        config.export.include_grid = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.chart.unit, "ft");
        assert!(loaded.export.include_grid);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.chart.initial_scale, 0.5);
    }

    #[test]
    fn schema_names_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("keybindings"));
        assert!(schema.contains("pixels_per_unit"));
    }
}
