use crate::config::{parse_color, ConfigError, DisplayConfig, LifeConfig};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Contents of `config.toml`. Every field is optional; missing values fall
/// back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub life: LifeSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct LifeSettings {
    pub rate: Option<f64>,
    pub acceleration_factor: Option<f64>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySettings {
    pub cell_width: Option<u16>,
    pub max_extent: Option<i64>,
    pub draw_char: Option<char>,
    pub alive_color: Option<String>,   // "#rrggbb"
    pub grid_color: Option<String>,
    pub cursor_color: Option<String>,
    pub show_grid: Option<bool>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifeterm")
            .join("config.toml")
    }

    pub fn life_config(&self) -> LifeConfig {
        let defaults = LifeConfig::default();
        LifeConfig {
            rate: self.life.rate.unwrap_or(defaults.rate),
            acceleration_factor: self.life.acceleration_factor.unwrap_or(defaults.acceleration_factor),
            min_rate: self.life.min_rate.unwrap_or(defaults.min_rate),
            max_rate: self.life.max_rate.unwrap_or(defaults.max_rate),
        }
    }

    pub fn display_config(&self) -> Result<DisplayConfig, ConfigError> {
        let defaults = DisplayConfig::default();
        let color = |value: &Option<String>, fallback| match value {
            Some(s) => parse_color(s),
            None => Ok(fallback),
        };
        Ok(DisplayConfig {
            cell_width: self.display.cell_width.unwrap_or(defaults.cell_width),
            max_extent: self.display.max_extent.unwrap_or(defaults.max_extent),
            draw_char: self.display.draw_char.unwrap_or(defaults.draw_char),
            alive_color: color(&self.display.alive_color, defaults.alive_color)?,
            grid_color: color(&self.display.grid_color, defaults.grid_color)?,
            cursor_color: color(&self.display.cursor_color, defaults.cursor_color)?,
            show_grid: self.display.show_grid.unwrap_or(defaults.show_grid),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::config::{ConfigError, DisplayConfig, LifeConfig};
    use crossterm::style::Color;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.life_config(), LifeConfig::default());
        assert_eq!(settings.display_config(), Ok(DisplayConfig::default()));
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let settings = Settings::parse(
            r##"
            [life]
            rate = 4.0
            max_rate = 30.0

            [display]
            cell_width = 1
            alive_color = "#ff8800"
            "##,
        )
        .unwrap();

        let life = settings.life_config();
        assert_eq!(life.rate, 4.0);
        assert_eq!(life.max_rate, 30.0);
        assert_eq!(life.acceleration_factor, 1.3);

        let display = settings.display_config().unwrap();
        assert_eq!(display.cell_width, 1);
        assert_eq!(display.alive_color, Color::Rgb { r: 0xff, g: 0x88, b: 0x00 });
        assert_eq!(display.max_extent, 65536);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(Settings::parse("[life]\nrate = \"fast\"").is_err());

        let settings = Settings::parse("[display]\ngrid_color = \"grey\"").unwrap();
        assert_eq!(settings.display_config(), Err(ConfigError::Color("grey".into())));
    }

    #[test]
    fn config_path_ends_in_app_dir() {
        let path = Settings::config_path();
        assert!(path.ends_with("lifeterm/config.toml"));
    }
}
