use crossterm::style::Color;
use thiserror::Error;

/// Simulation speed settings
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    pub rate: f64,                 // Generations per second
    pub acceleration_factor: f64,  // Multiplier applied by speed up/down
    pub min_rate: f64,             // Lowest accepted starting rate
    pub max_rate: f64,             // Speed up never goes past this
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rate: 2.0,
            acceleration_factor: 1.3,
            min_rate: 0.1,
            max_rate: 8.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("acceleration factor must be greater than 1, got {0}")]
    SlowAcceleration(f64),
    #[error("min rate {min} is above max rate {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("rate {rate} is outside [{min}, {max}]")]
    RateOutOfBounds { rate: f64, min: f64, max: f64 },
    #[error("cell width must be 1 or 2, got {0}")]
    CellWidth(u16),
    #[error("invalid color {0:?}, expected #rrggbb")]
    Color(String),
}

impl LifeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("rate", self.rate),
            ("acceleration factor", self.acceleration_factor),
            ("min rate", self.min_rate),
            ("max rate", self.max_rate),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.acceleration_factor <= 1.0 {
            return Err(ConfigError::SlowAcceleration(self.acceleration_factor));
        }
        if self.min_rate > self.max_rate {
            return Err(ConfigError::InvertedBounds { min: self.min_rate, max: self.max_rate });
        }
        if self.rate < self.min_rate || self.rate > self.max_rate {
            return Err(ConfigError::RateOutOfBounds {
                rate: self.rate,
                min: self.min_rate,
                max: self.max_rate,
            });
        }
        Ok(())
    }
}

/// How the board is drawn in the terminal
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub cell_width: u16,   // Terminal columns per cell
    pub max_extent: i64,   // Viewport never leaves [-max_extent, max_extent]
    pub draw_char: char,
    pub alive_color: Color,
    pub grid_color: Color,
    pub cursor_color: Color,
    pub show_grid: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: 2,
            max_extent: 65536,
            draw_char: '█',
            alive_color: Color::Rgb { r: 0xa0, g: 0xa0, b: 0xa0 },
            grid_color: Color::Rgb { r: 0x80, g: 0x80, b: 0x80 },
            cursor_color: Color::Yellow,
            show_grid: true,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.cell_width) {
            return Err(ConfigError::CellWidth(self.cell_width));
        }
        if self.max_extent <= 0 {
            return Err(ConfigError::NotPositive { name: "max extent", value: self.max_extent as f64 });
        }
        Ok(())
    }
}

/// Parse a `#rrggbb` color
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| ConfigError::Color(s.to_string()))
    };
    if hex.len() != 6 {
        return Err(ConfigError::Color(s.to_string()));
    }
    Ok(Color::Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}
