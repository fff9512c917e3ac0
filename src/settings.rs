//! Session settings chosen on the config screen.

use std::fmt;

use macroquad::color::Color;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GameError;
use crate::game::WallMode;

/// Logical drawing surface, in pixels.
pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 400;
/// Side of one grid cell, in pixels.
pub const CELL_SIZE: u32 = 20;
/// Interval used when a speed setting cannot be understood.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 150;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakeColor {
    #[default]
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    White,
}

impl SnakeColor {
    pub const ALL: [SnakeColor; 6] = [
        SnakeColor::Green,
        SnakeColor::Blue,
        SnakeColor::Yellow,
        SnakeColor::Orange,
        SnakeColor::Purple,
        SnakeColor::White,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SnakeColor::Green => "green",
            SnakeColor::Blue => "blue",
            SnakeColor::Yellow => "yellow",
            SnakeColor::Orange => "orange",
            SnakeColor::Purple => "purple",
            SnakeColor::White => "white",
        }
    }

    pub fn color(self) -> Color {
        match self {
            SnakeColor::Green => Color::new(0.0, 0.8, 0.0, 1.0),
            SnakeColor::Blue => Color::new(0.2, 0.4, 1.0, 1.0),
            SnakeColor::Yellow => Color::new(1.0, 0.9, 0.1, 1.0),
            SnakeColor::Orange => Color::new(1.0, 0.6, 0.0, 1.0),
            SnakeColor::Purple => Color::new(0.6, 0.2, 0.8, 1.0),
            SnakeColor::White => Color::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Look a colour up by label, falling back to green.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_else(|| {
                warn!(label, "unknown snake color, using green");
                SnakeColor::Green
            })
    }
}

/// Named speeds offered by the config screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedPreset {
    VerySlow,
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 5] = [
        SpeedPreset::VerySlow,
        SpeedPreset::Slow,
        SpeedPreset::Normal,
        SpeedPreset::Fast,
        SpeedPreset::VeryFast,
    ];

    pub fn interval_ms(self) -> u32 {
        match self {
            SpeedPreset::VerySlow => 250,
            SpeedPreset::Slow => 200,
            SpeedPreset::Normal => 150,
            SpeedPreset::Fast => 100,
            SpeedPreset::VeryFast => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::VerySlow => "very-slow",
            SpeedPreset::Slow => "slow",
            SpeedPreset::Normal => "normal",
            SpeedPreset::Fast => "fast",
            SpeedPreset::VeryFast => "very-fast",
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ms)", self.label(), self.interval_ms())
    }
}

/// Parse a speed setting: a preset name or a positive number of milliseconds.
pub fn parse_tick_interval(value: &str) -> Result<u32, GameError> {
    let value = value.trim();
    if let Some(preset) = SpeedPreset::ALL.into_iter().find(|p| p.label().eq_ignore_ascii_case(value)) {
        return Ok(preset.interval_ms());
    }
    match value.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(GameError::InvalidConfig(format!("speed {value:?} is not a preset or a positive number"))),
    }
}

/// [`parse_tick_interval`], falling back to [`DEFAULT_TICK_INTERVAL_MS`].
pub fn tick_interval_or_default(value: &str) -> u32 {
    parse_tick_interval(value).unwrap_or_else(|err| {
        warn!(%err, fallback_ms = DEFAULT_TICK_INTERVAL_MS, "using default speed");
        DEFAULT_TICK_INTERVAL_MS
    })
}

/// Values handed to a new session by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub snake_color: SnakeColor,
    pub wall_mode: WallMode,
    pub tick_interval_ms: u32,
    pub auto_speed: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            snake_color: SnakeColor::Green,
            wall_mode: WallMode::Deadly,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            auto_speed: false,
        }
    }
}

impl GameSettings {
    /// Build settings from the raw strings a form would submit.
    pub fn from_labels(color: &str, wall_mode: &str, speed: &str, auto_speed: bool) -> Self {
        let wall_mode = match wall_mode.trim().to_ascii_lowercase().as_str() {
            "wrap" => WallMode::Wrap,
            "deadly" => WallMode::Deadly,
            other => {
                warn!(wall_mode = other, "unknown wall mode, using deadly");
                WallMode::Deadly
            }
        };
        Self {
            snake_color: SnakeColor::from_label(color),
            wall_mode,
            tick_interval_ms: tick_interval_or_default(speed),
            auto_speed,
        }
    }

    /// Replace a zero interval, which would tick every frame, with the default.
    pub fn validated(mut self) -> Self {
        if self.tick_interval_ms == 0 {
            warn!(fallback_ms = DEFAULT_TICK_INTERVAL_MS, "tick interval of 0ms, using default speed");
            self.tick_interval_ms = DEFAULT_TICK_INTERVAL_MS;
        }
        self
    }
}
