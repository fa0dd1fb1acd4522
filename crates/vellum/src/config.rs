//! Render configuration.
//!
//! A [`RenderConfig`] replaces ambient defaults: every backend is
//! constructed with an explicit configuration carrying the default
//! stroke and text colors. The stock configuration draws black on a
//! light background; [`RenderConfig::dark`] flips both defaults to
//! white.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use vellum_core::Color;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    MissingFile(PathBuf),

    #[error("cannot read configuration file: {0}")]
    Read(String),

    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("invalid color in configuration: {0}")]
    InvalidColor(String),
}

/// Default colors applied when a drawing call does not name its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    draw_color: Color,
    text_color: Color,
}

/// On-disk form of [`RenderConfig`]; colors are validated after parsing.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    draw_color: Option<String>,
    #[serde(default)]
    text_color: Option<String>,
}

impl RenderConfig {
    /// The stock configuration: black strokes, black text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dark-mode configuration: white strokes, white text.
    pub fn dark() -> Self {
        Self {
            draw_color: Color::new("white").unwrap(),
            text_color: Color::new("white").unwrap(),
        }
    }

    /// Replaces the default stroke color.
    pub fn with_draw_color(mut self, color: Color) -> Self {
        self.draw_color = color;
        self
    }

    /// Replaces the default text color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Returns the default stroke color.
    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Returns the default text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Load a configuration from a TOML file.
    ///
    /// Recognized keys: `draw_color`, `text_color`. Missing keys keep
    /// their stock defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        let raw: RawConfig =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let mut config = Self::new();
        if let Some(draw) = raw.draw_color {
            config.draw_color = Color::new(&draw).map_err(ConfigError::InvalidColor)?;
        }
        if let Some(text) = raw.text_color {
            config.text_color = Color::new(&text).map_err(ConfigError::InvalidColor)?;
        }
        Ok(config)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            draw_color: Color::default(),
            text_color: Color::default(),
        }
    }
}
