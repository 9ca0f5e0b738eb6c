//! Application settings with JSON persistence

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::common::color::Rgba;
use crate::common::types::Dimensions;
use crate::constants::{text, window};

fn default_title() -> String {
    window::TITLE.to_string()
}

fn default_window_width() -> u32 {
    window::WIDTH
}

fn default_window_height() -> u32 {
    window::HEIGHT
}

fn default_clear_color() -> String {
    window::CLEAR_COLOR.to_string()
}

fn default_font_name() -> String {
    text::FONT_NAME.to_string()
}

fn default_font_size() -> f32 {
    text::FONT_SIZE
}

fn default_text() -> String {
    text::CONTENT.to_string()
}

fn default_text_color() -> String {
    text::COLOR.to_string()
}

/// Window and text settings. Every field falls back to its compiled default
/// when absent from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Clear color (#AARRGGBB or #RRGGBB)
    #[serde(default = "default_clear_color")]
    pub clear_color: String,
    /// Font file name looked up in the font directory cache
    #[serde(default = "default_font_name")]
    pub font_name: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            clear_color: default_clear_color(),
            font_name: default_font_name(),
            font_size: default_font_size(),
            text: default_text(),
            text_color: default_text_color(),
        }
    }
}

impl AppConfig {
    /// Location of the config file under the user's config directory
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location, or use defaults if no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from `config_path`. A missing file yields defaults; nothing is written.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", config_path))?;

        info!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    pub fn window_size(&self) -> Dimensions {
        Dimensions::new(self.window_width, self.window_height)
    }

    pub fn clear_color(&self) -> Rgba {
        parse_or_default(&self.clear_color, window::CLEAR_COLOR, "clear_color")
    }

    pub fn text_color(&self) -> Rgba {
        parse_or_default(&self.text_color, text::COLOR, "text_color")
    }
}

fn parse_or_default(value: &str, fallback: &str, field: &str) -> Rgba {
    Rgba::parse_hex(value).unwrap_or_else(|| {
        error!(
            field = field,
            value = value,
            fallback = fallback,
            "Invalid hex color, using default"
        );
        Rgba::parse_hex(fallback).unwrap_or(Rgba::BLACK)
    })
}
