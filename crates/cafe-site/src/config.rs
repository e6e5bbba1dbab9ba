// File: cafe-site/src/config.rs
// Purpose: Configuration parsing from cafe.toml

use anyhow::{Context, Result};
use cafe_notify::NotifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Page configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub notifications: NotifierConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub effects: EffectsConfig,
}

/// Navbar and section highlighting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// Scroll distance after which the navbar gets the `scrolled` class
    #[serde(default = "default_scrolled_threshold")]
    pub scrolled_threshold: f64,

    /// Added to the scroll position when deciding which section is active
    #[serde(default = "default_active_offset")]
    pub active_offset: f64,

    /// Height of the fixed navbar, kept clear when scrolling to a section
    #[serde(default = "default_navbar_height")]
    pub navbar_height: f64,
}

/// Decorative scroll effects and reveal timings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectsConfig {
    #[serde(default = "default_parallax_rate")]
    pub parallax_rate: f64,

    #[serde(default = "default_bean_base_speed")]
    pub bean_base_speed: f64,

    #[serde(default = "default_bean_speed_step")]
    pub bean_speed_step: f64,

    #[serde(default = "default_bean_rotation_rate")]
    pub bean_rotation_rate: f64,

    /// Degrees of extra rotation per bean index
    #[serde(default = "default_bean_rotation_step")]
    pub bean_rotation_step: f64,

    #[serde(default = "default_menu_stagger_ms")]
    pub menu_stagger_ms: u64,

    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,

    #[serde(default = "default_counter_frame_ms")]
    pub counter_frame_ms: u64,
}

// Default values
fn default_scrolled_threshold() -> f64 {
    100.0
}

fn default_active_offset() -> f64 {
    100.0
}

fn default_navbar_height() -> f64 {
    80.0
}

fn default_parallax_rate() -> f64 {
    -0.5
}

fn default_bean_base_speed() -> f64 {
    0.5
}

fn default_bean_speed_step() -> f64 {
    0.1
}

fn default_bean_rotation_rate() -> f64 {
    0.1
}

fn default_bean_rotation_step() -> f64 {
    60.0
}

fn default_menu_stagger_ms() -> u64 {
    100
}

fn default_counter_duration_ms() -> u64 {
    2_000
}

fn default_counter_frame_ms() -> u64 {
    16
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: default_scrolled_threshold(),
            active_offset: default_active_offset(),
            navbar_height: default_navbar_height(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            parallax_rate: default_parallax_rate(),
            bean_base_speed: default_bean_base_speed(),
            bean_speed_step: default_bean_speed_step(),
            bean_rotation_rate: default_bean_rotation_rate(),
            bean_rotation_step: default_bean_rotation_step(),
            menu_stagger_ms: default_menu_stagger_ms(),
            counter_duration_ms: default_counter_duration_ms(),
            counter_frame_ms: default_counter_frame_ms(),
        }
    }
}

impl SiteConfig {
    /// Parse configuration from TOML text. Blank text gives the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).context("Failed to parse site configuration")
    }

    /// Load configuration from cafe.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
