//! Page settings: resource paths, the DOM selector contract, and effect constants.
//!
//! Defaults reproduce the shipped page. A TOML file can override any subset:
//!
//! ```toml
//! palette = ["#000000", "#FFFFFF"]
//!
//! [effects]
//! reveal_threshold = 0.25
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Skill chip colors, assigned by position.
pub const DEFAULT_PALETTE: [&str; 5] = ["#9F9CF3", "#A7F3D0", "#FECACA", "#FDE68A", "#BFDBFE"];

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoints: Endpoints,
    pub selectors: Selectors,
    pub effects: Effects,
    /// Skill chip background colors.
    pub palette: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            selectors: Selectors::default(),
            effects: Effects::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document, filling gaps with defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Background color for the skill chip at `index`.
    pub fn skill_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return "";
        }
        &self.palette[index % self.palette.len()]
    }
}

/// Relative paths of the four JSON resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub projects: String,
    pub timeline: String,
    pub config: String,
    pub skills: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            projects: "data/projects.json".to_string(),
            timeline: "data/timeline.json".to_string(),
            config: "data/config.json".to_string(),
            skills: "data/skills.json".to_string(),
        }
    }
}

/// Where each renderer and behavior finds its elements.
///
/// Fields ending in `_id` are element ids looked up directly; the rest are
/// CSS selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub projects_grid: String,
    pub skills_marquee: String,
    pub timeline_container: String,
    /// Placeholder anchor patched with the resume URL.
    pub resume_link: String,
    pub stat_number: String,
    pub reveal: String,
    pub hero_content: String,
    pub navbar_id: String,
    pub cursor_dot_id: String,
    pub cursor_outline_id: String,
    pub theme_toggle_id: String,
    pub mobile_menu_toggle_id: String,
    pub mobile_menu_close_id: String,
    pub mobile_menu_id: String,
    pub background_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            projects_grid: "#projects .grid-2".to_string(),
            skills_marquee: ".skills-marquee".to_string(),
            timeline_container: ".timeline-container".to_string(),
            resume_link: "a[href=\"#\"]".to_string(),
            stat_number: ".stat-number".to_string(),
            reveal: ".animated-section, .timeline-container".to_string(),
            hero_content: "#hero .container".to_string(),
            navbar_id: "navbar".to_string(),
            cursor_dot_id: "cursor-dot".to_string(),
            cursor_outline_id: "cursor-outline".to_string(),
            theme_toggle_id: "theme-toggle".to_string(),
            mobile_menu_toggle_id: "mobile-menu-toggle".to_string(),
            mobile_menu_close_id: "mobile-menu-close".to_string(),
            mobile_menu_id: "mobile-menu".to_string(),
            background_id: "animated-background".to_string(),
        }
    }
}

/// Numeric constants of the visual effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    /// Visible fraction that starts a stat counter.
    pub counter_threshold: f64,
    /// Number of animation frames a counter takes to reach its target.
    pub counter_steps: f64,
    /// Scroll offset past which the navbar is marked `scrolled`.
    pub nav_scrolled_offset: f64,
    /// Scroll offset past which scrolling down hides the navbar.
    pub nav_hide_offset: f64,
    /// Visible fraction that reveals an animated section.
    pub reveal_threshold: f64,
    pub hero_speed: f64,
    /// Scroll distance over which the hero fades from 1 to 0.
    pub hero_fade_distance: f64,
    pub background_speed: f64,
    /// Seconds between consecutive timeline item transitions.
    pub timeline_stagger: f64,
    pub skill_text_color: String,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            counter_threshold: 0.5,
            counter_steps: 100.0,
            nav_scrolled_offset: 50.0,
            nav_hide_offset: 100.0,
            reveal_threshold: 0.15,
            hero_speed: 0.4,
            hero_fade_distance: 600.0,
            background_speed: 0.5,
            timeline_stagger: 0.15,
            skill_text_color: "#0F1226".to_string(),
        }
    }
}
