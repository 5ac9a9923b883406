//! Content view models fetched from the site's JSON files.
//!
//! None of these are validated: every field is a [`JsText`] and missing
//! fields render as `undefined`.

mod js_text;

pub use js_text::{format_number, parse_number, JsText};

use serde::Deserialize;
use serde_json::{Map, Value};

/// A portfolio project, rendered as one card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: JsText,
    #[serde(default)]
    pub summary: JsText,
    /// Cover image URL.
    #[serde(default)]
    pub cover: JsText,
    /// Technology tags, in display order.
    #[serde(default)]
    pub stack: Vec<JsText>,
    #[serde(default)]
    pub link: JsText,
}

/// One entry of the career timeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub date: JsText,
    #[serde(default)]
    pub title: JsText,
    #[serde(default)]
    pub description: JsText,
}

/// A skill chip. `level` is a percentage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: JsText,
    #[serde(default)]
    pub level: JsText,
}

/// Site-wide settings from `config.json`.
///
/// Only `resumeUrl` is consumed; every other key is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteConfig {
    #[serde(default, rename = "resumeUrl")]
    pub resume_url: JsText,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
