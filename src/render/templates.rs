//! Askama template structs for the rendered sections.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Content is interpolated unescaped, exactly as fetched.

use askama::Template;

use crate::models::{Project, Skill, TimelineEvent};

/// All project cards of the grid.
#[derive(Template)]
#[template(path = "projects.html", escape = "none")]
pub struct ProjectCards<'a> {
    pub projects: &'a [Project],
}

/// One skill with its assigned chip color.
pub struct SkillChip<'a> {
    pub skill: &'a Skill,
    pub color: &'a str,
}

/// The chip list shared by every marquee.
#[derive(Template)]
#[template(path = "skills.html", escape = "none")]
pub struct SkillChips<'a> {
    pub chips: Vec<SkillChip<'a>>,
    pub text_color: &'a str,
}

/// Inner markup of one timeline item.
#[derive(Template)]
#[template(path = "timeline_item.html", escape = "none")]
pub struct TimelineItem<'a> {
    pub event: &'a TimelineEvent,
}
