//! Content renderers.
//!
//! Each renderer finds its container with a fixed selector and does nothing
//! when the container is missing. Projects and skills replace the
//! container's content; the timeline appends to it.

mod projects;
mod skills;
mod static_content;
mod templates;
mod timeline;

pub use projects::render_projects;
pub use skills::render_skills;
pub use static_content::update_static_content;
pub use timeline::render_timeline;

use thiserror::Error;

use crate::dom::DomError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// What a renderer wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Containers written to; zero when the target was absent.
    pub containers: usize,
    /// Items rendered into each container.
    pub items: usize,
}

impl RenderOutcome {
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn is_skipped(&self) -> bool {
        self.containers == 0
    }
}
