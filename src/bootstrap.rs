//! One-shot page bootstrap: load, render, then wire up behaviors.

use tracing::{error, info};

use crate::config::Settings;
use crate::dom::Document;
use crate::events::Runtime;
use crate::interactive::{initialize_interactive_elements, IconRenderer, InteractiveHandles};
use crate::loader::{load_site_data, Fetcher, SiteData};
use crate::render::{
    render_projects, render_skills, render_timeline, update_static_content, RenderError,
    RenderOutcome,
};

/// Page sections filled from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Projects,
    Timeline,
    Skills,
}

/// Everything a finished bootstrap did.
#[derive(Debug, Default)]
pub struct BootReport {
    /// Sections whose content was present, with what was written.
    pub rendered: Vec<(Section, RenderOutcome)>,
    /// Whether the resume link was patched.
    pub resume_linked: bool,
    pub interactive: InteractiveHandles,
}

impl BootReport {
    pub fn outcome(&self, section: Section) -> Option<RenderOutcome> {
        self.rendered
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, outcome)| *outcome)
    }
}

/// Load the site content, render it, and initialize interactive elements.
pub async fn boot<D: Document>(
    runtime: &mut Runtime<D>,
    fetcher: &dyn Fetcher,
    icons: &mut dyn IconRenderer,
    settings: &Settings,
) -> BootReport {
    let data = load_site_data(fetcher, &settings.endpoints).await;
    apply(runtime, data, icons, settings)
}

/// Render loaded content and initialize interactive elements.
///
/// Absent resources are skipped; interactive elements are always
/// initialized, exactly once.
pub fn apply<D: Document>(
    runtime: &mut Runtime<D>,
    data: SiteData,
    icons: &mut dyn IconRenderer,
    settings: &Settings,
) -> BootReport {
    info!(
        projects = data.projects.is_some(),
        timeline = data.timeline.is_some(),
        config = data.config.is_some(),
        skills = data.skills.is_some(),
        "site data loaded"
    );

    let mut report = BootReport::default();
    let doc = runtime.doc_mut();

    if let Some(projects) = &data.projects {
        record(&mut report, Section::Projects, render_projects(doc, settings, projects));
    }
    if let Some(events) = &data.timeline {
        record(&mut report, Section::Timeline, render_timeline(doc, settings, events));
    }
    if let Some(config) = &data.config {
        report.resume_linked = update_static_content(doc, settings, config);
    }
    if let Some(skills) = &data.skills {
        record(&mut report, Section::Skills, render_skills(doc, settings, skills));
    }

    report.interactive = initialize_interactive_elements(runtime, icons, settings);
    report
}

fn record(report: &mut BootReport, section: Section, result: Result<RenderOutcome, RenderError>) {
    match result {
        Ok(outcome) => report.rendered.push((section, outcome)),
        Err(err) => error!(section = ?section, error = %err, "rendering failed"),
    }
}
