use askama::Template;
use tracing::debug;

use super::templates::ProjectCards;
use super::{RenderError, RenderOutcome};
use crate::config::Settings;
use crate::dom::Document;
use crate::models::Project;

/// Replace the project grid with one card per project, in input order.
pub fn render_projects(
    doc: &mut dyn Document,
    settings: &Settings,
    projects: &[Project],
) -> Result<RenderOutcome, RenderError> {
    let selector = &settings.selectors.projects_grid;
    let Some(container) = doc.query_selector(selector) else {
        debug!(selector = %selector, "project grid not on page");
        return Ok(RenderOutcome::skipped());
    };

    let html = ProjectCards { projects }.render()?;
    doc.set_inner_html(container, &html);

    Ok(RenderOutcome {
        containers: 1,
        items: projects.len(),
    })
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use serde_json::json;

    use super::*;
    use crate::dom::{MemoryDocument, NodeId};

    fn page() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let section = doc.append_element(body, "section", &[("id", "projects")]).unwrap();
        let grid = doc.append_element(section, "div", &[("class", "grid-2")]).unwrap();
        (doc, grid)
    }

    fn texts(fragment: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        fragment
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    #[test]
    fn renders_one_card_per_project() {
        let (mut doc, grid) = page();
        let projects: Vec<Project> = serde_json::from_value(json!([
            {"title": "A", "summary": "s", "cover": "c.png", "stack": ["X", "Y"], "link": "#"}
        ]))
        .unwrap();

        let outcome = render_projects(&mut doc, &Settings::default(), &projects).unwrap();
        assert_eq!(outcome, RenderOutcome { containers: 1, items: 1 });

        let fragment = Html::parse_fragment(&doc.inner_html(grid));
        assert_eq!(texts(&fragment, ".project-card").len(), 1);
        assert_eq!(texts(&fragment, ".project-card h3"), vec!["A"]);
        assert_eq!(texts(&fragment, ".project-card p"), vec!["s"]);
        assert_eq!(texts(&fragment, ".project-tags span"), vec!["X", "Y"]);

        let img = Selector::parse("img").unwrap();
        let img = fragment.select(&img).next().unwrap();
        assert_eq!(img.value().attr("src"), Some("c.png"));
        assert_eq!(img.value().attr("alt"), Some("A"));

        let link = Selector::parse("a.btn.btn-outline").unwrap();
        let link = fragment.select(&link).next().unwrap();
        assert_eq!(link.value().attr("href"), Some("#"));
        assert_eq!(link.text().collect::<String>(), "Case Study");
    }

    #[test]
    fn replaces_previous_content() {
        let (mut doc, grid) = page();
        doc.set_inner_html(grid, "<p>loading</p>");
        let projects = vec![Project::default(), Project::default()];

        render_projects(&mut doc, &Settings::default(), &projects).unwrap();
        render_projects(&mut doc, &Settings::default(), &projects).unwrap();

        let fragment = Html::parse_fragment(&doc.inner_html(grid));
        assert_eq!(texts(&fragment, ".project-card").len(), 2);
        assert!(!doc.inner_html(grid).contains("loading"));
    }

    #[test]
    fn missing_fields_render_as_undefined() {
        let (mut doc, grid) = page();
        let projects: Vec<Project> = serde_json::from_value(json!([{"summary": "only"}])).unwrap();

        render_projects(&mut doc, &Settings::default(), &projects).unwrap();

        let fragment = Html::parse_fragment(&doc.inner_html(grid));
        assert_eq!(texts(&fragment, "h3"), vec!["undefined"]);
        assert!(texts(&fragment, ".project-tags span").is_empty());
    }

    #[test]
    fn empty_list_leaves_empty_container() {
        let (mut doc, grid) = page();
        let outcome = render_projects(&mut doc, &Settings::default(), &[]).unwrap();
        assert_eq!(outcome.items, 0);
        assert!(doc.inner_html(grid).trim().is_empty());
    }

    #[test]
    fn rendered_cards_are_queryable() {
        let (mut doc, grid) = page();
        let projects: Vec<Project> = serde_json::from_value(json!([
            {"title": "A", "summary": "s", "cover": "c.png", "stack": ["X", "Y"], "link": "#"}
        ]))
        .unwrap();

        render_projects(&mut doc, &Settings::default(), &projects).unwrap();

        let cards = doc.query_selector_all("#projects .grid-2 .project-card");
        assert_eq!(cards, doc.children(grid));
        assert_eq!(cards.len(), 1);
        assert_eq!(doc.query_selector_all(".project-tags span").len(), 2);
        let title = doc.query_selector(".project-card h3").unwrap();
        assert_eq!(doc.inner_html(title), "A");
    }

    #[test]
    fn absent_grid_is_a_no_op() {
        let mut doc = MemoryDocument::new();
        let outcome = render_projects(&mut doc, &Settings::default(), &[Project::default()]).unwrap();
        assert!(outcome.is_skipped());
    }
}
