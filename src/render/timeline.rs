use askama::Template;
use tracing::debug;

use super::templates::TimelineItem;
use super::{RenderError, RenderOutcome};
use crate::config::Settings;
use crate::dom::Document;
use crate::models::{format_number, TimelineEvent};

/// Append one item per event to the timeline container.
///
/// Existing content is kept, so rendering twice doubles the items. Each
/// item's transition is delayed by its index times the stagger.
pub fn render_timeline(
    doc: &mut dyn Document,
    settings: &Settings,
    events: &[TimelineEvent],
) -> Result<RenderOutcome, RenderError> {
    let selector = &settings.selectors.timeline_container;
    let Some(container) = doc.query_selector(selector) else {
        debug!(selector = %selector, "timeline container not on page");
        return Ok(RenderOutcome::skipped());
    };

    for (index, event) in events.iter().enumerate() {
        let item = doc.create_element("div")?;
        doc.set_class_name(item, "timeline-item");
        let delay = format_number(index as f64 * settings.effects.timeline_stagger);
        doc.set_style(item, "transition-delay", &format!("{}s", delay));
        doc.set_inner_html(item, &TimelineItem { event }.render()?);
        doc.append_child(container, item)?;
    }

    Ok(RenderOutcome {
        containers: 1,
        items: events.len(),
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
        let container = doc.append_element(body, "div", &[("class", "timeline-container")]).unwrap();
        (doc, container)
    }

    fn events() -> Vec<TimelineEvent> {
        serde_json::from_value(json!([
            {"date": "2019", "title": "Intern", "description": "First job"},
            {"date": "2021", "title": "Engineer", "description": "Backend"},
            {"date": "2024", "title": "Lead", "description": "Platform"}
        ]))
        .unwrap()
    }

    #[test]
    fn items_are_staggered_in_order() {
        let (mut doc, container) = page();
        render_timeline(&mut doc, &Settings::default(), &events()).unwrap();

        let items = doc.children(container).to_vec();
        assert_eq!(items.len(), 3);
        let delays: Vec<&str> = items
            .iter()
            .map(|&item| doc.style(item, "transition-delay").unwrap())
            .collect();
        assert_eq!(delays, vec!["0s", "0.15s", "0.3s"]);
        assert!(items.iter().all(|&item| doc.classes(item) == vec!["timeline-item"]));

        let fragment = Html::parse_fragment(&doc.inner_html(container));
        let titles = Selector::parse(".timeline-item .timeline-title").unwrap();
        let titles: Vec<String> = fragment
            .select(&titles)
            .map(|el| el.text().collect())
            .collect();
        assert_eq!(titles, vec!["Intern", "Engineer", "Lead"]);
    }

    #[test]
    fn rendering_twice_appends() {
        let (mut doc, container) = page();
        doc.set_inner_html(container, "<h2>Journey</h2>");

        render_timeline(&mut doc, &Settings::default(), &events()).unwrap();
        render_timeline(&mut doc, &Settings::default(), &events()).unwrap();

        assert_eq!(doc.children(container).len(), 7);
        assert_eq!(doc.query_selector_all(".timeline-container .timeline-item").len(), 6);
        assert!(doc.inner_html(container).starts_with("<h2>Journey</h2>"));
    }

    #[test]
    fn empty_list_and_missing_container() {
        let (mut doc, container) = page();
        let outcome = render_timeline(&mut doc, &Settings::default(), &[]).unwrap();
        assert_eq!(outcome, RenderOutcome { containers: 1, items: 0 });
        assert!(doc.children(container).is_empty());

        let mut bare = MemoryDocument::new();
        assert!(render_timeline(&mut bare, &Settings::default(), &events())
            .unwrap()
            .is_skipped());
    }
}
