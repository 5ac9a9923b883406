use askama::Template;
use tracing::debug;

use super::templates::{SkillChip, SkillChips};
use super::{RenderError, RenderOutcome};
use crate::config::Settings;
use crate::dom::Document;
use crate::models::Skill;

/// Write the same chip list into every skills marquee.
///
/// Chip colors come from the palette by position, so the color of a skill
/// depends only on its index.
pub fn render_skills(
    doc: &mut dyn Document,
    settings: &Settings,
    skills: &[Skill],
) -> Result<RenderOutcome, RenderError> {
    let selector = &settings.selectors.skills_marquee;
    let containers = doc.query_selector_all(selector);
    if containers.is_empty() {
        debug!(selector = %selector, "no skills marquee on page");
        return Ok(RenderOutcome::skipped());
    }

    let chips = skills
        .iter()
        .enumerate()
        .map(|(index, skill)| SkillChip {
            skill,
            color: settings.skill_color(index),
        })
        .collect();
    let html = SkillChips {
        chips,
        text_color: &settings.effects.skill_text_color,
    }
    .render()?;

    for &container in &containers {
        doc.set_inner_html(container, &html);
    }

    Ok(RenderOutcome {
        containers: containers.len(),
        items: skills.len(),
    })
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use serde_json::json;

    use super::*;
    use crate::dom::{MemoryDocument, NodeId};

    fn page(marquees: usize) -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let nodes = (0..marquees)
            .map(|_| doc.append_element(body, "div", &[("class", "skills-marquee")]).unwrap())
            .collect();
        (doc, nodes)
    }

    fn skills(count: usize) -> Vec<Skill> {
        (0..count)
            .map(|i| {
                serde_json::from_value(json!({"name": format!("skill-{}", i), "level": 50 + i}))
                    .unwrap()
            })
            .collect()
    }

    fn chip_styles(html: &str) -> Vec<String> {
        let fragment = Html::parse_fragment(html);
        let chip = Selector::parse(".skill-chip").unwrap();
        fragment
            .select(&chip)
            .map(|el| el.value().attr("style").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn colors_follow_position_modulo_palette() {
        let (mut doc, marquees) = page(1);
        let settings = Settings::default();
        render_skills(&mut doc, &settings, &skills(12)).unwrap();

        let styles = chip_styles(&doc.inner_html(marquees[0]));
        assert_eq!(styles.len(), 12);
        for (i, style) in styles.iter().enumerate() {
            let expected = format!("background-color: {};", settings.palette[i % 5]);
            assert!(style.starts_with(&expected), "chip {} has style {}", i, style);
            assert!(style.contains("color: #0F1226;"));
        }
    }

    #[test]
    fn color_ignores_skill_identity() {
        let (mut doc, marquees) = page(1);
        let mut list = skills(3);
        list.reverse();
        render_skills(&mut doc, &Settings::default(), &list).unwrap();

        let styles = chip_styles(&doc.inner_html(marquees[0]));
        assert!(styles[0].starts_with("background-color: #9F9CF3;"));
        assert!(styles[2].starts_with("background-color: #FECACA;"));
    }

    #[test]
    fn every_marquee_gets_identical_markup() {
        let (mut doc, marquees) = page(2);
        let outcome = render_skills(&mut doc, &Settings::default(), &skills(4)).unwrap();
        assert_eq!(outcome, RenderOutcome { containers: 2, items: 4 });
        assert_eq!(doc.inner_html(marquees[0]), doc.inner_html(marquees[1]));

        let fragment = Html::parse_fragment(&doc.inner_html(marquees[0]));
        let level = Selector::parse(".skill-level").unwrap();
        let first = fragment.select(&level).next().unwrap();
        assert_eq!(first.text().collect::<String>(), "50%");
    }

    #[test]
    fn empty_list_and_missing_marquee() {
        let (mut doc, marquees) = page(1);
        render_skills(&mut doc, &Settings::default(), &[]).unwrap();
        assert!(chip_styles(&doc.inner_html(marquees[0])).is_empty());

        let (mut bare, _) = page(0);
        assert!(render_skills(&mut bare, &Settings::default(), &skills(2))
            .unwrap()
            .is_skipped());
    }
}
