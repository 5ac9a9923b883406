//! Parallax: hero content and background drift at different speeds while
//! the hero fades out. Opacity is not clamped.

use crate::config::Settings;
use crate::dom::{require_by_id, Document, DomError};
use crate::events::{EventKind, Runtime, Subscription};
use crate::models::format_number;

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let hero = runtime.doc().query_selector(&settings.selectors.hero_content);
    let background = require_by_id(runtime.doc(), &settings.selectors.background_id)?;
    let effects = settings.effects.clone();

    Ok(runtime.on(EventKind::Scroll, move |_, ctx| {
        let offset = ctx.scroll_y();
        if let Some(hero) = hero {
            ctx.doc
                .set_style(hero, "transform", &translate_y(offset * effects.hero_speed));
            ctx.doc.set_style(
                hero,
                "opacity",
                &format_number(1.0 - offset / effects.hero_fade_distance),
            );
        }
        ctx.doc.set_style(
            background,
            "transform",
            &translate_y(offset * effects.background_speed),
        );
    }))
}

fn translate_y(pixels: f64) -> String {
    format!("translateY({}px)", format_number(pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDocument, NodeId};
    use crate::events::Event;

    fn page(with_hero: bool) -> (MemoryDocument, Option<NodeId>, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let hero = with_hero.then(|| {
            let section = doc.append_element(body, "section", &[("id", "hero")]).unwrap();
            doc.append_element(section, "div", &[("class", "container")]).unwrap()
        });
        let background = doc.append_element(body, "div", &[("id", "animated-background")]).unwrap();
        (doc, hero, background)
    }

    #[test]
    fn layers_move_at_their_own_speed() {
        let (doc, hero, background) = page(true);
        let hero = hero.unwrap();
        let mut runtime = Runtime::new(doc);
        let _sub = register(&mut runtime, &Settings::default()).unwrap();

        runtime.dispatch(Event::Scroll { y: 300.0 });
        assert_eq!(runtime.doc().style(hero, "transform"), Some("translateY(120px)"));
        assert_eq!(runtime.doc().style(hero, "opacity"), Some("0.5"));
        assert_eq!(
            runtime.doc().style(background, "transform"),
            Some("translateY(150px)")
        );
    }

    #[test]
    fn opacity_goes_negative_past_fade_distance() {
        let (doc, hero, _) = page(true);
        let hero = hero.unwrap();
        let mut runtime = Runtime::new(doc);
        let _sub = register(&mut runtime, &Settings::default()).unwrap();

        runtime.dispatch(Event::Scroll { y: 900.0 });
        assert_eq!(runtime.doc().style(hero, "opacity"), Some("-0.5"));
    }

    #[test]
    fn hero_is_optional_background_is_not() {
        let (doc, _, background) = page(false);
        let mut runtime = Runtime::new(doc);
        let _sub = register(&mut runtime, &Settings::default()).unwrap();
        runtime.dispatch(Event::Scroll { y: 10.0 });
        assert_eq!(runtime.doc().style(background, "transform"), Some("translateY(5px)"));

        let mut bare = Runtime::new(MemoryDocument::new());
        assert!(register(&mut bare, &Settings::default()).is_err());
    }
}
