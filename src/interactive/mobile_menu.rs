//! Mobile menu: the toggle opens it, the close button closes it.

use crate::config::Settings;
use crate::dom::{require_by_id, Document, DomError};
use crate::events::{Runtime, Subscription};

pub const VISIBLE_CLASS: &str = "visible";

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let selectors = &settings.selectors;
    let open = require_by_id(runtime.doc(), &selectors.mobile_menu_toggle_id)?;
    let close = require_by_id(runtime.doc(), &selectors.mobile_menu_close_id)?;
    let menu = require_by_id(runtime.doc(), &selectors.mobile_menu_id)?;

    let opened = runtime.on_click(open, move |ctx| ctx.doc.add_class(menu, VISIBLE_CLASS));
    let closed = runtime.on_click(close, move |ctx| ctx.doc.remove_class(menu, VISIBLE_CLASS));
    Ok(opened.merge(closed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::events::Event;

    #[test]
    fn open_and_close() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let open = doc.append_element(body, "button", &[("id", "mobile-menu-toggle")]).unwrap();
        let menu = doc.append_element(body, "div", &[("id", "mobile-menu")]).unwrap();
        let close = doc.append_element(menu, "button", &[("id", "mobile-menu-close")]).unwrap();
        let mut runtime = Runtime::new(doc);
        let _sub = register(&mut runtime, &Settings::default()).unwrap();

        runtime.dispatch(Event::Click { target: open });
        runtime.dispatch(Event::Click { target: open });
        assert!(runtime.doc().has_class(menu, VISIBLE_CLASS));

        runtime.dispatch(Event::Click { target: close });
        assert!(!runtime.doc().has_class(menu, VISIBLE_CLASS));
    }

    #[test]
    fn missing_menu_fails() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        doc.append_element(body, "button", &[("id", "mobile-menu-toggle")]).unwrap();
        doc.append_element(body, "button", &[("id", "mobile-menu-close")]).unwrap();
        let mut runtime = Runtime::new(doc);

        assert!(matches!(
            register(&mut runtime, &Settings::default()),
            Err(DomError::MissingElement { .. })
        ));
        assert!(runtime.click_targets().is_empty());
    }
}
