//! Navbar auto-hide.
//!
//! `scrolled` is set past the first offset. `hidden` is set while scrolling
//! down past the second offset and cleared on any other scroll.

use crate::config::Settings;
use crate::dom::{require_by_id, Document, DomError};
use crate::events::{EventKind, Runtime, Subscription};

pub const SCROLLED_CLASS: &str = "scrolled";
pub const HIDDEN_CLASS: &str = "hidden";

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let navbar = require_by_id(runtime.doc(), &settings.selectors.navbar_id)?;
    let scrolled_offset = settings.effects.nav_scrolled_offset;
    let hide_offset = settings.effects.nav_hide_offset;
    let mut last_y = runtime.scroll_y();

    Ok(runtime.on(EventKind::Scroll, move |_, ctx| {
        let y = ctx.scroll_y();
        if y > scrolled_offset {
            ctx.doc.add_class(navbar, SCROLLED_CLASS);
        } else {
            ctx.doc.remove_class(navbar, SCROLLED_CLASS);
        }
        if last_y < y && y > hide_offset {
            ctx.doc.add_class(navbar, HIDDEN_CLASS);
        } else {
            ctx.doc.remove_class(navbar, HIDDEN_CLASS);
        }
        last_y = y;
    }))
}
