//! Custom cursor: the dot and outline follow the pointer with no easing.

use crate::config::Settings;
use crate::dom::{require_by_id, Document, DomError};
use crate::events::{Event, EventKind, Runtime, Subscription};
use crate::models::format_number;

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let dot = require_by_id(runtime.doc(), &settings.selectors.cursor_dot_id)?;
    let outline = require_by_id(runtime.doc(), &settings.selectors.cursor_outline_id)?;

    Ok(runtime.on(EventKind::PointerMove, move |event, ctx| {
        let Event::PointerMove { x, y } = *event else {
            return;
        };
        let left = format!("{}px", format_number(x));
        let top = format!("{}px", format_number(y));
        for node in [dot, outline] {
            ctx.doc.set_style(node, "left", &left);
            ctx.doc.set_style(node, "top", &top);
        }
    }))
}
