//! Theme toggle. Flips `dark` and `light` on the root element; not persisted.

use crate::config::Settings;
use crate::dom::{require_by_id, Document, DomError};
use crate::events::{Runtime, Subscription};

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let toggle = require_by_id(runtime.doc(), &settings.selectors.theme_toggle_id)?;
    let root = runtime.doc().document_element();

    Ok(runtime.on_click(toggle, move |ctx| {
        ctx.doc.toggle_class(root, "dark");
        ctx.doc.toggle_class(root, "light");
    }))
}
