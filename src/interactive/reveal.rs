//! Scroll-reveal: one-shot `is-visible` class on first intersection.

use crate::config::Settings;
use crate::dom::{Document, DomError};
use crate::events::{Observation, Runtime, Subscription};

pub const REVEALED_CLASS: &str = "is-visible";

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let targets = runtime.doc().query_selector_all(&settings.selectors.reveal);
    Ok(runtime.observe(targets, settings.effects.reveal_threshold, |node, ctx| {
        ctx.doc.add_class(node, REVEALED_CLASS);
        Observation::Unobserve
    }))
}
