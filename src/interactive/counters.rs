//! Animated stat counters.
//!
//! Each `.stat-number` counts up from 0 to its `data-target` the first time
//! it scrolls into view, one step per animation frame.

use crate::config::Settings;
use crate::dom::{Document, DomError, NodeId};
use crate::events::{Context, Observation, Runtime, Subscription};
use crate::models::{format_number, parse_number};

pub fn register<D: Document>(runtime: &mut Runtime<D>, settings: &Settings) -> Result<Subscription, DomError> {
    let targets = runtime
        .doc()
        .query_selector_all(&settings.selectors.stat_number);
    let steps = settings.effects.counter_steps;

    Ok(runtime.observe(
        targets,
        settings.effects.counter_threshold,
        move |node, ctx| {
            let target = parse_target(ctx.doc.attribute(node, "data-target").as_deref());
            CountUp::new(node, target, steps).schedule(ctx);
            Observation::Unobserve
        },
    ))
}

/// Numeric value of a `data-target` attribute, converted like `Number()`.
/// Missing or blank is 0, anything unparsable is NaN.
pub fn parse_target(raw: Option<&str>) -> f64 {
    parse_number(raw.unwrap_or(""))
}

/// One running count-up animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    node: NodeId,
    target: f64,
    increment: f64,
    current: f64,
}

impl CountUp {
    pub fn new(node: NodeId, target: f64, steps: f64) -> Self {
        Self {
            node,
            target,
            increment: target / steps,
            current: 0.0,
        }
    }

    /// Advance one step. Returns the text to show and whether the
    /// animation continues.
    pub fn step(&mut self) -> (String, bool) {
        self.current += self.increment;
        if self.current < self.target {
            (format_number(self.current.ceil()), true)
        } else {
            (format_number(self.target), false)
        }
    }

    fn schedule(self, ctx: &mut Context<'_>) {
        ctx.request_animation_frame(Box::new(move |ctx: &mut Context<'_>| self.tick(ctx)));
    }

    fn tick(mut self, ctx: &mut Context<'_>) {
        let (text, running) = self.step();
        ctx.doc.set_text(self.node, &text);
        if running {
            self.schedule(ctx);
        }
    }
}
