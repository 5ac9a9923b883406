//! Event runtime.
//!
//! A single-threaded stand-in for the browser's event machinery: window
//! listeners (scroll, pointer move), element click listeners, intersection
//! observers and the animation-frame queue. The host feeds it events; handlers
//! run to completion and keep their own state in their closures.
//!
//! Every registration returns a [`Subscription`] that can be handed back to
//! [`Runtime::unsubscribe`].

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};

/// Events the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Window scrolled; `y` is the new vertical offset.
    Scroll { y: f64 },
    /// Pointer moved; viewport coordinates.
    PointerMove { x: f64, y: f64 },
    /// An element was clicked.
    Click { target: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    PointerMove,
    Click,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Scroll { .. } => EventKind::Scroll,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::Click { .. } => EventKind::Click,
        }
    }

    fn target(&self) -> Option<NodeId> {
        match self {
            Event::Click { target } => Some(*target),
            _ => None,
        }
    }
}

/// What an intersection handler wants after seeing an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Keep,
    Unobserve,
}

/// Work scheduled for the next animation frame.
pub type FrameCallback = Box<dyn FnOnce(&mut Context<'_>)>;

type ListenerFn = Box<dyn FnMut(&Event, &mut Context<'_>)>;
type IntersectionFn = Box<dyn FnMut(NodeId, &mut Context<'_>) -> Observation>;

/// What a handler can reach while it runs.
pub struct Context<'a> {
    pub doc: &'a mut dyn Document,
    scroll_y: f64,
    frames: &'a mut Vec<FrameCallback>,
}

impl Context<'_> {
    /// Current vertical scroll offset of the window.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.frames.push(callback);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ObserverId(u64);

/// Handle to one or more registrations.
#[must_use = "dropping a Subscription leaves its handlers registered"]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Subscription {
    listeners: Vec<ListenerId>,
    observers: Vec<ObserverId>,
}

impl Subscription {
    /// A handle that owns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold another handle into this one.
    pub fn merge(mut self, other: Subscription) -> Self {
        self.listeners.extend(other.listeners);
        self.observers.extend(other.observers);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.observers.is_empty()
    }
}

struct Listener {
    kind: EventKind,
    target: Option<NodeId>,
    handler: ListenerFn,
}

struct Observer {
    threshold: f64,
    targets: Vec<NodeId>,
    handler: IntersectionFn,
}

/// Owns the document and every registered handler.
pub struct Runtime<D> {
    doc: D,
    scroll_y: f64,
    next_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
    observers: BTreeMap<ObserverId, Observer>,
    frames: Vec<FrameCallback>,
}

impl<D: Document> Runtime<D> {
    pub fn new(doc: D) -> Self {
        Self::with_scroll(doc, 0.0)
    }

    /// Start with the window already scrolled to `scroll_y`.
    pub fn with_scroll(doc: D, scroll_y: f64) -> Self {
        Self {
            doc,
            scroll_y,
            next_id: 0,
            listeners: BTreeMap::new(),
            observers: BTreeMap::new(),
            frames: Vec::new(),
        }
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_doc(self) -> D {
        self.doc
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Listen for a window-level event kind.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Event, &mut Context<'_>) + 'static,
    {
        self.add_listener(kind, None, Box::new(handler))
    }

    /// Listen for clicks on one element.
    pub fn on_click<F>(&mut self, target: NodeId, mut handler: F) -> Subscription
    where
        F: FnMut(&mut Context<'_>) + 'static,
    {
        self.add_listener(
            EventKind::Click,
            Some(target),
            Box::new(move |_: &Event, ctx: &mut Context<'_>| handler(ctx)),
        )
    }

    fn add_listener(&mut self, kind: EventKind, target: Option<NodeId>, handler: ListenerFn) -> Subscription {
        let id = ListenerId(self.next_id());
        self.listeners.insert(
            id,
            Listener {
                kind,
                target,
                handler,
            },
        );
        Subscription {
            listeners: vec![id],
            observers: Vec::new(),
        }
    }

    /// Observe `targets`; the handler fires when one becomes at least
    /// `threshold` visible.
    pub fn observe<F>(&mut self, targets: Vec<NodeId>, threshold: f64, handler: F) -> Subscription
    where
        F: FnMut(NodeId, &mut Context<'_>) -> Observation + 'static,
    {
        let id = ObserverId(self.next_id());
        self.observers.insert(
            id,
            Observer {
                threshold,
                targets,
                handler: Box::new(handler),
            },
        );
        Subscription {
            listeners: Vec::new(),
            observers: vec![id],
        }
    }

    /// Remove everything a subscription registered. Returns how many
    /// registrations were still live.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> usize {
        let listeners = subscription
            .listeners
            .iter()
            .filter(|id| self.listeners.remove(*id).is_some())
            .count();
        let observers = subscription
            .observers
            .iter()
            .filter(|id| self.observers.remove(*id).is_some())
            .count();
        listeners + observers
    }

    /// Deliver an event to every matching listener. Returns how many ran.
    pub fn dispatch(&mut self, event: Event) -> usize {
        if let Event::Scroll { y } = event {
            self.scroll_y = y;
        }

        let Runtime {
            doc,
            scroll_y,
            listeners,
            frames,
            ..
        } = self;

        let mut delivered = 0;
        for listener in listeners.values_mut() {
            if listener.kind != event.kind() {
                continue;
            }
            if listener.target.is_some() && listener.target != event.target() {
                continue;
            }
            let mut ctx = Context {
                doc: &mut *doc,
                scroll_y: *scroll_y,
                frames: &mut *frames,
            };
            (listener.handler)(&event, &mut ctx);
            delivered += 1;
        }
        delivered
    }

    /// Report that `node` is intersecting the viewport with the given visible
    /// fraction. Returns how many observers fired.
    pub fn report_intersection(&mut self, node: NodeId, ratio: f64) -> usize {
        let Runtime {
            doc,
            scroll_y,
            observers,
            frames,
            ..
        } = self;

        let mut fired = 0;
        for observer in observers.values_mut() {
            if !observer.targets.contains(&node) || ratio <= 0.0 || ratio < observer.threshold {
                continue;
            }
            let mut ctx = Context {
                doc: &mut *doc,
                scroll_y: *scroll_y,
                frames: &mut *frames,
            };
            if (observer.handler)(node, &mut ctx) == Observation::Unobserve {
                observer.targets.retain(|&t| t != node);
            }
            fired += 1;
        }
        fired
    }

    /// Whether any observer is still watching `node`.
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observers.values().any(|o| o.targets.contains(&node))
    }

    /// Observed elements grouped by threshold, for hosts that drive real
    /// intersection observers.
    pub fn observed_targets(&self) -> Vec<(f64, Vec<NodeId>)> {
        let mut groups: Vec<(f64, Vec<NodeId>)> = Vec::new();
        for observer in self.observers.values() {
            match groups.iter_mut().find(|(t, _)| *t == observer.threshold) {
                Some((_, nodes)) => {
                    for &node in &observer.targets {
                        if !nodes.contains(&node) {
                            nodes.push(node);
                        }
                    }
                }
                None => groups.push((observer.threshold, observer.targets.clone())),
            }
        }
        groups
    }

    /// Elements that have click listeners.
    pub fn click_targets(&self) -> Vec<NodeId> {
        let mut targets: Vec<NodeId> = self.listeners.values().filter_map(|l| l.target).collect();
        targets.sort();
        targets.dedup();
        targets
    }

    pub fn request_animation_frame(&mut self, callback: FrameCallback) {
        self.frames.push(callback);
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Run the callbacks queued for this frame. Callbacks they request land
    /// in the next frame. Returns how many ran.
    pub fn run_animation_frame(&mut self) -> usize {
        let due = std::mem::take(&mut self.frames);
        let count = due.len();
        for callback in due {
            let mut ctx = Context {
                doc: &mut self.doc,
                scroll_y: self.scroll_y,
                frames: &mut self.frames,
            };
            callback(&mut ctx);
        }
        count
    }

    /// Run frames until none are pending or `limit` frames have run.
    /// Returns the number of frames run.
    pub fn run_frames(&mut self, limit: usize) -> usize {
        let mut frames = 0;
        while frames < limit && self.pending_frames() > 0 {
            self.run_animation_frame();
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::MemoryDocument;

    fn runtime_with_button() -> (Runtime<MemoryDocument>, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let button = doc.append_element(body, "button", &[("id", "go")]).unwrap();
        (Runtime::new(doc), button)
    }

    #[test]
    fn dispatch_filters_by_kind_and_target() {
        let (mut runtime, button) = runtime_with_button();
        let other = runtime.doc_mut().create_element("button").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let scrolls = Rc::new(Cell::new(0));

        let c = Rc::clone(&clicks);
        let _click = runtime.on_click(button, move |_| c.set(c.get() + 1));
        let s = Rc::clone(&scrolls);
        let _scroll = runtime.on(EventKind::Scroll, move |_, _| s.set(s.get() + 1));

        assert_eq!(runtime.dispatch(Event::Click { target: button }), 1);
        assert_eq!(runtime.dispatch(Event::Click { target: other }), 0);
        assert_eq!(runtime.dispatch(Event::Scroll { y: 12.0 }), 1);
        assert_eq!(runtime.dispatch(Event::PointerMove { x: 1.0, y: 1.0 }), 0);

        assert_eq!(clicks.get(), 1);
        assert_eq!(scrolls.get(), 1);
        assert_eq!(runtime.scroll_y(), 12.0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (mut runtime, _) = runtime_with_button();
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let subscription = runtime.on(EventKind::Scroll, move |_, _| s.set(s.get() + 1));

        runtime.dispatch(Event::Scroll { y: 1.0 });
        assert_eq!(runtime.unsubscribe(subscription), 1);
        runtime.dispatch(Event::Scroll { y: 2.0 });

        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn observer_honours_threshold_and_unobserve() {
        let (mut runtime, button) = runtime_with_button();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = runtime.observe(vec![button], 0.5, move |_, _| {
            h.set(h.get() + 1);
            Observation::Unobserve
        });

        assert_eq!(runtime.report_intersection(button, 0.2), 0);
        assert_eq!(runtime.report_intersection(button, 0.0), 0);
        assert_eq!(runtime.report_intersection(button, 0.6), 1);
        assert!(!runtime.is_observed(button));
        assert_eq!(runtime.report_intersection(button, 1.0), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn frames_requested_during_a_frame_run_next_frame() {
        let (mut runtime, _) = runtime_with_button();
        let ticks = Rc::new(Cell::new(0));
        let t = Rc::clone(&ticks);
        runtime.request_animation_frame(Box::new(move |ctx: &mut Context<'_>| {
            t.set(t.get() + 1);
            let t = Rc::clone(&t);
            ctx.request_animation_frame(Box::new(move |_: &mut Context<'_>| t.set(t.get() + 1)));
        }));

        assert_eq!(runtime.run_animation_frame(), 1);
        assert_eq!(ticks.get(), 1);
        assert_eq!(runtime.pending_frames(), 1);
        assert_eq!(runtime.run_frames(10), 1);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn merged_subscription_removes_everything() {
        let (mut runtime, button) = runtime_with_button();
        let first = runtime.on(EventKind::PointerMove, |_, _| {});
        let second = runtime.on_click(button, |_| {});
        let third = runtime.observe(vec![button], 0.1, |_, _| Observation::Keep);

        assert_eq!(runtime.click_targets(), vec![button]);
        assert_eq!(runtime.observed_targets(), vec![(0.1, vec![button])]);

        let all = first.merge(second).merge(third);
        assert_eq!(runtime.unsubscribe(all), 3);
        assert!(runtime.click_targets().is_empty());
        assert!(runtime.observed_targets().is_empty());
    }
}
