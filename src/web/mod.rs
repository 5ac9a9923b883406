//! Browser host.
//!
//! Boots the page once the DOM is ready and forwards browser events
//! (scroll, mousemove, clicks, intersections, animation frames) into the
//! [`Runtime`].

mod document;

pub use document::WebDocument;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::anyhow;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window};

use crate::bootstrap;
use crate::config::Settings;
use crate::events::{Event, Runtime};
use crate::interactive::IconRenderer;
use crate::loader::{load_site_data, HttpFetcher};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = lucide, js_name = createIcons, catch)]
    fn lucide_create_icons() -> Result<(), JsValue>;
}

/// The lucide icon library loaded by the page.
pub struct Lucide;

impl IconRenderer for Lucide {
    fn create_icons(&mut self) {
        if let Err(err) = lucide_create_icons() {
            error!(error = ?err, "icon rendering failed");
        }
    }
}

struct Host {
    window: Window,
    runtime: RefCell<Runtime<WebDocument>>,
    frame_scheduled: Cell<bool>,
}

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!("{:?}", err)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::logging::init("folio=info");

    let ready = when_ready(|| {
        wasm_bindgen_futures::spawn_local(async {
            if let Err(err) = run().await {
                error!(error = %err, "page bootstrap failed");
            }
        });
    });
    if let Err(err) = ready {
        error!(error = %err, "could not schedule bootstrap");
    }
}

fn when_ready(f: impl FnOnce() + 'static) -> anyhow::Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("no document"))?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(js_error)
}

async fn run() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window.document().ok_or_else(|| anyhow!("no document"))?;
    let settings = Settings::default();

    let href = window.location().href().map_err(js_error)?;
    let fetcher = HttpFetcher::new(&href)?;
    let data = load_site_data(&fetcher, &settings.endpoints).await;

    let scroll_y = window.scroll_y().map_err(js_error)?;
    let mut runtime = Runtime::with_scroll(WebDocument::new(document)?, scroll_y);
    // Behaviors stay registered for the lifetime of the page.
    let report = bootstrap::apply(&mut runtime, data, &mut Lucide, &settings);
    info!(
        rendered = report.rendered.len(),
        behaviors = report.interactive.registered.len(),
        "page ready"
    );

    let host = Rc::new(Host {
        window,
        runtime: RefCell::new(runtime),
        frame_scheduled: Cell::new(false),
    });
    attach_window_listeners(&host)?;
    attach_click_listeners(&host)?;
    attach_intersection_observers(&host)?;
    Ok(())
}

fn attach_window_listeners(host: &Rc<Host>) -> anyhow::Result<()> {
    let scroll_host = Rc::clone(host);
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let y = scroll_host.window.page_y_offset().unwrap_or(0.0);
        scroll_host.runtime.borrow_mut().dispatch(Event::Scroll { y });
        request_frames(&scroll_host);
    });
    host.window
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_scroll.forget();

    let move_host = Rc::clone(host);
    let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let x = f64::from(event.client_x());
        let y = f64::from(event.client_y());
        move_host
            .runtime
            .borrow_mut()
            .dispatch(Event::PointerMove { x, y });
    });
    host.window
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_move.forget();
    Ok(())
}

fn attach_click_listeners(host: &Rc<Host>) -> anyhow::Result<()> {
    let targets = host.runtime.borrow().click_targets();
    for node in targets {
        let element = host.runtime.borrow().doc().element(node);
        let click_host = Rc::clone(host);
        let on_click = Closure::<dyn FnMut()>::new(move || {
            click_host
                .runtime
                .borrow_mut()
                .dispatch(Event::Click { target: node });
            request_frames(&click_host);
        });
        element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
    }
    Ok(())
}

fn attach_intersection_observers(host: &Rc<Host>) -> anyhow::Result<()> {
    let groups = host.runtime.borrow().observed_targets();
    for (threshold, nodes) in groups {
        let observer_host = Rc::clone(host);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    let Some(node) = observer_host.runtime.borrow().doc().node_of(&target) else {
                        continue;
                    };
                    // The browser only reports crossings of this observer's
                    // threshold, so an intersecting entry counts as past it.
                    let ratio = entry.intersection_ratio().max(threshold);
                    let still_observed = {
                        let mut runtime = observer_host.runtime.borrow_mut();
                        runtime.report_intersection(node, ratio);
                        runtime.is_observed(node)
                    };
                    if !still_observed {
                        observer.unobserve(&target);
                    }
                }
                request_frames(&observer_host);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(js_error)?;
        callback.forget();

        for node in nodes {
            let element = host.runtime.borrow().doc().element(node);
            observer.observe(&element);
        }
    }
    Ok(())
}

/// Keep requesting animation frames while the runtime has work queued.
fn request_frames(host: &Rc<Host>) {
    if host.frame_scheduled.get() || host.runtime.borrow().pending_frames() == 0 {
        return;
    }
    host.frame_scheduled.set(true);

    let frame_host = Rc::clone(host);
    let callback = Closure::once_into_js(move || {
        frame_host.frame_scheduled.set(false);
        frame_host.runtime.borrow_mut().run_animation_frame();
        request_frames(&frame_host);
    });
    if let Err(err) = host.window.request_animation_frame(callback.unchecked_ref()) {
        host.frame_scheduled.set(false);
        error!(error = ?err, "requestAnimationFrame failed");
    }
}
