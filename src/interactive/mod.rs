//! Interactive page behaviors.
//!
//! Every behavior registers independently. One whose required elements are
//! missing is skipped with a warning and the rest still register.

pub mod counters;
pub mod cursor;
mod icons;
pub mod mobile_menu;
pub mod navbar;
pub mod parallax;
pub mod reveal;
pub mod theme;

pub use icons::{CountingIcons, IconRenderer, NoIcons};

use std::fmt;

use tracing::{info, warn};

use crate::config::Settings;
use crate::dom::{Document, DomError};
use crate::events::{Runtime, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    Icons,
    StatCounters,
    Cursor,
    Navbar,
    ThemeToggle,
    MobileMenu,
    ScrollReveal,
    Parallax,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Icons => "icons",
            Behavior::StatCounters => "stat-counters",
            Behavior::Cursor => "cursor",
            Behavior::Navbar => "navbar",
            Behavior::ThemeToggle => "theme-toggle",
            Behavior::MobileMenu => "mobile-menu",
            Behavior::ScrollReveal => "scroll-reveal",
            Behavior::Parallax => "parallax",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of wiring up the page.
#[derive(Debug, Default)]
pub struct InteractiveHandles {
    pub registered: Vec<(Behavior, Subscription)>,
    pub failed: Vec<(Behavior, DomError)>,
}

impl InteractiveHandles {
    pub fn is_registered(&self, behavior: Behavior) -> bool {
        self.registered.iter().any(|(b, _)| *b == behavior)
    }

    /// Unregister every behavior. Returns how many registrations were removed.
    pub fn dispose<D: Document>(self, runtime: &mut Runtime<D>) -> usize {
        self.registered
            .into_iter()
            .map(|(_, subscription)| runtime.unsubscribe(subscription))
            .sum()
    }

    fn record(&mut self, behavior: Behavior, result: Result<Subscription, DomError>) {
        match result {
            Ok(subscription) => self.registered.push((behavior, subscription)),
            Err(err) => {
                warn!(behavior = %behavior, error = %err, "skipping behavior");
                self.failed.push((behavior, err));
            }
        }
    }
}

/// Register every page behavior once.
pub fn initialize_interactive_elements<D: Document>(
    runtime: &mut Runtime<D>,
    icons: &mut dyn IconRenderer,
    settings: &Settings,
) -> InteractiveHandles {
    let mut handles = InteractiveHandles::default();

    icons.create_icons();
    handles.record(Behavior::Icons, Ok(Subscription::empty()));
    handles.record(Behavior::StatCounters, counters::register(runtime, settings));
    handles.record(Behavior::Cursor, cursor::register(runtime, settings));
    handles.record(Behavior::Navbar, navbar::register(runtime, settings));
    handles.record(Behavior::ThemeToggle, theme::register(runtime, settings));
    handles.record(Behavior::MobileMenu, mobile_menu::register(runtime, settings));
    handles.record(Behavior::ScrollReveal, reveal::register(runtime, settings));
    handles.record(Behavior::Parallax, parallax::register(runtime, settings));

    info!(
        registered = handles.registered.len(),
        failed = handles.failed.len(),
        "interactive elements initialized"
    );
    handles
}
