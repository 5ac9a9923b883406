//! folio - portfolio page runtime.
//!
//! Loads the site's JSON content, renders it into the page, and wires up the
//! presentational behaviors (counters, cursor, navbar, theme, menu, reveal,
//! parallax). Everything is written against the [`dom::Document`] surface and
//! the [`events::Runtime`] so it runs the same in the browser host and in tests.

pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod events;
pub mod interactive;
pub mod loader;
pub mod logging;
pub mod models;
pub mod render;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use bootstrap::{apply, boot, BootReport};
pub use config::Settings;
#[cfg(not(target_arch = "wasm32"))]
pub use dom::MemoryDocument;
pub use dom::{Document, DomError, NodeId};
pub use events::{Event, Runtime, Subscription};
pub use loader::{load_site_data, Fetcher, SiteData};
