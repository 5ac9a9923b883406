use tracing::debug;

use crate::config::Settings;
use crate::dom::Document;
use crate::models::SiteConfig;

/// Point the placeholder resume link at the configured resume URL.
///
/// Only the first matching anchor is patched, and only when the config has a
/// non-empty `resumeUrl`. Returns whether a link was patched.
pub fn update_static_content(doc: &mut dyn Document, settings: &Settings, config: &SiteConfig) -> bool {
    let selector = &settings.selectors.resume_link;
    let Some(link) = doc.query_selector(selector) else {
        debug!(selector = %selector, "no resume placeholder on page");
        return false;
    };
    if !config.resume_url.is_truthy() {
        return false;
    }

    doc.set_attribute(link, "href", &config.resume_url.to_string());
    true
}
