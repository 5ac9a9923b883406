//! Document surface.
//!
//! Renderers and behaviors never touch a browser directly; they receive a
//! `&mut dyn Document`. The browser host implements it over `web-sys`,
//! [`MemoryDocument`] implements it in memory.

#[cfg(not(target_arch = "wasm32"))]
mod memory;

mod table;

#[cfg(not(target_arch = "wasm32"))]
pub use memory::MemoryDocument;
pub use table::{NodeTable, NODE_ATTRIBUTE};

use thiserror::Error;

/// Handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors raised by document lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A behavior's required element is not on the page.
    #[error("required element not found: {selector}")]
    MissingElement { selector: String },
    /// The host rejected a DOM operation.
    #[error("DOM operation failed: {message}")]
    Operation { message: String },
}

/// The subset of the DOM the page runtime uses.
pub trait Document {
    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<NodeId>;

    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// The root (`<html>`) element.
    fn document_element(&self) -> NodeId;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError>;

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError>;

    /// Replace the element's content with markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Replace the element's content with plain text.
    fn set_text(&mut self, node: NodeId, text: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn set_class_name(&mut self, node: NodeId, class_name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Flip `class`; returns whether it is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool;

    /// Set an inline style property (CSS property name, e.g. `transition-delay`).
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
}

/// Look up an element by id, failing if it is absent.
pub fn require_by_id(doc: &dyn Document, id: &str) -> Result<NodeId, DomError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement {
            selector: format!("#{}", id),
        })
}

/// Look up the first element matching `selector`, failing if there is none.
pub fn require(doc: &dyn Document, selector: &str) -> Result<NodeId, DomError> {
    doc.query_selector(selector)
        .ok_or_else(|| DomError::MissingElement {
            selector: selector.to_string(),
        })
}
