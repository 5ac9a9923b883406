//! [`Document`] over the browser DOM.

use std::cell::RefCell;

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom::{Document, DomError, NodeId, NodeTable, NODE_ATTRIBUTE};

/// The live page. Elements are handed out as [`NodeId`]s on first sight and
/// keep the same id afterwards. Each one is stamped with [`NODE_ATTRIBUTE`] so lookups skip the scan.
pub struct WebDocument {
    document: web_sys::Document,
    root: NodeId,
    elements: RefCell<NodeTable<Element>>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Result<Self, DomError> {
        let root = document
            .document_element()
            .ok_or_else(|| DomError::MissingElement {
                selector: "html".to_string(),
            })?;
        stamp(&root, "0");
        Ok(Self {
            document,
            root: NodeId::new(0),
            elements: RefCell::new(NodeTable::new(root)),
        })
    }

    /// The browser element behind a node.
    pub fn element(&self, node: NodeId) -> Element {
        self.elements.borrow()[node].clone()
    }

    /// The node for a browser element, if it has been handed out before.
    pub fn node_of(&self, element: &Element) -> Option<NodeId> {
        let stamp = element.get_attribute(NODE_ATTRIBUTE);
        self.elements.borrow().lookup(stamp.as_deref(), element)
    }

    fn intern(&self, element: Element) -> NodeId {
        if let Some(node) = self.node_of(&element) {
            return node;
        }
        let (node, index) = self.elements.borrow_mut().insert(element.clone());
        stamp(&element, &index);
        node
    }

    fn html_element(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node).dyn_into::<HtmlElement>().ok()
    }
}

fn stamp(element: &Element, index: &str) {
    if let Err(err) = element.set_attribute(NODE_ATTRIBUTE, index) {
        report("setAttribute", err);
    }
}

fn report(operation: &str, err: wasm_bindgen::JsValue) {
    warn!(operation, error = ?err, "DOM operation failed");
}

impl Document for WebDocument {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|element| self.intern(element)),
            Err(err) => {
                report("querySelector", err);
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                report("querySelectorAll", err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(element))
    }

    fn document_element(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|err| DomError::Operation {
                message: format!("createElement({}): {:?}", tag, err),
            })?;
        Ok(self.intern(element))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)
            .append_child(&self.element(child))
            .map(|_| ())
            .map_err(|err| DomError::Operation {
                message: format!("appendChild: {:?}", err),
            })
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.element(node).set_inner_html(html);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        match self.html_element(node) {
            Some(element) => element.set_inner_text(text),
            None => self.element(node).set_text_content(Some(text)),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Err(err) = self.element(node).set_attribute(name, value) {
            report("setAttribute", err);
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        self.element(node).set_class_name(class_name);
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).class_list().contains(class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Err(err) = self.element(node).class_list().add_1(class) {
            report("classList.add", err);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Err(err) = self.element(node).class_list().remove_1(class) {
            report("classList.remove", err);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.element(node).class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                report("classList.toggle", err);
                false
            }
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html_element(node) else {
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            report("style.setProperty", err);
        }
    }
}
