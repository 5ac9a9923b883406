//! In-memory document on top of scraper's HTML tree.
//!
//! Markup assigned through `set_inner_html` is parsed into the tree, so
//! elements written by a renderer are visible to later queries, as in a
//! browser. Elements are handed out as [`NodeId`]s on first sight.

use std::cell::RefCell;
use std::collections::HashMap;

use ego_tree::{NodeId as TreeId, NodeRef, Tree};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

use super::{Document, DomError, NodeId};

const EMPTY_PAGE: &str = "<html><head></head><body></body></html>";

/// Stable handles for tree nodes.
#[derive(Debug, Clone, Default)]
struct Handles {
    tree_ids: Vec<TreeId>,
    nodes: HashMap<TreeId, NodeId>,
}

impl Handles {
    fn intern(&mut self, id: TreeId) -> NodeId {
        if let Some(&node) = self.nodes.get(&id) {
            return node;
        }
        let node = NodeId::new(self.tree_ids.len());
        self.tree_ids.push(id);
        self.nodes.insert(id, node);
        node
    }
}

/// A document held entirely in memory.
///
/// Starts out as `<html><head></head><body></body></html>`; build the page
/// with [`MemoryDocument::append_element`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    html: Html,
    root: NodeId,
    body: NodeId,
    handles: RefCell<Handles>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::from_html(Html::parse_document(EMPTY_PAGE))
    }

    /// Parse a complete page.
    pub fn parse(markup: &str) -> Self {
        Self::from_html(Html::parse_document(markup))
    }

    fn from_html(html: Html) -> Self {
        let mut handles = Handles::default();
        let root_element = html.root_element();
        let body_id = root_element
            .child_elements()
            .find(|element| element.value().name() == "body")
            .map(|element| element.id())
            .unwrap_or_else(|| root_element.id());
        let root = handles.intern(root_element.id());
        let body = handles.intern(body_id);

        Self {
            html,
            root,
            body,
            handles: RefCell::new(handles),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create an element with the given attributes and append it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let attributes: Vec<(String, String)> = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let element = build_element(tag, &attributes)?;
        let node = self.adopt(element);
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn tag_name(&self, node: NodeId) -> &str {
        self.element(node)
            .map(|element| element.value().name())
            .unwrap_or_default()
    }

    /// Element children, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let ids: Vec<TreeId> = match self.element(node) {
            Some(element) => element.child_elements().map(|child| child.id()).collect(),
            None => Vec::new(),
        };
        ids.into_iter().map(|id| self.intern(id)).collect()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent().and_then(ElementRef::wrap)?;
        Some(self.intern(parent.id()))
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.element(node)
            .map(|element| element.value().classes().collect())
            .unwrap_or_default()
    }

    /// Inline style value, if set.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        let style = self.element(node)?.value().attr("style")?;
        declarations(style)
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value)
    }

    /// Serialized content of the element.
    pub fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Serialized element including its own tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.html())
            .unwrap_or_default()
    }

    fn tree_id(&self, node: NodeId) -> TreeId {
        self.handles.borrow().tree_ids[node.index()]
    }

    fn intern(&self, id: TreeId) -> NodeId {
        self.handles.borrow_mut().intern(id)
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(self.tree_id(node)).and_then(ElementRef::wrap)
    }

    fn adopt(&mut self, element: Element) -> NodeId {
        let id = self.html.tree.orphan(Node::Element(element)).id();
        self.intern(id)
    }

    /// Rebuild an element with edited attributes. The node keeps its place
    /// and its handle.
    fn edit_attributes(&mut self, node: NodeId, edit: impl FnOnce(&mut Vec<(String, String)>)) {
        let Some(element) = self.element(node) else {
            return;
        };
        let tag = element.value().name().to_string();
        let mut attributes: Vec<(String, String)> = element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        edit(&mut attributes);

        let id = self.tree_id(node);
        match build_element(&tag, &attributes) {
            Ok(rebuilt) => {
                if let Some(mut target) = self.html.tree.get_mut(id) {
                    *target.value() = Node::Element(rebuilt);
                }
            }
            Err(err) => warn!(tag = %tag, error = %err, "could not update attributes"),
        }
    }

    fn clear_content(&mut self, id: TreeId) {
        let children: Vec<TreeId> = match self.html.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => return,
        };
        for child in children {
            if let Some(mut child) = self.html.tree.get_mut(child) {
                child.detach();
            }
        }
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(selector, error = %err, "invalid selector");
                return Vec::new();
            }
        };
        let root = self.html.root_element();
        let matched: Vec<TreeId> = std::iter::once(root)
            .filter(|element| parsed.matches(element))
            .chain(root.select(&parsed))
            .map(|element| element.id())
            .collect();
        matched.into_iter().map(|id| self.intern(id)).collect()
    }
}

impl Document for MemoryDocument {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(selector)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let found = self
            .html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))?
            .id();
        Some(self.intern(found))
    }

    fn document_element(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let element = build_element(tag, &[])?;
        Ok(self.adopt(element))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let (parent_id, child_id) = (self.tree_id(parent), self.tree_id(child));
        let cycle = self.html.tree.get(parent_id).is_some_and(|node| {
            node.id() == child_id || node.ancestors().any(|ancestor| ancestor.id() == child_id)
        });
        if cycle {
            return Err(DomError::Operation {
                message: "cannot append an element to its own descendant".to_string(),
            });
        }
        let mut parent = self
            .html
            .tree
            .get_mut(parent_id)
            .ok_or_else(|| DomError::Operation {
                message: "unknown parent element".to_string(),
            })?;
        parent.append_id(child_id);
        Ok(())
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        let id = self.tree_id(node);
        self.clear_content(id);
        let fragment = Html::parse_fragment(html);
        for child in fragment.root_element().children() {
            graft(&mut self.html.tree, id, child);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.set_inner_html(node, &escape_text(text));
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.value().attr(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.edit_attributes(node, |attributes| {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        });
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        self.set_attribute(node, "class", class_name);
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.value().classes().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut classes: Vec<String> = self.classes(node).into_iter().map(str::to_string).collect();
        classes.push(class.to_string());
        self.set_class_name(node, &classes.join(" "));
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let remaining: Vec<String> = self
            .classes(node)
            .into_iter()
            .filter(|&c| c != class)
            .map(str::to_string)
            .collect();
        self.set_class_name(node, &remaining.join(" "));
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let current = self
            .element(node)
            .and_then(|element| element.value().attr("style"))
            .unwrap_or_default();
        let mut styles: Vec<(String, String)> = declarations(current)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        match styles.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => styles.push((property.to_string(), value.to_string())),
        }
        let style = styles
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "style", &style);
    }
}

/// Parse a lone start tag into a detached element.
///
/// The tag is parsed as a `div` and renamed afterwards, so elements that
/// HTML only allows in special contexts (`tr`, `li`, ...) can still be made.
fn build_element(tag: &str, attributes: &[(String, String)]) -> Result<Element, DomError> {
    if !is_name(tag) {
        return Err(DomError::Operation {
            message: format!("invalid tag name {:?}", tag),
        });
    }
    let mut markup = String::from("<div");
    for (name, value) in attributes {
        if !is_name(name) {
            return Err(DomError::Operation {
                message: format!("invalid attribute name {:?}", name),
            });
        }
        markup.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    markup.push_str("></div>");

    let fragment = Html::parse_fragment(&markup);
    let mut element = fragment
        .root_element()
        .child_elements()
        .next()
        .map(|parsed| parsed.value().clone())
        .ok_or_else(|| DomError::Operation {
            message: format!("could not create <{}>", tag),
        })?;
    element.name.local = tag.to_ascii_lowercase().as_str().into();
    Ok(element)
}

/// Copy `source` and its subtree under `parent`.
fn graft(tree: &mut Tree<Node>, parent: TreeId, source: NodeRef<'_, Node>) {
    let Some(mut parent) = tree.get_mut(parent) else {
        return;
    };
    let id = parent.append(source.value().clone()).id();
    for child in source.children() {
        graft(tree, id, child);
    }
}

fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
}

fn is_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
