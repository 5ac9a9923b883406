//! Node id allocation for hosts whose elements live outside Rust.

use std::ops::Index;

use super::NodeId;

/// Attribute a host stamps on each element it hands out, holding the index.
pub const NODE_ATTRIBUTE: &str = "data-folio-node";

/// Elements handed out as [`NodeId`]s, indexed by the value of
/// [`NODE_ATTRIBUTE`]. Lookups are one attribute read plus one comparison.
/// The table only grows; an element removed from the page keeps its slot.
#[derive(Debug, Clone)]
pub struct NodeTable<E> {
    elements: Vec<E>,
}

impl<E: PartialEq> NodeTable<E> {
    pub fn new(root: E) -> Self {
        Self {
            elements: vec![root],
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&E> {
        self.elements.get(node.index())
    }

    /// The node for `element`, given its current [`NODE_ATTRIBUTE`] value.
    ///
    /// A stamp that points at a different element is ignored; clones copy
    /// their source's attributes.
    pub fn lookup(&self, stamp: Option<&str>, element: &E) -> Option<NodeId> {
        let index: usize = stamp?.parse().ok()?;
        match self.elements.get(index) {
            Some(known) if known == element => Some(NodeId::new(index)),
            _ => None,
        }
    }

    /// Add an element, returning its node and the stamp to write on it.
    pub fn insert(&mut self, element: E) -> (NodeId, String) {
        let index = self.elements.len();
        self.elements.push(element);
        (NodeId::new(index), index.to_string())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<E> Index<NodeId> for NodeTable<E> {
    type Output = E;

    fn index(&self, node: NodeId) -> &E {
        &self.elements[node.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamped_elements_resolve_to_their_node() {
        let mut table = NodeTable::new("html");
        let (node, stamp) = table.insert("div");
        assert_eq!(node, NodeId::new(1));
        assert_eq!(table.lookup(Some(&stamp), &"div"), Some(node));
        assert_eq!(table.lookup(Some("0"), &"html"), Some(NodeId::new(0)));
        assert_eq!(table.get(node), Some(&"div"));
        assert_eq!(table[NodeId::new(0)], "html");
    }

    #[test]
    fn copied_or_bogus_stamps_are_ignored() {
        let mut table = NodeTable::new("html");
        let (_, stamp) = table.insert("div");

        // A clone carries the stamp of a different element.
        assert_eq!(table.lookup(Some(&stamp), &"span"), None);
        assert_eq!(table.lookup(Some("7"), &"div"), None);
        assert_eq!(table.lookup(Some("x"), &"div"), None);
        assert_eq!(table.lookup(None, &"div"), None);
    }

    #[test]
    fn lookups_do_not_depend_on_table_size() {
        let mut table = NodeTable::new(0usize);
        let stamps: Vec<String> = (1..1000).map(|i| table.insert(i).1).collect();
        assert_eq!(table.len(), 1000);
        assert_eq!(table.lookup(Some(&stamps[998]), &999), Some(NodeId::new(999)));
        assert_eq!(table.lookup(Some(&stamps[0]), &1), Some(NodeId::new(1)));
    }
}
