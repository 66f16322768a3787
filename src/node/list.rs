//! Ordered, exclusively owned node sequence

use std::ops::Deref;

use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

/// Ordered children of a container, or the top level of a document.
///
/// Indexed access is checked: out-of-range indices yield `None` or an
/// `OutOfRange` error, never a panic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeList {
    nodes: Vec<Node>,
}

impl NodeList {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Like `get`, but reports a missing index as an error
    pub fn at(&self, index: usize) -> Result<&Node> {
        self.nodes.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, node: Node) -> Result<()> {
        if index > self.nodes.len() {
            return Err(self.out_of_range(index));
        }
        self.nodes.insert(index, node);
        Ok(())
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove and return the node at `index` with its whole subtree
    pub fn remove(&mut self, index: usize) -> Result<Node> {
        if index >= self.nodes.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.nodes.remove(index))
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Index of the `offset`-th (zero-based) node called `name`
    pub fn find(&self, name: &str, offset: usize) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.name() == name)
            .nth(offset)
            .map(|(index, _)| index)
    }

    pub fn get_named(&self, name: &str, offset: usize) -> Option<&Node> {
        self.find(name, offset).and_then(|index| self.nodes.get(index))
    }

    pub fn get_named_mut(&mut self, name: &str, offset: usize) -> Option<&mut Node> {
        self.find(name, offset)
            .and_then(move |index| self.nodes.get_mut(index))
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.nodes.iter().filter(|node| node.name() == name).count()
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::api(ErrorKind::OutOfRange {
            index,
            len: self.nodes.len(),
        })
    }
}

/// Read-only slice view; changes go through the checked methods.
impl Deref for NodeList {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.nodes
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}
