//! Node model: a closed set of node kinds sharing a name, formatting flags
//! and an attribute map.
//!
//! Every node exclusively owns its children and attributes, so cloning a
//! node deep-copies its subtree and dropping it drops the whole subtree.

pub mod dtd;
pub mod element;
pub mod list;

use std::fmt;

use indexmap::IndexMap;

pub use self::dtd::{AttributeDtd, DoctypeDtd, Dtd, ElementDtd, EntityDtd, GenericDtd};
pub use self::element::{Comment, TextElement, XmlElement, XmlProlog};
pub use self::list::NodeList;
use crate::error::{Error, ErrorKind, Result};
use crate::formatter::{self, FormatConfig};

/// Name given to bare text runs
pub const TEXT_NODE_NAME: &str = "_text";
/// Name of the `<?xml ...?>` prolog
pub const PROLOG_NAME: &str = "xml";

/// Attribute map of a node. Keys are unique and always owned.
pub type Attributes = IndexMap<String, String>;

/// Kind-specific payload of a node
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Comment(Comment),
    /// `<?target key="value"?>`; the target is the node name
    ProcessingInstruction,
    Text(TextElement),
    Element(XmlElement),
    Prolog(XmlProlog),
    Dtd(Dtd),
}

/// Fieldless view of a node's kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Comment,
    ProcessingInstruction,
    Text,
    Element,
    Prolog,
    GenericDtd,
    AttributeDtd,
    DoctypeDtd,
    ElementDtd,
    EntityDtd,
}

impl NodeType {
    pub fn is_dtd(self) -> bool {
        matches!(
            self,
            Self::GenericDtd
                | Self::AttributeDtd
                | Self::DoctypeDtd
                | Self::ElementDtd
                | Self::EntityDtd
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: String,
    end_of_line: bool,
    indent: bool,
    attributes: Attributes,
    kind: NodeKind,
}

/// Whether `name` is `(_|letter)[word|-|.]*`
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Check a name given through the API. `xml` is reserved for the prolog.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) && !name.eq_ignore_ascii_case(PROLOG_NAME) {
        Ok(())
    } else {
        Err(Error::api(ErrorKind::InvalidName {
            name: name.to_string(),
        }))
    }
}

impl Node {
    /// Node with an unchecked name and default formatting (own line, indented)
    pub fn with_unchecked_name(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            end_of_line: true,
            indent: true,
            attributes: Attributes::new(),
            kind,
        }
    }

    /// Node with a validated name
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::with_unchecked_name(name, kind))
    }

    /// Empty element; prints self-closed until it gets children
    pub fn element(name: impl Into<String>) -> Result<Self> {
        Self::new(name, NodeKind::Element(XmlElement::default()))
    }

    /// `<name>text</name>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        Self::new(name, NodeKind::Text(TextElement::new(text, true)))
    }

    /// Bare text printed between sibling elements
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_unchecked_name(TEXT_NODE_NAME, NodeKind::Text(TextElement::new(text, false)))
            .with_end_of_line(false)
            .with_indent(false)
    }

    /// `<!-- name content -->`; the name is printed when non-empty
    pub fn comment(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let show_name = !name.is_empty();
        Self::with_unchecked_name(name, NodeKind::Comment(Comment::new(content, show_name)))
    }

    /// `<?target?>`, attributes added afterwards
    pub fn processing_instruction(target: impl Into<String>) -> Result<Self> {
        Self::new(target, NodeKind::ProcessingInstruction)
    }

    pub fn prolog(prolog: XmlProlog) -> Self {
        Self::with_unchecked_name(PROLOG_NAME, NodeKind::Prolog(prolog)).with_indent(false)
    }

    /// Any DTD declaration; the node is named after its keyword
    pub fn dtd(dtd: impl Into<Dtd>) -> Self {
        let dtd = dtd.into();
        let name = dtd.keyword().to_string();
        Self::with_unchecked_name(name, NodeKind::Dtd(dtd))
    }

    pub fn with_end_of_line(mut self, end_of_line: bool) -> Self {
        self.end_of_line = end_of_line;
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_name_unchecked(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn end_of_line(&self) -> bool {
        self.end_of_line
    }

    pub fn set_end_of_line(&mut self, end_of_line: bool) {
        self.end_of_line = end_of_line;
    }

    pub fn indent(&self) -> bool {
        self.indent
    }

    pub fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::ProcessingInstruction => NodeType::ProcessingInstruction,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Prolog(_) => NodeType::Prolog,
            NodeKind::Dtd(Dtd::Generic(_)) => NodeType::GenericDtd,
            NodeKind::Dtd(Dtd::Attribute(_)) => NodeType::AttributeDtd,
            NodeKind::Dtd(Dtd::Doctype(_)) => NodeType::DoctypeDtd,
            NodeKind::Dtd(Dtd::Element(_)) => NodeType::ElementDtd,
            NodeKind::Dtd(Dtd::Entity(_)) => NodeType::EntityDtd,
        }
    }

    // Attributes

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an attribute, returning the value it replaced
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    // Kind views

    pub fn as_comment(&self) -> Option<&Comment> {
        match &self.kind {
            NodeKind::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    pub fn as_comment_mut(&mut self) -> Option<&mut Comment> {
        match &mut self.kind {
            NodeKind::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match &mut self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_prolog(&self) -> Option<&XmlProlog> {
        match &self.kind {
            NodeKind::Prolog(prolog) => Some(prolog),
            _ => None,
        }
    }

    pub fn as_prolog_mut(&mut self) -> Option<&mut XmlProlog> {
        match &mut self.kind {
            NodeKind::Prolog(prolog) => Some(prolog),
            _ => None,
        }
    }

    pub fn as_dtd(&self) -> Option<&Dtd> {
        match &self.kind {
            NodeKind::Dtd(dtd) => Some(dtd),
            _ => None,
        }
    }

    pub fn as_dtd_mut(&mut self) -> Option<&mut Dtd> {
        match &mut self.kind {
            NodeKind::Dtd(dtd) => Some(dtd),
            _ => None,
        }
    }

    pub fn as_doctype(&self) -> Option<&DoctypeDtd> {
        match &self.kind {
            NodeKind::Dtd(Dtd::Doctype(doctype)) => Some(doctype),
            _ => None,
        }
    }

    pub fn as_doctype_mut(&mut self) -> Option<&mut DoctypeDtd> {
        match &mut self.kind {
            NodeKind::Dtd(Dtd::Doctype(doctype)) => Some(doctype),
            _ => None,
        }
    }

    // Children

    /// Children of an element or a DOCTYPE internal subset
    pub fn children(&self) -> Option<&NodeList> {
        match &self.kind {
            NodeKind::Element(element) => Some(&element.children),
            NodeKind::Dtd(Dtd::Doctype(doctype)) => Some(doctype.children()),
            _ => None,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().and_then(|children| children.get(index))
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Element(element) => element.children.get_mut(index),
            NodeKind::Dtd(Dtd::Doctype(doctype)) => doctype.child_mut(index),
            _ => None,
        }
    }

    /// Index of the `offset`-th child called `name`
    pub fn find_child(&self, name: &str, offset: usize) -> Option<usize> {
        self.children().and_then(|children| children.find(name, offset))
    }

    pub fn insert_child(&mut self, index: usize, node: Self) -> Result<()> {
        let own_type = self.node_type();
        match &mut self.kind {
            NodeKind::Element(element) => element.children.insert(index, node),
            NodeKind::Dtd(Dtd::Doctype(doctype)) => doctype.insert_child(index, node),
            _ => Err(not_a_container(own_type)),
        }
    }

    pub fn push_child(&mut self, node: Self) -> Result<()> {
        let own_type = self.node_type();
        match &mut self.kind {
            NodeKind::Element(element) => {
                element.children.push(node);
                Ok(())
            }
            NodeKind::Dtd(Dtd::Doctype(doctype)) => doctype.push_child(node),
            _ => Err(not_a_container(own_type)),
        }
    }

    /// Remove a child together with its subtree
    pub fn remove_child(&mut self, index: usize) -> Result<Self> {
        let own_type = self.node_type();
        match &mut self.kind {
            NodeKind::Element(element) => element.children.remove(index),
            NodeKind::Dtd(Dtd::Doctype(doctype)) => doctype.remove_child(index),
            _ => Err(not_a_container(own_type)),
        }
    }

    // Printing

    /// Print this node and its subtree at `level` with tab indentation
    pub fn serialize(&self, level: usize) -> String {
        formatter::serialize(self, level)
    }

    pub fn serialize_with(&self, level: usize, config: &FormatConfig) -> String {
        formatter::serialize_with(self, level, config)
    }
}

fn not_a_container(node_type: NodeType) -> Error {
    Error::api(ErrorKind::InvalidChild {
        reason: format!("a {node_type:?} node cannot hold children"),
    })
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(0))
    }
}
