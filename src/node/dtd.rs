//! Document type definition payloads.
//!
//! DTD constructs are modeled structurally so they can be edited and
//! printed again. Nothing here validates a document against them.

use crate::error::{Error, ErrorKind, Result};
use crate::node::list::NodeList;
use crate::node::{Node, NodeKind};

pub const DOCTYPE: &str = "DOCTYPE";
pub const ELEMENT: &str = "ELEMENT";
pub const ATTLIST: &str = "ATTLIST";
pub const ENTITY: &str = "ENTITY";

pub const EXTERN_SYSTEM: &str = "SYSTEM";
pub const EXTERN_PUBLIC: &str = "PUBLIC";

pub const CONTENT_PCDATA: &str = "#PCDATA";
pub const CONTENT_EMPTY: &str = "EMPTY";
pub const CONTENT_ANY: &str = "ANY";

pub const ATTR_CDATA: &str = "CDATA";
pub const ATTR_IMPLIED: &str = "#IMPLIED";

/// Closed set of DTD declarations
#[derive(Clone, Debug, PartialEq)]
pub enum Dtd {
    Generic(GenericDtd),
    Attribute(AttributeDtd),
    Doctype(DoctypeDtd),
    Element(ElementDtd),
    Entity(EntityDtd),
}

impl Dtd {
    /// Keyword printed after `<!`
    pub fn keyword(&self) -> &str {
        match self {
            Self::Generic(generic) => &generic.type_tag,
            Self::Attribute(_) => ATTLIST,
            Self::Doctype(_) => DOCTYPE,
            Self::Element(_) => ELEMENT,
            Self::Entity(_) => ENTITY,
        }
    }
}

/// Any `<!KEYWORD content>` without a dedicated model
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericDtd {
    pub type_tag: String,
    pub content: String,
}

impl GenericDtd {
    pub fn new(type_tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            content: content.into(),
        }
    }
}

/// `<!ATTLIST element attr type value>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeDtd {
    pub element_name: String,
    pub attr_name: String,
    pub attr_type: String,
    pub attr_value: String,
    /// Print the value as a quoted literal
    pub is_string: bool,
}

impl AttributeDtd {
    pub fn new(
        element_name: impl Into<String>,
        attr_name: impl Into<String>,
        attr_type: impl Into<String>,
    ) -> Self {
        Self {
            element_name: element_name.into(),
            attr_name: attr_name.into(),
            attr_type: attr_type.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>, is_string: bool) -> Self {
        self.attr_value = value.into();
        self.is_string = is_string;
        self
    }
}

/// `<!ELEMENT name (content)>`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementDtd {
    pub element_name: String,
    /// Content model without its outer parentheses, or `EMPTY` / `ANY`
    pub element_content: String,
}

impl ElementDtd {
    pub fn new(element_name: impl Into<String>, element_content: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            element_content: element_content.into(),
        }
    }

    /// Replace the content model with `values` joined as a choice (`mixed`)
    /// or a sequence. An empty list leaves the content untouched.
    pub fn set_element_content_list<S: AsRef<str>>(&mut self, values: &[S], mixed: bool) {
        if values.is_empty() {
            return;
        }
        self.element_content = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(separator(mixed));
    }

    pub fn add_element_content(&mut self, value: &str, mixed: bool) {
        if !self.element_content.is_empty() {
            self.element_content.push_str(separator(mixed));
        }
        self.element_content.push_str(value);
    }

    /// `EMPTY` and `ANY` are printed without parentheses
    pub fn is_bare_keyword(&self) -> bool {
        self.element_content == CONTENT_EMPTY || self.element_content == CONTENT_ANY
    }

    /// Content is one parenthesized group, optionally followed by `*`, `+` or `?`
    pub fn is_single_group(&self) -> bool {
        match group_end(&self.element_content) {
            Some(end) => matches!(
                self.element_content.get(end + 1..),
                Some("" | "*" | "+" | "?")
            ),
            None => false,
        }
    }
}

/// Index of the `)` closing the group that opens at the start of `text`
pub(crate) fn group_end(text: &str) -> Option<usize> {
    if !text.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (index, b) in text.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn separator(mixed: bool) -> &'static str {
    if mixed {
        " | "
    } else {
        ", "
    }
}

/// `<!ENTITY name "value">` or an external entity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityDtd {
    pub entity_name: String,
    pub entity_value: String,
    /// Print the value as a quoted literal
    pub is_string: bool,
}

impl EntityDtd {
    /// An empty value is always a literal: `""`
    pub fn new(entity_name: impl Into<String>, entity_value: impl Into<String>, is_string: bool) -> Self {
        let entity_value = entity_value.into();
        Self {
            entity_name: entity_name.into(),
            is_string: is_string || entity_value.is_empty(),
            entity_value,
        }
    }
}

/// `<!DOCTYPE root EXT "public-id" "link" [ internal subset ]>`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DoctypeDtd {
    pub root_element: String,
    /// `SYSTEM` or `PUBLIC`; printed as `SYSTEM` when a link has no type
    pub ext_type: Option<String>,
    /// Public identifier of a `PUBLIC` external id
    pub public_id: Option<String>,
    pub ext_link: Option<String>,
    /// Print the internal subset inline
    pub single_line: bool,
    children: NodeList,
}

impl DoctypeDtd {
    pub fn new(root_element: impl Into<String>) -> Self {
        Self {
            root_element: root_element.into(),
            ..Self::default()
        }
    }

    pub fn with_external(mut self, ext_type: impl Into<String>, ext_link: impl Into<String>) -> Self {
        self.set_external(ext_type, ext_link);
        self
    }

    /// Set the external id; empty strings leave the matching part unset.
    pub fn set_external(&mut self, ext_type: impl Into<String>, ext_link: impl Into<String>) {
        let ext_type = ext_type.into();
        self.ext_type = (!ext_type.is_empty()).then_some(ext_type);
        let link = ext_link.into();
        self.ext_link = (!link.is_empty()).then_some(link);
    }

    pub fn unset_ext(&mut self) {
        self.ext_type = None;
        self.public_id = None;
        self.ext_link = None;
    }

    /// Declarations of the internal subset
    pub fn children(&self) -> &NodeList {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    pub fn find_child(&self, name: &str, offset: usize) -> Option<usize> {
        self.children.find(name, offset)
    }

    pub fn insert_child(&mut self, index: usize, node: Node) -> Result<()> {
        ensure_dtd(&node)?;
        self.children.insert(index, node)
    }

    pub fn push_child(&mut self, node: Node) -> Result<()> {
        ensure_dtd(&node)?;
        self.children.push(node);
        Ok(())
    }

    pub fn remove_child(&mut self, index: usize) -> Result<Node> {
        self.children.remove(index)
    }

    pub fn pop_child(&mut self) -> Option<Node> {
        self.children.pop()
    }
}

/// The internal subset only holds DTD declarations
fn ensure_dtd(node: &Node) -> Result<()> {
    match node.kind() {
        NodeKind::Dtd(_) => Ok(()),
        _ => Err(Error::api(ErrorKind::InvalidChild {
            reason: format!(
                "DOCTYPE internal subset cannot hold a {:?} node",
                node.node_type()
            ),
        })),
    }
}

macro_rules! impl_into_dtd {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for Dtd {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )*
    };
}

impl_into_dtd! {
    GenericDtd => Generic,
    AttributeDtd => Attribute,
    DoctypeDtd => Doctype,
    ElementDtd => Element,
    EntityDtd => Entity,
}
