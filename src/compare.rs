//! Structural equality of node trees.
//!
//! Formatting flags (end of line, indent, single line) are ignored and text
//! is compared decoded and trimmed, so a tree equals the tree parsed back
//! from its own printout.

use crate::document::Document;
use crate::node::{Dtd, Node, NodeKind, NodeList};

pub fn nodes_equal(left: &Node, right: &Node) -> bool {
    left.name() == right.name()
        && left.attributes() == right.attributes()
        && kinds_equal(left.kind(), right.kind())
}

pub fn lists_equal(left: &NodeList, right: &NodeList) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(l, r)| nodes_equal(l, r))
}

pub fn documents_equal(left: &Document, right: &Document) -> bool {
    lists_equal(left.nodes(), right.nodes())
}

fn kinds_equal(left: &NodeKind, right: &NodeKind) -> bool {
    match (left, right) {
        (NodeKind::Comment(l), NodeKind::Comment(r)) => l.content.trim() == r.content.trim(),
        (NodeKind::ProcessingInstruction, NodeKind::ProcessingInstruction) => true,
        (NodeKind::Text(l), NodeKind::Text(r)) => {
            l.show_tag == r.show_tag && l.plain_text().trim() == r.plain_text().trim()
        }
        (NodeKind::Element(l), NodeKind::Element(r)) => lists_equal(&l.children, &r.children),
        (NodeKind::Prolog(l), NodeKind::Prolog(r)) => l == r,
        (NodeKind::Dtd(l), NodeKind::Dtd(r)) => dtds_equal(l, r),
        _ => false,
    }
}

fn dtds_equal(left: &Dtd, right: &Dtd) -> bool {
    match (left, right) {
        (Dtd::Doctype(l), Dtd::Doctype(r)) => {
            l.root_element == r.root_element
                && l.ext_type == r.ext_type
                && l.public_id == r.public_id
                && l.ext_link == r.ext_link
                && lists_equal(l.children(), r.children())
        }
        (Dtd::Generic(l), Dtd::Generic(r)) => l == r,
        (Dtd::Attribute(l), Dtd::Attribute(r)) => l == r,
        (Dtd::Element(l), Dtd::Element(r)) => l == r,
        (Dtd::Entity(l), Dtd::Entity(r)) => l == r,
        _ => false,
    }
}
