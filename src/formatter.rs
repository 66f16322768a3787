//! Serializer: renders nodes back to XML text.
//!
//! Output depends only on the node's own state. The formatting flags
//! captured at parse time (indent, end of line, single line) decide where
//! tabs and newlines go, so a loaded document prints close to its source.

pub mod escape;

use crate::node::dtd::{
    AttributeDtd, DoctypeDtd, Dtd, ElementDtd, EntityDtd, GenericDtd, EXTERN_SYSTEM,
};
use crate::node::{Attributes, Comment, Node, NodeKind, TextElement, XmlElement, XmlProlog};

/// Indentation unit written once per nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tabs,
    Spaces(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub indent: Indent,
    pub line_ending: LineEnding,
}

/// Trait for formatting a node as a string
pub trait Formatter {
    fn format(&self, node: &Node, level: usize, config: &FormatConfig) -> String;
}

/// The XML serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn format(&self, node: &Node, level: usize, config: &FormatConfig) -> String {
        let mut out = String::new();
        Self::write_node(&mut out, node, level, config);
        out
    }
}

/// Print `node` at `level` with tabs and `\n`
pub fn serialize(node: &Node, level: usize) -> String {
    serialize_with(node, level, &FormatConfig::default())
}

pub fn serialize_with(node: &Node, level: usize, config: &FormatConfig) -> String {
    XmlFormatter.format(node, level, config)
}

/// Print a sequence of nodes at level 0, one after another
pub fn serialize_all<'a>(nodes: impl IntoIterator<Item = &'a Node>, config: &FormatConfig) -> String {
    let mut out = String::new();
    for node in nodes {
        XmlFormatter::write_node(&mut out, node, 0, config);
    }
    out
}

impl XmlFormatter {
    fn write_node(out: &mut String, node: &Node, level: usize, config: &FormatConfig) {
        if node.indent() && level > 0 {
            write_indent(out, level, config);
        }

        match node.kind() {
            NodeKind::Comment(comment) => write_comment(out, node.name(), comment),
            NodeKind::ProcessingInstruction => {
                out.push_str("<?");
                out.push_str(node.name());
                write_attributes(out, node.attributes());
                out.push_str("?>");
            }
            NodeKind::Text(text) => write_text(out, node, text),
            NodeKind::Element(element) => Self::write_element(out, node, element, level, config),
            NodeKind::Prolog(prolog) => write_prolog(out, node.attributes(), prolog),
            NodeKind::Dtd(dtd) => Self::write_dtd(out, node, dtd, level, config),
        }

        if node.end_of_line() {
            out.push_str(config.line_ending.as_str());
        }
    }

    fn write_element(
        out: &mut String,
        node: &Node,
        element: &XmlElement,
        level: usize,
        config: &FormatConfig,
    ) {
        out.push('<');
        out.push_str(node.name());
        write_attributes(out, node.attributes());
        if element.children.is_empty() {
            out.push_str(" />");
            return;
        }

        out.push('>');
        Self::write_children(out, node, &element.children, element.single_line, level, config);
        out.push_str("</");
        out.push_str(node.name());
        out.push('>');
    }

    /// Body shared by elements and DOCTYPE internal subsets
    fn write_children<'a>(
        out: &mut String,
        parent: &Node,
        children: impl IntoIterator<Item = &'a Node>,
        single_line: bool,
        level: usize,
        config: &FormatConfig,
    ) {
        if !single_line {
            out.push_str(config.line_ending.as_str());
        }
        let child_level = if single_line { 0 } else { level + 1 };
        for child in children {
            Self::write_node(out, child, child_level, config);
        }
        if parent.indent() && level > 0 && !single_line {
            write_indent(out, level, config);
        }
    }

    fn write_dtd(out: &mut String, node: &Node, dtd: &Dtd, level: usize, config: &FormatConfig) {
        match dtd {
            Dtd::Generic(generic) => write_generic_dtd(out, generic),
            Dtd::Attribute(attribute) => write_attribute_dtd(out, attribute),
            Dtd::Element(element) => write_element_dtd(out, element),
            Dtd::Entity(entity) => write_entity_dtd(out, entity),
            Dtd::Doctype(doctype) => Self::write_doctype(out, node, doctype, level, config),
        }
    }

    fn write_doctype(
        out: &mut String,
        node: &Node,
        doctype: &DoctypeDtd,
        level: usize,
        config: &FormatConfig,
    ) {
        out.push_str("<!DOCTYPE ");
        out.push_str(&doctype.root_element);

        let ext_type = doctype
            .ext_type
            .as_deref()
            .or_else(|| doctype.ext_link.as_ref().map(|_| EXTERN_SYSTEM));
        if let Some(ext_type) = ext_type {
            out.push(' ');
            out.push_str(ext_type);
        }
        for literal in [&doctype.public_id, &doctype.ext_link].into_iter().flatten() {
            out.push(' ');
            write_quoted(out, literal);
        }

        if !doctype.children().is_empty() {
            out.push_str(" [");
            Self::write_children(out, node, doctype.children(), doctype.single_line, level, config);
            out.push(']');
        }
        out.push('>');
    }
}

fn write_indent(out: &mut String, level: usize, config: &FormatConfig) {
    match config.indent {
        Indent::Tabs => out.extend(std::iter::repeat_n('\t', level)),
        Indent::Spaces(width) => out.extend(std::iter::repeat_n(' ', level * width)),
    }
}

/// Write an attribute value in double quotes with its entities escaped
fn write_attribute_value(out: &mut String, value: &str) {
    out.push('"');
    out.push_str(&escape::escape_attribute(value));
    out.push('"');
}

/// Write a DTD literal in double quotes, or single quotes when it holds a `"`
fn write_quoted(out: &mut String, value: &str) {
    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push('=');
        write_attribute_value(out, value);
    }
}

fn write_comment(out: &mut String, name: &str, comment: &Comment) {
    out.push_str("<!-- ");
    let words = [
        Some(name).filter(|name| comment.show_name && !name.is_empty()),
        Some(comment.content.as_str()).filter(|content| !content.is_empty()),
    ];
    let body = words.into_iter().flatten().collect::<Vec<_>>().join(" ");
    out.push_str(&body);
    out.push_str(" -->");
}

fn write_text(out: &mut String, node: &Node, text: &TextElement) {
    if text.show_tag {
        out.push('<');
        out.push_str(node.name());
        write_attributes(out, node.attributes());
        out.push('>');
    }
    if text.escape {
        out.push_str(&escape::escape(&text.text));
    } else {
        out.push_str(&text.text);
    }
    if text.show_tag {
        out.push_str("</");
        out.push_str(node.name());
        out.push('>');
    }
}

fn write_prolog(out: &mut String, attributes: &Attributes, prolog: &XmlProlog) {
    out.push_str("<?xml version=");
    write_attribute_value(out, &prolog.version);
    if let Some(encoding) = &prolog.encoding {
        out.push_str(" encoding=");
        write_attribute_value(out, encoding);
    }
    if let Some(standalone) = &prolog.standalone {
        out.push_str(" standalone=");
        write_attribute_value(out, standalone);
    }
    write_attributes(out, attributes);
    out.push_str("?>");
}

fn write_generic_dtd(out: &mut String, generic: &GenericDtd) {
    out.push_str("<!");
    out.push_str(&generic.type_tag);
    if !generic.content.is_empty() {
        out.push(' ');
        out.push_str(&generic.content);
    }
    out.push('>');
}

fn write_attribute_dtd(out: &mut String, attribute: &AttributeDtd) {
    out.push_str("<!ATTLIST ");
    out.push_str(&attribute.element_name);
    out.push(' ');
    out.push_str(&attribute.attr_name);
    out.push(' ');
    out.push_str(&attribute.attr_type);
    if attribute.is_string {
        out.push(' ');
        write_quoted(out, &attribute.attr_value);
    } else if !attribute.attr_value.is_empty() {
        out.push(' ');
        out.push_str(&attribute.attr_value);
    }
    out.push('>');
}

fn write_element_dtd(out: &mut String, element: &ElementDtd) {
    out.push_str("<!ELEMENT ");
    out.push_str(&element.element_name);
    out.push(' ');
    if element.is_bare_keyword() || element.is_single_group() {
        out.push_str(&element.element_content);
    } else {
        out.push('(');
        out.push_str(&element.element_content);
        out.push(')');
    }
    out.push('>');
}

fn write_entity_dtd(out: &mut String, entity: &EntityDtd) {
    out.push_str("<!ENTITY ");
    out.push_str(&entity.entity_name);
    out.push(' ');
    if entity.is_string || entity.entity_value.is_empty() {
        write_quoted(out, &entity.entity_value);
    } else {
        out.push_str(&entity.entity_value);
    }
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::node::dtd::{ATTR_CDATA, ATTR_IMPLIED, CONTENT_EMPTY, CONTENT_PCDATA};

    fn inline(node: Node) -> Node {
        node.with_end_of_line(false).with_indent(false)
    }

    #[test]
    fn test_empty_element_self_closes() -> Result<()> {
        let mut node = Node::element("br")?.with_attribute("class", "x");
        assert_eq!(serialize(&node, 0), "<br class=\"x\" />\n");
        if let Some(element) = node.as_element_mut() {
            element.single_line = true;
        }
        assert_eq!(serialize(&node, 2), "\t\t<br class=\"x\" />\n");
        Ok(())
    }

    #[test]
    fn test_nested_elements_use_levels() -> Result<()> {
        let mut root = Node::element("root")?;
        let mut child = Node::element("child")?;
        child.push_child(Node::text_element("leaf", "a < b")?)?;
        root.push_child(child)?;
        assert_eq!(
            serialize(&root, 0),
            "<root>\n\t<child>\n\t\t<leaf>a &lt; b</leaf>\n\t</child>\n</root>\n"
        );
        Ok(())
    }

    #[test]
    fn test_single_line_element() -> Result<()> {
        let mut div = inline(Node::element("div")?);
        if let Some(element) = div.as_element_mut() {
            element.single_line = true;
        }
        div.push_child(Node::text("one "))?;
        div.push_child(Node::text("two"))?;
        assert_eq!(serialize(&div, 3), "<div>one two</div>");
        Ok(())
    }

    #[test]
    fn test_spaces_and_crlf() -> Result<()> {
        let mut root = Node::element("r")?;
        root.push_child(Node::element("c")?)?;
        let config = FormatConfig {
            indent: Indent::Spaces(2),
            line_ending: LineEnding::CrLf,
        };
        assert_eq!(serialize_with(&root, 0, &config), "<r>\r\n  <c />\r\n</r>\r\n");
        Ok(())
    }

    #[test]
    fn test_comment_forms() {
        assert_eq!(
            serialize(&inline(Node::comment("note", "this is a comment")), 0),
            "<!-- note this is a comment -->"
        );
        let mut hidden = inline(Node::comment("note", "body"));
        if let Some(comment) = hidden.as_comment_mut() {
            comment.show_name = false;
        }
        assert_eq!(serialize(&hidden, 0), "<!-- body -->");
    }

    #[test]
    fn test_prolog_and_pi() -> Result<()> {
        let prolog = inline(Node::prolog(XmlProlog::default().with_encoding("UTF-8")));
        assert_eq!(serialize(&prolog, 0), "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        let pi = inline(Node::processing_instruction("style")?.with_attribute("href", "a.css"));
        assert_eq!(serialize(&pi, 0), "<?style href=\"a.css\"?>");
        Ok(())
    }

    #[test]
    fn test_attribute_values_are_escaped() -> Result<()> {
        let node = inline(Node::element("a")?.with_attribute("t", "say \"it's\" <&>"));
        assert_eq!(
            serialize(&node, 0),
            "<a t=\"say &quot;it&apos;s&quot; &lt;&amp;&gt;\" />"
        );
        let path = inline(Node::element("a")?.with_attribute("path", "C:\\dir\\"));
        assert_eq!(serialize(&path, 0), "<a path=\"C:\\dir&#92;\" />");
        Ok(())
    }

    #[test]
    fn test_empty_entity_value_is_quoted() {
        let entity = inline(Node::dtd(EntityDtd::new("e", "", false)));
        assert_eq!(serialize(&entity, 0), "<!ENTITY e \"\">");
    }

    #[test]
    fn test_dtd_forms() {
        let attlist = inline(Node::dtd(
            AttributeDtd::new("el", "attr", ATTR_CDATA).with_value(ATTR_IMPLIED, false),
        ));
        assert_eq!(serialize(&attlist, 0), "<!ATTLIST el attr CDATA #IMPLIED>");

        let element = inline(Node::dtd(ElementDtd::new("note", "to, from")));
        assert_eq!(serialize(&element, 0), "<!ELEMENT note (to, from)>");
        let empty = inline(Node::dtd(ElementDtd::new("br", CONTENT_EMPTY)));
        assert_eq!(serialize(&empty, 0), "<!ELEMENT br EMPTY>");
        let mixed = inline(Node::dtd(ElementDtd::new("p", format!("({CONTENT_PCDATA} | b)*"))));
        assert_eq!(serialize(&mixed, 0), "<!ELEMENT p (#PCDATA | b)*>");

        let entity = inline(Node::dtd(EntityDtd::new("copy", "(c)", true)));
        assert_eq!(serialize(&entity, 0), "<!ENTITY copy \"(c)\">");
    }

    #[test]
    fn test_doctype_with_subset() -> Result<()> {
        let mut doctype = DoctypeDtd::new("note");
        doctype.push_child(Node::dtd(ElementDtd::new("note", "#PCDATA")))?;
        let node = inline(Node::dtd(doctype));
        assert_eq!(
            serialize(&node, 0),
            "<!DOCTYPE note [\n\t<!ELEMENT note (#PCDATA)>\n]>"
        );

        let mut html = DoctypeDtd::new("html");
        html.ext_link = Some("about:legacy-compat".to_string());
        assert_eq!(
            serialize(&inline(Node::dtd(html)), 0),
            "<!DOCTYPE html SYSTEM \"about:legacy-compat\">"
        );

        let mut public = DoctypeDtd::new("html").with_external("PUBLIC", "http://x/strict.dtd");
        public.public_id = Some("-//W3C//DTD XHTML 1.0 Strict//EN".to_string());
        assert_eq!(
            serialize(&inline(Node::dtd(public)), 0),
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://x/strict.dtd\">"
        );
        Ok(())
    }
}
