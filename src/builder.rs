//! Declaration classifier and builder.
//!
//! Turns scanned declarations into nodes. Element content and DOCTYPE
//! internal subsets are rescanned and built recursively, one nesting level
//! at a time. Declarations that fail to build with a recoverable error are
//! skipped and kept as diagnostics; any other error aborts the build.

pub mod attributes;
pub mod dtd;

use tracing::{debug, warn};

pub use self::attributes::parse_attributes;
use crate::config::{ParserConfig, ParsingContext};
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::node::element::DEFAULT_XML_VERSION;
use crate::node::{
    is_valid_name, Attributes, Comment, Node, NodeKind, TextElement, XmlElement, XmlProlog,
    PROLOG_NAME, TEXT_NODE_NAME,
};
use crate::scanner::{tag_name, DeclKind, Declaration, Scanner, ELEMENT_NAME_STOPS, MARKUP_NAME_STOPS};

pub struct Builder<'c> {
    config: &'c ParserConfig,
    context: ParsingContext,
    diagnostics: Vec<Error>,
}

impl<'c> Builder<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            context: ParsingContext::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan `text`, which starts at `origin` in the document, and build every
    /// declaration in source order.
    pub fn build_nodes(&mut self, text: &str, origin: Pos) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        for decl in Scanner::with_origin(text, origin) {
            match self.build(&decl) {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) => {}
                Err(err) if err.is_recoverable() => {
                    warn!("Skipping declaration: {}", err);
                    self.diagnostics.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(nodes)
    }

    /// Build one declaration; blank declarations build nothing.
    pub fn build(&mut self, decl: &Declaration<'_>) -> Result<Option<Node>> {
        if decl.is_blank() {
            return Ok(None);
        }
        if !decl.complete {
            let construct = decl.kind.construct();
            if !self.config.recover_unterminated {
                return Err(Error::new(
                    ErrorKind::UnterminatedConstruct {
                        construct: construct.to_string(),
                    },
                    decl.span,
                ));
            }
            warn!("Unterminated {} at {}, building what was read", construct, decl.span.start);
        }

        let node = match decl.kind {
            DeclKind::Comment => Ok(build_comment(decl.text)),
            DeclKind::Prolog => Ok(build_prolog(decl.text)),
            DeclKind::ProcessingInstruction => Ok(build_processing_instruction(decl.text)),
            DeclKind::Dtd(kind) => self.build_dtd(decl, kind),
            DeclKind::Element => self.build_element(decl),
            DeclKind::TextElement => build_text_element(decl),
            DeclKind::Text => Ok(build_text(decl.text)),
        }
        .map_err(|err| err.located(decl.span))?;

        let indent = decl.leading_indent || decl.text.contains('\t');
        Ok(Some(
            node.with_end_of_line(decl.trailing_newline)
                .with_indent(indent),
        ))
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }

    fn build_element(&mut self, decl: &Declaration<'_>) -> Result<Node> {
        let (name, attributes) = element_tag(decl.open_tag)?;
        let mut element = XmlElement::new(!decl.content.unwrap_or(decl.open_tag).contains('\n'));

        if let Some(content) = decl.content.filter(|c| !c.trim().is_empty()) {
            self.context.enter_nested(self.config, decl.span)?;
            let children = self.build_nodes(content, decl.content_origin);
            self.context.exit_nested();
            element.children = children?.into();
        }
        debug!("Built element {} with {} children", name, element.children.len());

        let mut node = Node::with_unchecked_name(name, NodeKind::Element(element));
        *node.attributes_mut() = attributes;
        Ok(node)
    }
}

/// Name and attributes of an element's opening tag
fn element_tag(open_tag: &str) -> Result<(&str, Attributes)> {
    if open_tag.starts_with("</") {
        return Err(Error::api(ErrorKind::MalformedDeclaration {
            construct: "element".to_string(),
            reason: format!("closing tag {open_tag} has no opening tag"),
        }));
    }
    let name = tag_name(open_tag, 1, ELEMENT_NAME_STOPS);
    if !is_valid_name(name) {
        return Err(Error::api(ErrorKind::InvalidName {
            name: name.to_string(),
        }));
    }
    let region = open_tag.get(1 + name.len()..).unwrap_or_default();
    Ok((name, parse_attributes(region)))
}

/// `<!-- name content -->`: the first word names the comment.
fn build_comment(text: &str) -> Node {
    let inner = text.strip_prefix("<!--").unwrap_or(text);
    let inner = inner.strip_suffix("-->").unwrap_or(inner).trim();
    let (name, content) = inner
        .split_once(char::is_whitespace)
        .map_or((inner, ""), |(name, rest)| (name, rest.trim_start()));
    Node::with_unchecked_name(name, NodeKind::Comment(Comment::new(content, true)))
}

/// `<?xml ...?>`: the well-known attributes become prolog fields
fn build_prolog(text: &str) -> Node {
    let region = text.get(2 + PROLOG_NAME.len()..).unwrap_or_default();
    let mut attributes = parse_attributes(region);
    let prolog = XmlProlog {
        version: attributes
            .shift_remove("version")
            .unwrap_or_else(|| DEFAULT_XML_VERSION.to_string()),
        encoding: attributes.shift_remove("encoding"),
        standalone: attributes.shift_remove("standalone"),
    };
    let mut node = Node::with_unchecked_name(PROLOG_NAME, NodeKind::Prolog(prolog));
    *node.attributes_mut() = attributes;
    node
}

fn build_processing_instruction(text: &str) -> Node {
    let target = tag_name(text, 2, MARKUP_NAME_STOPS);
    let region = text.get(2 + target.len()..).unwrap_or_default();
    let mut node = Node::with_unchecked_name(target, NodeKind::ProcessingInstruction);
    *node.attributes_mut() = parse_attributes(region);
    node
}

/// Paired element with text-only content. The text is kept as written.
fn build_text_element(decl: &Declaration<'_>) -> Result<Node> {
    let (name, attributes) = element_tag(decl.open_tag)?;
    let text = TextElement {
        text: decl.content.unwrap_or_default().to_string(),
        show_tag: true,
        escape: false,
    };
    let mut node = Node::with_unchecked_name(name, NodeKind::Text(text));
    *node.attributes_mut() = attributes;
    Ok(node)
}

fn build_text(text: &str) -> Node {
    let text = TextElement {
        text: text.to_string(),
        show_tag: false,
        escape: false,
    };
    Node::with_unchecked_name(TEXT_NODE_NAME, NodeKind::Text(text))
}
