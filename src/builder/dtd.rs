//! DTD declarations: tokenizer and per-keyword builders

use tracing::{debug, warn};

use super::Builder;
use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::node::dtd::{
    group_end, AttributeDtd, DoctypeDtd, Dtd, ElementDtd, EntityDtd, GenericDtd, EXTERN_PUBLIC,
};
use crate::node::Node;
use crate::scanner::{locate, tag_name, Declaration, DtdKind, MARKUP_NAME_STOPS};

/// One whitespace-delimited token of a DTD declaration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of the token in the tokenized region
    pub offset: usize,
}

/// Split a DTD region on whitespace.
///
/// Quoted literals and `(...)` / `[...]` groups are kept whole, spaces
/// included. Groups nest, and comments inside a group are skipped whole.
/// Tokenizing stops at the first `>` outside any quote or group.
pub fn tokenize(region: &str) -> Vec<Token<'_>> {
    let bytes = region.as_bytes();
    let mut tokens = Vec::new();
    let mut closers: Vec<u8> = Vec::new();
    let mut start: Option<usize> = None;
    let mut index = 0;

    while let Some(&b) = bytes.get(index) {
        if let Some(&closer) = closers.last() {
            let in_quote = matches!(closer, b'"' | b'\'');
            if b == closer && !(in_quote && index > 0 && bytes.get(index - 1) == Some(&b'\\')) {
                closers.pop();
            } else if !in_quote {
                if region.get(index..).is_some_and(|rest| rest.starts_with("<!--")) {
                    index = region
                        .get(index + 4..)
                        .and_then(|rest| rest.find("-->"))
                        .map_or(bytes.len(), |end| index + 4 + end + 3);
                    continue;
                }
                if let Some(nested) = closer_for(b) {
                    closers.push(nested);
                }
            }
            index += 1;
            continue;
        }

        if b.is_ascii_whitespace() || b == b'>' {
            if let Some(from) = start.take() {
                tokens.push(Token {
                    text: region.get(from..index).unwrap_or_default(),
                    offset: from,
                });
            }
            if b == b'>' {
                return tokens;
            }
        } else {
            start.get_or_insert(index);
            if let Some(closer) = closer_for(b) {
                closers.push(closer);
            }
        }
        index += 1;
    }

    if let Some(from) = start {
        tokens.push(Token {
            text: region.get(from..).unwrap_or_default(),
            offset: from,
        });
    }
    tokens
}

fn closer_for(opener: u8) -> Option<u8> {
    match opener {
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Content of a literal delimited by matching quotes
pub(crate) fn unquote(token: &str) -> Option<&str> {
    let quote = token.chars().next().filter(|c| matches!(c, '"' | '\''))?;
    if token.len() < 2 || !token.ends_with(quote) {
        return None;
    }
    token.get(1..token.len() - 1)
}

fn join(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect::<Vec<_>>().join(" ")
}

fn malformed(construct: &str, reason: &str) -> Error {
    Error::api(ErrorKind::MalformedDeclaration {
        construct: construct.to_string(),
        reason: reason.to_string(),
    })
}

impl Builder<'_> {
    /// Build a `<!KEYWORD ...>` declaration
    pub(super) fn build_dtd(&mut self, decl: &Declaration<'_>, kind: DtdKind) -> Result<Node> {
        let keyword = tag_name(decl.text, 2, MARKUP_NAME_STOPS);
        let region_start = 2 + keyword.len();
        let region = decl.text.get(region_start..).unwrap_or_default();
        let tokens = tokenize(region);

        let dtd = match kind {
            DtdKind::Attlist => Dtd::from(attribute_dtd(&tokens)?),
            DtdKind::Element => Dtd::from(element_dtd(&tokens)?),
            DtdKind::Entity => Dtd::from(entity_dtd(&tokens)?),
            DtdKind::Generic => Dtd::from(GenericDtd::new(keyword, join(&tokens))),
            DtdKind::Doctype => {
                let region_origin = locate(decl.text, decl.span.start, region_start);
                let mut doctype = self.doctype_dtd(&tokens, region, region_origin, decl.span)?;
                doctype.single_line = !decl.text.contains('\n');
                Dtd::from(doctype)
            }
        };
        Ok(Node::dtd(dtd))
    }

    fn doctype_dtd(
        &mut self,
        tokens: &[Token<'_>],
        region: &str,
        region_origin: Pos,
        span: Span,
    ) -> Result<DoctypeDtd> {
        let Some((root, rest)) = tokens.split_first() else {
            return Err(malformed("DOCTYPE", "missing root element name"));
        };
        let mut doctype = DoctypeDtd::new(root.text);

        let (external, subset) = match rest.split_last() {
            Some((last, external)) if last.text.starts_with('[') => (external, Some(*last)),
            _ => (rest, None),
        };

        let mut literals = external.iter().filter_map(|t| unquote(t.text));
        if let Some(ext_type) = external.first().filter(|t| unquote(t.text).is_none()) {
            doctype.ext_type = Some(ext_type.text.to_string());
        }
        // `SYSTEM note.dtd`: an unquoted link after the type
        let bare_link = doctype
            .ext_type
            .as_ref()
            .and(external.get(1))
            .map(|t| t.text.to_string());
        let first = literals.next().map(str::to_string).or(bare_link);
        let second = literals.next().map(str::to_string);
        match (doctype.ext_type.as_deref(), first, second) {
            (Some(EXTERN_PUBLIC), Some(public_id), Some(link)) => {
                doctype.public_id = Some(public_id);
                doctype.ext_link = Some(link);
            }
            (_, link, _) => doctype.ext_link = link,
        }

        if let Some(subset) = subset.filter(|t| t.text.len() >= 2) {
            let inner = subset.text.get(1..).unwrap_or_default();
            let inner = inner.strip_suffix(']').unwrap_or(inner);
            let origin = locate(region, region_origin, subset.offset + 1);

            self.context.enter_nested(self.config, span)?;
            let children = self.build_nodes(inner, origin);
            self.context.exit_nested();

            for child in children? {
                if child.node_type().is_dtd() {
                    doctype.push_child(child)?;
                } else {
                    warn!(
                        "Dropping {:?} node from DOCTYPE internal subset",
                        child.node_type()
                    );
                }
            }
            debug!("DOCTYPE {} with {} declarations", doctype.root_element, doctype.children().len());
        }
        Ok(doctype)
    }
}

fn attribute_dtd(tokens: &[Token<'_>]) -> Result<AttributeDtd> {
    let [element, attr, attr_type, value @ ..] = tokens else {
        return Err(malformed(
            "ATTLIST",
            "expected element name, attribute name and attribute type",
        ));
    };
    let dtd = AttributeDtd::new(element.text, attr.text, attr_type.text);
    Ok(match value {
        [single] => match unquote(single.text) {
            Some(literal) => dtd.with_value(literal, true),
            None => dtd.with_value(single.text, false),
        },
        _ => dtd.with_value(join(value), false),
    })
}

fn element_dtd(tokens: &[Token<'_>]) -> Result<ElementDtd> {
    let [name, content @ ..] = tokens else {
        return Err(malformed("ELEMENT", "expected element name and content"));
    };
    let content = match content {
        [] => return Err(malformed("ELEMENT", "expected element name and content")),
        [single] if group_end(single.text) == Some(single.text.len() - 1) => single
            .text
            .get(1..single.text.len() - 1)
            .unwrap_or_default()
            .to_string(),
        _ => join(content),
    };
    Ok(ElementDtd::new(name.text, content))
}

fn entity_dtd(tokens: &[Token<'_>]) -> Result<EntityDtd> {
    let [name, value @ ..] = tokens else {
        return Err(malformed("ENTITY", "expected entity name and value"));
    };
    match value {
        [] => Err(malformed("ENTITY", "expected entity name and value")),
        [single] => Ok(match unquote(single.text) {
            Some(literal) => EntityDtd::new(name.text, literal, true),
            None => EntityDtd::new(name.text, single.text, false),
        }),
        _ => Ok(EntityDtd::new(name.text, join(value), false)),
    }
}
