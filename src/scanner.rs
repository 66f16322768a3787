//! Tag scanner: splits raw text into top-level declarations.
//!
//! The scanner does not build nodes. It only finds where each construct
//! starts and ends, guesses its kind, and records the formatting hints
//! (leading indent, trailing newline) that the serializer reuses later.
//! Paired elements are scanned as one declaration; their inner content is
//! rescanned by the builder.

pub mod cursor;

pub use cursor::{locate, Cursor};

use crate::error::{Pos, Span};

/// Bytes ending an element name inside a tag
pub(crate) const ELEMENT_NAME_STOPS: &[u8] = b"/>";
/// Bytes ending the name of a `<!` or `<?` construct
pub(crate) const MARKUP_NAME_STOPS: &[u8] = b">?";

/// DTD declaration subtype selected by the keyword after `<!`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DtdKind {
    Attlist,
    Doctype,
    Element,
    Entity,
    Generic,
}

/// Kind hint attached to every scanned declaration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Comment,
    Prolog,
    ProcessingInstruction,
    Dtd(DtdKind),
    /// Self-closing element, or paired element whose content holds markup
    Element,
    /// Paired element whose content is text only
    TextElement,
    /// Bare text between tags
    Text,
}

impl DeclKind {
    pub fn is_dtd(self) -> bool {
        matches!(self, Self::Dtd(_))
    }

    /// Human-readable construct name for diagnostics
    pub fn construct(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Prolog => "prolog",
            Self::ProcessingInstruction => "processing instruction",
            Self::Dtd(DtdKind::Attlist) => "ATTLIST",
            Self::Dtd(DtdKind::Doctype) => "DOCTYPE",
            Self::Dtd(DtdKind::Element) => "ELEMENT",
            Self::Dtd(DtdKind::Entity) => "ENTITY",
            Self::Dtd(DtdKind::Generic) => "DTD",
            Self::Element | Self::TextElement => "element",
            Self::Text => "text",
        }
    }
}

/// One top-level construct found by the scanner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub kind: DeclKind,
    /// Whole construct, without the folded indent or newline
    pub text: &'a str,
    /// Opening tag of an element (equal to `text` for single-part constructs)
    pub open_tag: &'a str,
    /// Text strictly between the opening and closing tag of a paired element
    pub content: Option<&'a str>,
    /// Where `content` starts in the document
    pub content_origin: Pos,
    /// Tabs or spaces indent the construct from the start of its line
    pub leading_indent: bool,
    /// A newline followed the construct
    pub trailing_newline: bool,
    /// False when input ended before the construct was closed
    pub complete: bool,
    pub span: Span,
}

impl Declaration<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extent of one construct, before formatting hints are attached
struct Extent {
    kind: DeclKind,
    open_end: usize,
    content: Option<(usize, usize, Pos)>,
    complete: bool,
}

/// Result of scanning the body of a paired element
struct Body {
    content_end: usize,
    markup: bool,
    closed: bool,
}

/// Scanner yielding declarations in source order
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Scanner over a region of a larger document starting at `origin`
    pub const fn with_origin(input: &'a str, origin: Pos) -> Self {
        Self {
            cursor: Cursor::with_origin(input, origin),
        }
    }

    fn next_declaration(&mut self) -> Option<Declaration<'a>> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return None;
            }

            let start = self.cursor.pos();
            let start_pos = self.cursor.position();
            let extent = match (self.cursor.current(), self.cursor.peek(1)) {
                (Some(b'<'), _) if self.cursor.starts_with(b"<!--") => self.scan_comment(),
                (Some(b'<'), Some(b'!' | b'?')) => self.scan_markup(start),
                (Some(b'<'), _) => self.scan_element(start),
                _ => self.scan_text(),
            };

            let mut text = self.cursor.slice_from(start);
            let trailing_newline = if extent.kind == DeclKind::Text {
                let trimmed = text.trim_end();
                let folded = text.get(trimmed.len()..).is_some_and(|tail| tail.contains('\n'));
                if folded {
                    text = trimmed;
                }
                folded
            } else {
                match (self.cursor.current(), self.cursor.peek(1)) {
                    (Some(b'\n'), _) | (Some(b'\r'), Some(b'\n')) => true,
                    _ => false,
                }
            };

            if text.trim().is_empty() {
                continue;
            }

            let (content, content_origin) = match extent.content {
                Some((from, to, origin)) => (Some(self.cursor.slice(from, to)), origin),
                None => (None, start_pos),
            };

            return Some(Declaration {
                kind: extent.kind,
                text,
                open_tag: self.cursor.slice(start, extent.open_end.max(start)),
                content,
                content_origin,
                leading_indent: self.indented_at(start),
                trailing_newline,
                complete: extent.complete,
                span: Span::new(start_pos, locate(text, start_pos, text.len())),
            });
        }
    }

    /// Whether only tabs or spaces sit between the start of the line and `start`,
    /// and at least one of them does.
    fn indented_at(&self, start: usize) -> bool {
        if !matches!(self.cursor.byte_before(start), Some(b'\t' | b' ')) {
            return false;
        }
        let before = self.cursor.slice(0, start);
        let line = before.trim_end_matches([' ', '\t']);
        line.is_empty() || line.ends_with('\n')
    }

    fn scan_comment(&mut self) -> Extent {
        self.cursor.advance_by(4);
        let complete = self.cursor.skip_past(b"-->");
        Extent {
            kind: DeclKind::Comment,
            open_end: self.cursor.pos(),
            content: None,
            complete,
        }
    }

    fn scan_markup(&mut self, start: usize) -> Extent {
        let complete = self.skip_tag_part();
        let text = self.cursor.slice_from(start);
        Extent {
            kind: classify_markup(text),
            open_end: self.cursor.pos(),
            content: None,
            complete,
        }
    }

    fn scan_element(&mut self, start: usize) -> Extent {
        let complete = self.skip_tag_part();
        let open_end = self.cursor.pos();
        let open_tag = self.cursor.slice_from(start);
        let name = tag_name(open_tag, 1, ELEMENT_NAME_STOPS);

        let single_part = !complete
            || open_tag.ends_with("/>")
            || open_tag.starts_with("</")
            || name.is_empty();
        if single_part {
            return Extent {
                kind: DeclKind::Element,
                open_end,
                content: None,
                complete,
            };
        }

        let content_origin = self.cursor.position();
        let body = self.scan_element_body(name);
        Extent {
            kind: if body.markup {
                DeclKind::Element
            } else {
                DeclKind::TextElement
            },
            open_end,
            content: Some((open_end, body.content_end, content_origin)),
            complete: body.closed,
        }
    }

    /// Scan forward to the closing tag matching `name`, counting nested
    /// same-name elements. Comments and tags are skipped whole so quoted
    /// attribute values cannot be mistaken for structure.
    fn scan_element_body(&mut self, name: &str) -> Body {
        let mut depth = 1usize;
        let mut markup = false;

        loop {
            match self.cursor.current() {
                None => {
                    return Body {
                        content_end: self.cursor.pos(),
                        markup,
                        closed: false,
                    }
                }
                Some(b'<') => {}
                Some(_) => {
                    self.cursor.advance();
                    continue;
                }
            }

            let tag_start = self.cursor.pos();
            if self.cursor.starts_with(b"<!--") {
                markup = true;
                self.cursor.skip_past(b"-->");
                continue;
            }

            let rest = self.cursor.remaining();
            let closes = rest.get(1) == Some(&b'/') && names_tag(rest.get(2..), name);
            let opens = names_tag(rest.get(1..), name);
            if !self.skip_tag_part() {
                return Body {
                    content_end: self.cursor.pos(),
                    markup,
                    closed: false,
                };
            }

            if closes {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Body {
                        content_end: tag_start,
                        markup,
                        closed: true,
                    };
                }
            } else if opens && !self.cursor.slice_from(tag_start).ends_with("/>") {
                depth += 1;
            }
            markup = true;
        }
    }

    fn scan_text(&mut self) -> Extent {
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }
        Extent {
            kind: DeclKind::Text,
            open_end: self.cursor.pos(),
            content: None,
            complete: true,
        }
    }

    /// Advance past one `<...>` tag part, tracking `<`/`>` depth outside
    /// quotes and skipping embedded comments. Returns false when the input
    /// ends first; the cursor is then at end of input.
    fn skip_tag_part(&mut self) -> bool {
        self.cursor.advance();
        let mut depth = 1usize;
        let mut quote: Option<u8> = None;
        let mut previous = b'<';

        while let Some(b) = self.cursor.current() {
            if quote.is_none() && self.cursor.starts_with(b"<!--") {
                if !self.cursor.skip_past(b"-->") {
                    return false;
                }
                previous = b'>';
                continue;
            }

            self.cursor.advance();
            match quote {
                Some(q) => {
                    if b == q && previous != b'\\' {
                        quote = None;
                    }
                }
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'<' => depth += 1,
                    b'>' => {
                        depth -= 1;
                        if depth == 0 {
                            return true;
                        }
                    }
                    _ => {}
                },
            }
            previous = b;
        }
        false
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Declaration<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_declaration()
    }
}

/// Split `input` into its top-level declarations
pub fn scan(input: &str) -> Vec<Declaration<'_>> {
    Scanner::new(input).collect()
}

/// Name starting at byte `from` of a tag, ending at whitespace or any of `stops`
pub(crate) fn tag_name<'t>(tag: &'t str, from: usize, stops: &[u8]) -> &'t str {
    let rest = tag.get(from..).unwrap_or_default();
    let end = rest
        .bytes()
        .position(|b| b.is_ascii_whitespace() || stops.contains(&b))
        .unwrap_or(rest.len());
    rest.get(..end).unwrap_or_default()
}

/// Whether `bytes` starts with the tag name `name` followed by a name boundary
fn names_tag(bytes: Option<&[u8]>, name: &str) -> bool {
    let Some(bytes) = bytes else {
        return false;
    };
    bytes.starts_with(name.as_bytes())
        && match bytes.get(name.len()) {
            None => true,
            Some(b) => b.is_ascii_whitespace() || ELEMENT_NAME_STOPS.contains(b),
        }
}

fn classify_markup(text: &str) -> DeclKind {
    let name = tag_name(text, 2, MARKUP_NAME_STOPS);
    if text.starts_with("<?") {
        return if name == "xml" {
            DeclKind::Prolog
        } else {
            DeclKind::ProcessingInstruction
        };
    }
    DeclKind::Dtd(match name {
        "ATTLIST" => DtdKind::Attlist,
        "DOCTYPE" => DtdKind::Doctype,
        "ELEMENT" => DtdKind::Element,
        "ENTITY" => DtdKind::Entity,
        _ => DtdKind::Generic,
    })
}
