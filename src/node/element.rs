//! Payloads of the non-DTD node kinds

use std::borrow::Cow;

use crate::formatter::escape;
use crate::node::list::NodeList;

/// `<!-- name content -->`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comment {
    pub content: String,
    /// Print the node name as the first word of the comment
    pub show_name: bool,
}

impl Comment {
    pub fn new(content: impl Into<String>, show_name: bool) -> Self {
        Self {
            content: content.into(),
            show_name,
        }
    }
}

/// Text, either wrapped in a tag (`<name>text</name>`) or bare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextElement {
    pub text: String,
    /// Wrap the text in an opening and closing tag
    pub show_tag: bool,
    /// Escape the five XML-special characters when printing
    pub escape: bool,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            show_tag: true,
            escape: true,
        }
    }
}

impl TextElement {
    pub fn new(text: impl Into<String>, show_tag: bool) -> Self {
        Self {
            text: text.into(),
            show_tag,
            ..Self::default()
        }
    }

    /// Text with the five XML entities decoded.
    ///
    /// Parsed text is stored as written, so this is the way to read its
    /// character data. Text built through the API (escape flag set) is
    /// already plain and returned untouched.
    pub fn plain_text(&self) -> Cow<'_, str> {
        if self.escape {
            Cow::Borrowed(&self.text)
        } else {
            escape::unescape(&self.text)
        }
    }
}

/// Element holding child nodes; prints self-closed when it has none.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlElement {
    pub children: NodeList,
    /// Print children inline, without newlines or indentation
    pub single_line: bool,
}

impl XmlElement {
    pub fn new(single_line: bool) -> Self {
        Self {
            children: NodeList::new(),
            single_line,
        }
    }
}

/// `<?xml version="1.0" encoding="..." standalone="..."?>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlProlog {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

pub const DEFAULT_XML_VERSION: &str = "1.0";
pub const STANDALONE_YES: &str = "yes";
pub const STANDALONE_NO: &str = "no";

impl Default for XmlProlog {
    fn default() -> Self {
        Self {
            version: DEFAULT_XML_VERSION.to_string(),
            encoding: None,
            standalone: None,
        }
    }
}

impl XmlProlog {
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = Some(if standalone { STANDALONE_YES } else { STANDALONE_NO }.to_string());
        self
    }
}
