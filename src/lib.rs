//! tagtree: XML text to a mutable typed node tree and back
//!
//! This crate provides functionality to:
//! - Scan XML text into top-level declarations
//! - Build a tree of typed nodes (elements, text, comments, prolog, DTD)
//! - Edit the tree through a checked API
//! - Print it back, reusing the formatting inferred from the source
//!
//! # Examples
//! ```
//! use tagtree::{Document, Node, Result};
//!
//! fn example() -> Result<()> {
//!     let mut document = Document::parse("<list>\n\t<item>one</item>\n</list>\n")?;
//!     if let Some(list) = document.get_mut(0) {
//!         list.push_child(Node::text_element("item", "two")?)?;
//!     }
//!     assert_eq!(
//!         document.print(),
//!         "<list>\n\t<item>one</item>\n\t<item>two</item>\n</list>\n"
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use std::path::Path;

use tracing::{debug, instrument};

pub mod builder;
pub mod compare;
pub mod config;
pub mod document;
pub mod error;
pub mod formatter;
pub mod node;
pub mod scanner;
pub mod utils;

// Re-exports
pub use compare::{documents_equal, nodes_equal};
pub use config::ParserConfig;
pub use document::Document;
pub use error::{Error, ErrorKind, Pos, Result, Span};
pub use formatter::{serialize, serialize_with, FormatConfig, Indent, LineEnding};
pub use node::{Node, NodeKind, NodeList, NodeType};

/// Load a document from disk with the default configuration
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let mut document = Document::new();
    let diagnostics = document.load_file(path, &ParserConfig::default())?;
    debug!("Parsing completed with {} skipped declarations", diagnostics.len());
    Ok(document)
}

/// Parse a document held in memory with the default configuration
pub fn parse_str(text: &str) -> Result<Document> {
    Document::parse(text)
}
