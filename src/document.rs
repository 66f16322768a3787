//! Document: the ordered top-level node sequence and its load/print cycle

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::builder::Builder;
use crate::config::ParserConfig;
use crate::error::{Error, Pos, Result};
use crate::formatter::{self, FormatConfig};
use crate::node::{Node, NodeList};
use crate::utils::{read_file, write_file};

/// Owner of the top-level nodes of an XML document.
///
/// Several top-level elements are allowed; nothing enforces a single root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    nodes: NodeList,
    path: Option<PathBuf>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into a new document with the default configuration.
    /// Skipped declarations are logged and otherwise dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut document = Self::new();
        document.load(text)?;
        Ok(document)
    }

    /// Replace the contents with the nodes parsed from `text`.
    ///
    /// Returns the recoverable errors of declarations that were skipped.
    /// A fatal error leaves the document empty.
    pub fn load(&mut self, text: &str) -> Result<Vec<Error>> {
        self.load_with(text, &ParserConfig::default())
    }

    pub fn load_with(&mut self, text: &str, config: &ParserConfig) -> Result<Vec<Error>> {
        self.nodes.clear();
        config.validate_size(text)?;

        let mut builder = Builder::new(config);
        let nodes = builder.build_nodes(text, Pos::start())?;
        self.nodes = nodes.into();

        let diagnostics = builder.into_diagnostics();
        if !diagnostics.is_empty() {
            warn!("{} declarations skipped", diagnostics.len());
        }
        debug!("Loaded {} top-level nodes", self.nodes.len());
        Ok(diagnostics)
    }

    /// Load a file and remember its path
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_file(&mut self, path: impl AsRef<Path>, config: &ParserConfig) -> Result<Vec<Error>> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let diagnostics = self.load_with(&text, config)?;
        self.path = Some(path.to_path_buf());
        info!("Loaded {} nodes", self.nodes.len());
        Ok(diagnostics)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_file(path, &self.print())
    }

    pub fn save_with(&self, path: impl AsRef<Path>, config: &FormatConfig) -> Result<()> {
        write_file(path, &self.print_with(config))
    }

    /// File this document was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Every top-level node printed at level 0
    pub fn print(&self) -> String {
        self.print_with(&FormatConfig::default())
    }

    pub fn print_with(&self, config: &FormatConfig) -> String {
        formatter::serialize_all(&self.nodes, config)
    }

    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeList {
        &mut self.nodes
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

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub fn insert(&mut self, index: usize, node: Node) -> Result<()> {
        self.nodes.insert(index, node)
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Remove a top-level node with its whole subtree
    pub fn remove(&mut self, index: usize) -> Result<Node> {
        self.nodes.remove(index)
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    pub fn find(&self, name: &str, offset: usize) -> Option<usize> {
        self.nodes.find(name, offset)
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.nodes.count_named(name)
    }

    /// Drop every node and forget the source path
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.path = None;
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
