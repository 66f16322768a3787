//! Error types for tagtree

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Default for Pos {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }

    /// First byte of an input
    pub const fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self::new(pos, pos)
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    /// Whether the span points into source text (API errors carry an empty span)
    pub const fn is_located(&self) -> bool {
        self.start.line > 0
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidName { name: String },
    MalformedDeclaration { construct: String, reason: String },
    OutOfRange { index: usize, len: usize },
    UnterminatedConstruct { construct: String },
    InvalidChild { reason: String },
    MaxDepthExceeded { max: usize },
    MaxSizeExceeded { max: usize },
    Io(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => write!(f, "invalid name: {name:?}"),
            Self::MalformedDeclaration { construct, reason } => {
                write!(f, "malformed {construct} declaration: {reason}")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} nodes")
            }
            Self::UnterminatedConstruct { construct } => write!(f, "unterminated {construct}"),
            Self::InvalidChild { reason } => write!(f, "invalid child: {reason}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::Io(message) => write!(f, "io error: {message}"),
        }
    }
}

/// Main error type for tagtree
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    /// Error raised by the node API, not tied to any source text
    pub fn api(kind: ErrorKind) -> Self {
        Self::new(kind, Span::empty())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Re-anchor an error raised while building a declaration at that declaration
    pub fn located(mut self, span: Span) -> Self {
        if !self.span.is_located() {
            self.span = span;
        }
        self
    }

    /// Recoverable errors skip one declaration; the rest of the load goes on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidName { .. } | ErrorKind::MalformedDeclaration { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_located() {
            write!(f, "error at {}: {}", self.span.start, self.message)
        } else {
            write!(f, "error: {}", self.message)
        }
    }
}

/// Result type alias for tagtree
pub type Result<T> = std::result::Result<T, Error>;
