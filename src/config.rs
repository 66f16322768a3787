use crate::error::{Error, ErrorKind, Result, Span};

pub const DEFAULT_MAX_DEPTH: usize = 128;
pub const DEFAULT_MAX_SIZE: usize = 16 * 1024 * 1024; // 16MB

/// Configuration for parser limits and recovery
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum nesting depth of rescanned content (elements, internal subsets)
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Pass unterminated constructs to the builder instead of failing the load
    pub recover_unterminated: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            recover_unterminated: false,
        }
    }
}

impl ParserConfig {
    /// Lenient configuration: unterminated constructs are built best-effort.
    pub fn recovering() -> Self {
        Self {
            recover_unterminated: true,
            ..Self::default()
        }
    }

    pub fn validate_size(&self, input: &str) -> Result<()> {
        if input.len() > self.max_size {
            return Err(Error::new(
                ErrorKind::MaxSizeExceeded { max: self.max_size },
                Span::empty(),
            ));
        }
        Ok(())
    }
}

/// Tracks nesting depth while content is rescanned
#[derive(Debug, Default)]
pub struct ParsingContext {
    current_depth: usize,
}

impl ParsingContext {
    pub fn new() -> Self {
        Self { current_depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &ParserConfig, span: Span) -> Result<()> {
        if self.current_depth >= config.max_depth {
            return Err(Error::new(
                ErrorKind::MaxDepthExceeded {
                    max: config.max_depth,
                },
                span,
            ));
        }
        self.current_depth += 1;
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 2,
            ..ParserConfig::default()
        };
        let mut context = ParsingContext::new();
        assert!(context.enter_nested(&config, Span::empty()).is_ok());
        assert!(context.enter_nested(&config, Span::empty()).is_ok());
        let err = context.enter_nested(&config, Span::empty());
        assert!(matches!(
            err.map_err(|e| e.kind().clone()),
            Err(ErrorKind::MaxDepthExceeded { max: 2 })
        ));
        context.exit_nested();
        assert_eq!(context.depth(), 1);
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 4,
            ..ParserConfig::default()
        };
        assert!(config.validate_size("<a/>").is_ok());
        assert!(config.validate_size("<ab/>").is_err());
    }

    #[test]
    fn test_recovering_keeps_limits() {
        let config = ParserConfig::recovering();
        assert!(config.recover_unterminated);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }
}
