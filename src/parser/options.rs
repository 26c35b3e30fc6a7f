//! Parsing options and configuration.

/// Options for reading XHTML snapshots.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Keep comment nodes in the tree
    pub keep_comments: bool,

    /// Resolve common HTML named entities (`&nbsp;`, `&mdash;`, ...)
    pub html_entities: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (mismatched end tags and bad entities are tolerated).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Keep or drop comments.
    pub fn with_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Enable or disable HTML named entity resolution.
    pub fn with_html_entities(mut self, enabled: bool) -> Self {
        self.html_entities = enabled;
        self
    }

    pub(crate) fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            keep_comments: true,
            html_entities: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .with_comments(false)
            .with_html_entities(false);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.keep_comments);
        assert!(!options.html_entities);
        assert!(options.is_lenient());
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.keep_comments);
        assert!(options.html_entities);
    }
}
