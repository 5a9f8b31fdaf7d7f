//! Compiler configuration.

/// Separator used by `GROUP_CONCAT` unless configured otherwise: the ASCII
/// unit separator, which cannot occur in ordinary text values.
pub const DEFAULT_GROUP_CONCAT_SEPARATOR: &str = "\u{1F}";

/// Options for [`QueryCompiler`](crate::QueryCompiler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Join string for `GROUP_CONCAT` aggregates.
    pub group_concat_separator: String,
    /// Whether joining two basic patterns concatenates their triples
    /// instead of producing a join node.
    pub merge_basic_patterns: bool,
}

impl CompilerConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            group_concat_separator: DEFAULT_GROUP_CONCAT_SEPARATOR.to_string(),
            merge_basic_patterns: true,
        }
    }

    /// Sets the `GROUP_CONCAT` separator.
    pub fn with_group_concat_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_concat_separator = separator.into();
        self
    }

    /// Enables or disables merging of adjacent basic patterns.
    pub fn with_merge_basic_patterns(mut self, enabled: bool) -> Self {
        self.merge_basic_patterns = enabled;
        self
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}
