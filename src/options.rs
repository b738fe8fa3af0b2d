/// Default bound on how deeply groups may nest.
pub const DEFAULT_MAX_NESTING: usize = 64;

/// Knobs for a single compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Rule that must be defined for the grammar to be accepted.
    pub start_rule: Option<String>,
    /// Maximum depth of nested parenthesized groups.
    pub max_nesting: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            start_rule: None,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl CompileOptions {
    pub fn with_start_rule(mut self, name: impl Into<String>) -> Self {
        self.start_rule = Some(name.into());
        self
    }

    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }
}
