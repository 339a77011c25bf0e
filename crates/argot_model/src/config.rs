//! Tokenizer and parser configuration.

/// How `@file` references are expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFileMode {
    /// One argument per line.
    #[default]
    LineSeparated,
    /// Each line split like a command-line string (quotes respected).
    SpaceSeparated,
    Disabled,
}

#[derive(Clone, Debug)]
pub struct GrammarConfig {
    pub response_files: ResponseFileMode,
    /// POSIX short-option bundling (`-abc`).
    pub bundling: bool,
    /// `[name]` / `[name:value]` directive recognition.
    pub directives: bool,
    /// `[parse]`: replace invocation with the diagram formatter.
    pub parse_directive: bool,
    /// `[suggest]`: replace invocation with completion suggestions.
    pub suggest_directive: bool,
    /// `[env:K=V]`: stage environment assignments for the caller.
    pub env_directive: bool,
    /// Maximum edit distance for typo suggestions.
    pub max_suggestion_distance: usize,
    /// Attach unmatched tokens to the root command result instead of the
    /// innermost one.
    pub unmatched_to_root: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            response_files: ResponseFileMode::LineSeparated,
            bundling: true,
            directives: true,
            parse_directive: true,
            suggest_directive: true,
            env_directive: false,
            max_suggestion_distance: 3,
            unmatched_to_root: true,
        }
    }
}
