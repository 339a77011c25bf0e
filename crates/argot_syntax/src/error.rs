//! Parse errors.
//!
//! Malformed user input never aborts a parse; every failure becomes a
//! `ParseError` appended to the result's diagnostic list. The kind enum
//! carries structured payloads and `ParseErrorFormatter` turns them into
//! user-facing messages.
use crate::SymbolId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Response file missing or unreadable; expansion of that reference is
    /// abandoned, the rest of the parse continues.
    ResponseFileError { path: String, reason: String },
    /// A token no declared symbol claimed.
    UnrecognizedToken(String),
    /// A required option or argument received no tokens and has no default.
    RequiredMissing { name: String },
    /// A command that requires a subcommand was invoked without one.
    RequiredSubcommand { name: String },
    TooFewArguments { name: String, min: u32, actual: u32 },
    TooManyArguments { name: String, max: u32, actual: u32 },
    /// A conversion function reported failure for the named symbol.
    ConversionFailed { name: String, message: String },
    /// A user validator returned a message.
    ValidationFailed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// Attachment point in the result tree, when one exists.
    pub symbol: Option<SymbolId>,
    pub suggestion: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, symbol: Option<SymbolId>) -> Self {
        Self {
            message: ParseErrorFormatter::format(&kind),
            kind,
            symbol,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Errors produced before the grammar walk (bad response files).
    pub fn is_tokenization(&self) -> bool {
        matches!(self.kind, ParseErrorKind::ResponseFileError { .. })
    }
}

pub struct ParseErrorFormatter;

impl ParseErrorFormatter {
    pub fn format(kind: &ParseErrorKind) -> String {
        match kind {
            ParseErrorKind::ResponseFileError { path, reason } => {
                format!("Cannot read response file '{}': {}", path, reason)
            }
            ParseErrorKind::UnrecognizedToken(value) => {
                format!("Unrecognized command or argument '{}'", value)
            }
            ParseErrorKind::RequiredMissing { name } => {
                format!("Required '{}' was not provided", name)
            }
            ParseErrorKind::RequiredSubcommand { name } => {
                format!("Command '{}' requires a subcommand", name)
            }
            ParseErrorKind::TooFewArguments { name, min, actual } => {
                format!(
                    "'{}' expects at least {} argument(s) but got {}",
                    name, min, actual
                )
            }
            ParseErrorKind::TooManyArguments { name, max, actual } => {
                format!(
                    "'{}' expects at most {} argument(s) but got {}",
                    name, max, actual
                )
            }
            ParseErrorKind::ConversionFailed { name, message } => {
                format!("Cannot convert value for '{}': {}", name, message)
            }
            ParseErrorKind::ValidationFailed(message) => message.clone(),
        }
    }
}

/// Render one error as a display line, with its suggestion if any.
pub fn render_error(error: &ParseError) -> String {
    let mut out = String::new();
    out.push_str("error: ");
    out.push_str(&error.message);
    if let Some(s) = &error.suggestion {
        out.push('\n');
        out.push_str("  = suggestion: ");
        out.push_str(s);
    }
    out
}

pub fn render_errors(errors: &[ParseError]) -> String {
    let mut out = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_error(e));
    }
    out
}
