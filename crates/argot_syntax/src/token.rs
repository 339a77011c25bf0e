//! Token definitions.
//!
//! Defines the classified tokens produced by the tokenizer: command, option
//! and argument tokens, directives, the `--` end-of-arguments marker, and
//! operands passed through after it.
use crate::Location;

/// Stable index of a declared symbol in the grammar arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

/// Token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A value token, destined for an option or a positional argument.
    Argument,
    /// A token matching a command alias.
    Command,
    /// A token matching an option alias.
    Option,
    /// `[name]` / `[name:value]` before any other token.
    Directive,
    /// The literal `--`.
    EndOfArguments,
    /// Anything after `--`, passed through verbatim.
    Operand,
}

/// One classified element of the token stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    /// Index in the token stream; `None` for implicit tokens (injected
    /// defaults, synthesized root) that were never typed by the user.
    pub position: Option<u32>,
    /// Resolved lazily by the grammar walker.
    pub symbol: Option<SymbolId>,
    pub location: Location,
}

impl Token {
    pub fn new(
        value: impl Into<String>,
        kind: TokenKind,
        position: u32,
        location: Location,
    ) -> Self {
        Self {
            value: value.into(),
            kind,
            position: Some(position),
            symbol: None,
            location,
        }
    }

    /// A token that does not correspond to any typed input.
    pub fn implicit(value: impl Into<String>, kind: TokenKind, location: Location) -> Self {
        Self {
            value: value.into(),
            kind,
            position: None,
            symbol: None,
            location,
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn is_implicit(&self) -> bool {
        self.position.is_none()
    }
}
