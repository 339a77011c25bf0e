//! The immutable parse result.
//!
//! `ParseResult` wraps the finished symbol-result tree together with the
//! grammar it was parsed against, the full token stream, the ordered
//! diagnostics and the post-parse action selected by directives. All value
//! queries read the cached conversion; nothing here re-runs user code.
use argot_model::{Grammar, SymbolDecl, Value};
use argot_syntax::{ParseError, SymbolId, Token, TokenKind};

use crate::tree::{Conversion, ResultTree, SymbolResult};

/// What the embedding application should do after the parse, as requested
/// by a leading directive. At most one per parse; the first recognized
/// directive wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseAction {
    /// Invoke the matched command normally.
    None,
    /// Print the result diagram instead of invoking.
    Diagram,
    /// Print completion suggestions for the last token.
    Suggest,
    /// Apply `KEY=VALUE` environment assignments before invoking.
    Env,
}

pub struct ParseResult<'g> {
    grammar: &'g Grammar,
    tree: ResultTree,
    tokens: Vec<Token>,
    action: ParseAction,
    raw_line: Option<String>,
}

impl<'g> ParseResult<'g> {
    pub(crate) fn new(
        grammar: &'g Grammar,
        tree: ResultTree,
        tokens: Vec<Token>,
        action: ParseAction,
        raw_line: Option<String>,
    ) -> Self {
        Self {
            grammar,
            tree,
            tokens,
            action,
            raw_line,
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// The innermost command the walk descended into.
    pub fn command(&self) -> SymbolId {
        self.tree.innermost
    }

    /// Root-to-innermost chain of matched commands.
    pub fn command_path(&self) -> Vec<SymbolId> {
        self.grammar.path_to(self.tree.innermost)
    }

    pub fn find(&self, symbol: SymbolId) -> Option<&SymbolResult> {
        self.tree.get(symbol)
    }

    pub fn results(&self) -> impl Iterator<Item = &SymbolResult> {
        self.tree.iter()
    }

    /// The cached conversion outcome for an argument, or for an option's
    /// backing argument.
    pub fn conversion(&self, symbol: SymbolId) -> Option<&Conversion> {
        self.tree.get(self.value_symbol(symbol))?.conversion()
    }

    /// The converted value, when conversion succeeded.
    pub fn value_of(&self, symbol: SymbolId) -> Option<&Value> {
        self.tree.get(self.value_symbol(symbol))?.value()
    }

    /// Boolean-flag accessor; absent or non-boolean reads as `false`.
    pub fn flag(&self, symbol: SymbolId) -> bool {
        self.value_of(symbol)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn string(&self, symbol: SymbolId) -> Option<&str> {
        self.value_of(symbol).and_then(Value::as_str)
    }

    pub fn strings(&self, symbol: SymbolId) -> Vec<&str> {
        match self.value_of(symbol) {
            Some(Value::List(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::Str(s)) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    /// Whether the value came from the default factory, not user input.
    pub fn default_used(&self, symbol: SymbolId) -> bool {
        self.tree
            .get(self.value_symbol(symbol))
            .is_some_and(SymbolResult::default_used)
    }

    /// Every token of the parse, the synthesized root token included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The tokens the user actually typed (skips the root command token).
    pub fn input_tokens(&self) -> &[Token] {
        match self.tokens.first() {
            Some(first) if first.kind == TokenKind::Command => &self.tokens[1..],
            _ => &self.tokens,
        }
    }

    pub fn unmatched_tokens(&self) -> &[Token] {
        &self.tree.unmatched
    }

    pub fn unparsed_tokens(&self) -> &[Token] {
        &self.tree.unparsed
    }

    pub fn directives(&self) -> &[(String, Vec<String>)] {
        &self.tree.directives
    }

    pub fn directive(&self, name: &str) -> Option<&[String]> {
        self.tree.directive_values(name)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.tree.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.tree.errors.is_empty()
    }

    pub fn errors_for(&self, symbol: SymbolId) -> impl Iterator<Item = &ParseError> {
        self.tree
            .errors
            .iter()
            .filter(move |e| e.symbol == Some(symbol))
    }

    pub fn action(&self) -> ParseAction {
        self.action
    }

    /// The original command line, when the parse started from one.
    pub fn raw_line(&self) -> Option<&str> {
        self.raw_line.as_deref()
    }

    /// `KEY=VALUE` pairs carried by `[env:...]` directives. Values without
    /// an `=` are skipped.
    pub fn env_assignments(&self) -> Vec<(&str, &str)> {
        self.directive("env")
            .unwrap_or(&[])
            .iter()
            .filter_map(|v| v.split_once('='))
            .collect()
    }

    /// Map an option to its backing argument; everything else maps to
    /// itself.
    fn value_symbol(&self, symbol: SymbolId) -> SymbolId {
        match self.grammar.decl(symbol) {
            SymbolDecl::Option(decl) => decl.argument,
            _ => symbol,
        }
    }
}
