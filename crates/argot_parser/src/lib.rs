//! argot_parser: the grammar walker and result tree.
//!
//! Takes a token stream from `argot_lexer` and a grammar from
//! `argot_model`, and produces a `ParseResult`: the symbol-result tree,
//! typed converted values, directives, unmatched/unparsed tokens, ordered
//! diagnostics and the selected post-parse action. A single forward pass
//! builds the tree (no backtracking); the validation/conversion pipeline
//! then fills defaults, checks arities and runs user validators.
//!
//! Entry points: `parse(&args, &grammar)` and `parse_line(line, &grammar)`.
mod diagram;
mod pipeline;
mod result;
mod suggest;
mod tree;
mod walker;

pub use diagram::diagram;
pub use result::{ParseAction, ParseResult};
pub use suggest::{completions, suggestions};
pub use tree::{Conversion, ResultKind, ResultTree, SymbolResult};

use argot_lexer::{LexResult, tokenize, tokenize_line};
use argot_model::Grammar;

/// Parse an argument vector.
pub fn parse<'g>(args: &[String], grammar: &'g Grammar) -> ParseResult<'g> {
    finish(tokenize(args, grammar), grammar)
}

/// Parse a single command-line string (quote-aware splitting).
pub fn parse_line<'g>(line: &str, grammar: &'g Grammar) -> ParseResult<'g> {
    finish(tokenize_line(line, grammar), grammar)
}

fn finish<'g>(lex: LexResult, grammar: &'g Grammar) -> ParseResult<'g> {
    let (mut tree, action, tokens) = walker::walk(grammar, lex.tokens);
    // Tokenization errors come first in the diagnostic order.
    for e in lex.errors.into_iter().rev() {
        tree.errors.insert(0, e);
    }
    pipeline::validate(grammar, &mut tree);
    // A selected directive action replaces normal invocation, so typo
    // annotation is skipped for those parses.
    if action == ParseAction::None {
        suggest::annotate(grammar, &mut tree);
    }
    ParseResult::new(grammar, tree, tokens, action, lex.raw_line)
}
