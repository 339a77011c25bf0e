//! The result diagram.
//!
//! A one-line bracketed rendering of the symbol-result tree, printed when
//! the `[parse]` directive is present. Each matched symbol becomes a
//! `[ ... ]` group, `!` marks a group with attached diagnostics, `*` marks
//! an argument filled from its default factory, and tokens nothing claimed
//! trail the line after `???-->`.
use argot_syntax::{SymbolId, TokenKind};

use crate::result::ParseResult;
use crate::tree::ResultKind;

pub fn diagram(result: &ParseResult<'_>) -> String {
    let mut out = String::new();
    for token in result.tokens() {
        if token.kind == TokenKind::Directive {
            out.push_str(&token.value);
            out.push(' ');
        }
    }
    render_command(result, result.grammar().root(), &mut out);
    let unmatched = result.unmatched_tokens();
    if !unmatched.is_empty() {
        out.push_str("   ???-->");
        for token in unmatched {
            out.push(' ');
            out.push_str(&token.value);
        }
    }
    out
}

fn render_command(result: &ParseResult<'_>, id: SymbolId, out: &mut String) {
    if result.errors_for(id).next().is_some() {
        out.push('!');
    }
    out.push_str("[ ");
    match result.find(id).and_then(|n| n.tokens.first()) {
        Some(token) => out.push_str(&token.value),
        None => out.push_str(result.grammar().name(id)),
    }
    for child in result.results().filter(|n| n.parent == Some(id)) {
        match &child.kind {
            ResultKind::Command => {
                out.push(' ');
                render_command(result, child.symbol, out);
            }
            ResultKind::Option => {
                out.push(' ');
                render_option(result, child.symbol, out);
            }
            ResultKind::Argument { .. } => {
                out.push(' ');
                render_argument(result, child.symbol, out);
            }
            ResultKind::Directive => {}
        }
    }
    out.push_str(" ]");
}

fn render_option(result: &ParseResult<'_>, id: SymbolId, out: &mut String) {
    if result.errors_for(id).next().is_some() {
        out.push('!');
    }
    out.push_str("[ ");
    match result.find(id).and_then(|n| n.tokens.first()) {
        Some(token) => out.push_str(&token.value),
        None => out.push_str(result.grammar().name(id)),
    }
    let backing = result.grammar().option(id).argument;
    if let Some(node) = result.find(backing) {
        if !node.tokens.is_empty() {
            out.push(' ');
            render_argument(result, node.symbol, out);
        }
    }
    out.push_str(" ]");
}

fn render_argument(result: &ParseResult<'_>, id: SymbolId, out: &mut String) {
    if result.errors_for(id).next().is_some() {
        out.push('!');
    }
    out.push('<');
    if let Some(node) = result.find(id) {
        for (i, token) in node.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&token.value);
        }
    }
    out.push('>');
    if result.default_used(id) {
        out.push('*');
    }
}
