//! Typo suggestions and completions.
//!
//! Suggestion candidates are the identifiers visible at the command a
//! diagnostic attaches to: the command's own aliases, its subcommand aliases
//! and the in-scope option aliases. Suggestions rank by edit distance
//! (adjacent transpositions count as one edit), then by longest shared prefix
//! with the input; only candidates at the best distance are reported, and all
//! of them are when tied. Completions list the children only.
use argot_model::{Grammar, SymbolDecl};
use argot_syntax::{
    ParseErrorKind, SymbolId, TokenKind, common_prefix_len, levenshtein_distance,
};

use crate::result::ParseResult;
use crate::tree::ResultTree;

/// Attach suggestion text to every unrecognized-token diagnostic, ranking
/// against the scope of the command the diagnostic is attached to.
pub(crate) fn annotate(grammar: &Grammar, tree: &mut ResultTree) {
    let max = grammar.config().max_suggestion_distance;
    let innermost = tree.innermost;
    for error in &mut tree.errors {
        if error.suggestion.is_some() {
            continue;
        }
        let ParseErrorKind::UnrecognizedToken(value) = &error.kind else {
            continue;
        };
        let scope = match error.symbol {
            Some(s) if matches!(grammar.decl(s), SymbolDecl::Command(_)) => s,
            _ => innermost,
        };
        let matches = rank(value, &candidate_names(grammar, scope), max);
        if !matches.is_empty() {
            error.suggestion = Some(format_suggestion(&matches));
        }
    }
}

/// Near-miss candidates for an arbitrary input at a given command scope.
pub fn suggestions(grammar: &Grammar, scope: SymbolId, input: &str) -> Vec<String> {
    let candidates = candidate_names(grammar, scope);
    rank(input, &candidates, grammar.config().max_suggestion_distance)
}

/// Prefix completions for the last user token of a finished parse. An empty
/// or fully matched last token completes to everything in scope.
pub fn completions(result: &ParseResult<'_>) -> Vec<String> {
    let scope = result.command();
    let mut candidates = child_names(result.grammar(), scope);
    candidates.sort();
    candidates.dedup();

    let last = result
        .input_tokens()
        .iter()
        .rev()
        .find(|t| t.kind != TokenKind::Directive);
    let prefix = match last {
        Some(token) if token.symbol.is_none() => token.value.as_str(),
        _ => "",
    };
    candidates.retain(|c| c.starts_with(prefix));
    candidates
}

/// The scope command's own aliases plus everything a child could be.
fn candidate_names(grammar: &Grammar, scope: SymbolId) -> Vec<String> {
    let mut names: Vec<String> = grammar
        .command(scope)
        .all_aliases()
        .map(str::to_string)
        .collect();
    names.extend(child_names(grammar, scope));
    names
}

fn child_names(grammar: &Grammar, scope: SymbolId) -> Vec<String> {
    let decl = grammar.command(scope);
    let mut names: Vec<String> = decl
        .subcommands
        .iter()
        .flat_map(|s| grammar.command(*s).all_aliases())
        .map(str::to_string)
        .collect();
    for option in grammar.options_in_scope(scope) {
        names.extend(grammar.option(option).all_aliases().map(str::to_string));
    }
    names
}

/// All candidates at the best distance within `max`, longest shared prefix
/// first.
fn rank(input: &str, candidates: &[String], max: usize) -> Vec<String> {
    let mut scored: Vec<(usize, usize, &String)> = candidates
        .iter()
        .filter_map(|c| {
            let d = levenshtein_distance(input, c);
            if d <= max {
                Some((d, common_prefix_len(input, c), c))
            } else {
                None
            }
        })
        .collect();
    let Some(best) = scored.iter().map(|(d, _, _)| *d).min() else {
        return Vec::new();
    };
    scored.retain(|(d, _, _)| *d == best);
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(b.2)));
    scored.into_iter().map(|(_, _, c)| c.clone()).collect()
}

fn format_suggestion(matches: &[String]) -> String {
    if matches.len() == 1 {
        format!("did you mean '{}'?", matches[0])
    } else {
        let quoted: Vec<String> = matches.iter().map(|m| format!("'{m}'")).collect();
        format!("did you mean one of {}?", quoted.join(", "))
    }
}
