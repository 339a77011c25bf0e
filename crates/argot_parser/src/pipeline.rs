//! Validation and conversion.
//!
//! Runs after the walk over the finished tree, innermost command first.
//! Per result: default-value materialization, arity check, memoized
//! conversion, user validators (fail-fast per symbol), required check.
//! Only the innermost command gets the full set; ancestor levels get the
//! reduced defaults-and-required pass, plus conversion for results that
//! actually collected tokens so their values stay reachable. Required
//! diagnostics are inserted ahead of all others.
use std::collections::HashSet;

use argot_model::{ArgumentDecl, DefaultFn, Grammar, ValidatorFn, Value, ValueKind};
use argot_syntax::{Location, ParseError, ParseErrorKind, SymbolId, Token, TokenKind};

use crate::tree::{Conversion, ResultKind, ResultTree};

pub(crate) fn validate(grammar: &Grammar, tree: &mut ResultTree) {
    let innermost = tree.innermost;
    let path = grammar.path_to(innermost);
    let mut required: Vec<ParseError> = Vec::new();
    let mut fully_checked: HashSet<SymbolId> = HashSet::new();

    for &cmd in path.iter().rev() {
        let full = cmd == innermost;
        let decl = grammar.command(cmd);

        if full {
            if decl.require_subcommand
                && !decl.subcommands.iter().any(|s| tree.get(*s).is_some())
            {
                required.push(ParseError::new(
                    ParseErrorKind::RequiredSubcommand {
                        name: decl.name.clone(),
                    },
                    Some(cmd),
                ));
            }
            run_validators(&decl.validators, tree, cmd, cmd);
            // Recursive ancestor options are validated here, once, and only
            // here; the ancestor pass below skips them.
            for option in grammar.options_in_scope(cmd) {
                fully_checked.insert(option);
                process_option(grammar, tree, option, true, &mut required);
            }
        } else {
            for &option in decl.options.iter() {
                if fully_checked.contains(&option) {
                    continue;
                }
                process_option(grammar, tree, option, false, &mut required);
            }
        }
        for &argument in decl.arguments.iter() {
            process_argument(grammar, tree, argument, Some(cmd), full, &mut required);
        }
    }

    for e in required.into_iter().rev() {
        tree.errors.insert(0, e);
    }
}

fn process_option(
    grammar: &Grammar,
    tree: &mut ResultTree,
    option: SymbolId,
    full: bool,
    required: &mut Vec<ParseError>,
) {
    let decl = grammar.option(option);
    let arg_id = decl.argument;
    let arg = grammar.argument(arg_id);
    let mentioned = tree.get(option).is_some();
    let count = tree
        .get(arg_id)
        .map(|n| n.tokens.len() as u32)
        .unwrap_or(0);

    if mentioned && count == 0 && arg.value_kind == ValueKind::Bool {
        // Bare flag: fill the one implicit boolean slot.
        tree.get_or_insert_argument(arg_id, Some(option)).tokens.push(
            Token::implicit("true", TokenKind::Argument, Location::implicit())
                .with_symbol(arg_id),
        );
    } else if !mentioned && count == 0 {
        if let Some(default) = &arg.default {
            // The option appears in the tree even though it was never
            // typed, so result queries and the diagram see the default.
            tree.get_or_insert(option, decl.parent, ResultKind::Option);
            materialize_default(tree, arg_id, Some(option), default);
        } else if decl.required {
            required.push(ParseError::new(
                ParseErrorKind::RequiredMissing {
                    name: decl.name.clone(),
                },
                Some(option),
            ));
        }
        return;
    }

    check_and_convert(tree, arg_id, &decl.name, option, arg);
    if full {
        run_validators(&decl.validators, tree, arg_id, option);
    }
}

fn process_argument(
    grammar: &Grammar,
    tree: &mut ResultTree,
    arg_id: SymbolId,
    parent: Option<SymbolId>,
    full: bool,
    required: &mut Vec<ParseError>,
) {
    let arg = grammar.argument(arg_id);
    if tree.get(arg_id).is_none() {
        if let Some(default) = &arg.default {
            materialize_default(tree, arg_id, parent, default);
            return;
        }
        if arg.arity.min > 0 {
            required.push(ParseError::new(
                ParseErrorKind::RequiredMissing {
                    name: arg.name.clone(),
                },
                Some(arg_id),
            ));
        }
        return;
    }

    check_and_convert(tree, arg_id, &arg.name, arg_id, arg);
    if full {
        run_validators(&arg.validators, tree, arg_id, arg_id);
    }
}

/// Invoke the factory exactly once and seed the conversion cache.
fn materialize_default(
    tree: &mut ResultTree,
    arg_id: SymbolId,
    parent: Option<SymbolId>,
    default: &DefaultFn,
) {
    let value = default();
    let node = tree.get_or_insert_argument(arg_id, parent);
    if !node.tokens.is_empty() {
        return;
    }
    node.tokens.push(
        Token::implicit(value.to_string(), TokenKind::Argument, Location::implicit())
            .with_symbol(arg_id),
    );
    node.mark_default();
    node.set_conversion(Conversion::Success(value));
}

/// Arity check, then the (memoized) conversion.
fn check_and_convert(
    tree: &mut ResultTree,
    arg_id: SymbolId,
    display_name: &str,
    attach: SymbolId,
    arg: &ArgumentDecl,
) {
    let (tokens, cached) = match tree.get(arg_id) {
        Some(node) => (node.tokens.clone(), node.conversion().is_some()),
        None => return,
    };
    if cached {
        return;
    }
    let count = tokens.len() as u32;
    if count < arg.arity.min {
        tree.errors.push(ParseError::new(
            ParseErrorKind::TooFewArguments {
                name: display_name.to_string(),
                min: arg.arity.min,
                actual: count,
            },
            Some(attach),
        ));
        return;
    }
    if count > arg.arity.max {
        tree.errors.push(ParseError::new(
            ParseErrorKind::TooManyArguments {
                name: display_name.to_string(),
                max: arg.arity.max,
                actual: count,
            },
            Some(attach),
        ));
        return;
    }

    let conversion = convert(arg, &tokens);
    if let Conversion::Failed(message) = &conversion {
        tree.errors.push(ParseError::new(
            ParseErrorKind::ConversionFailed {
                name: display_name.to_string(),
                message: message.clone(),
            },
            Some(attach),
        ));
    }
    if let Some(node) = tree.get_mut(arg_id) {
        node.set_conversion(conversion);
    }
}

fn convert(arg: &ArgumentDecl, tokens: &[Token]) -> Conversion {
    if let Some(custom) = &arg.convert {
        return match custom(tokens) {
            Ok(value) => Conversion::Success(value),
            Err(message) => Conversion::Failed(message),
        };
    }
    if tokens.is_empty() {
        return Conversion::NoArgument;
    }
    if arg.arity.max <= 1 {
        return match Value::parse_as(arg.value_kind, &tokens[0].value) {
            Ok(value) => Conversion::Success(value),
            Err(message) => Conversion::Failed(message),
        };
    }
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        match Value::parse_as(arg.value_kind, &token.value) {
            Ok(value) => items.push(value),
            Err(message) => return Conversion::Failed(message),
        }
    }
    Conversion::Success(Value::List(items))
}

/// Declaration order, first non-empty message wins.
fn run_validators(
    validators: &[ValidatorFn],
    tree: &mut ResultTree,
    tokens_of: SymbolId,
    attach: SymbolId,
) {
    if validators.is_empty() {
        return;
    }
    let tokens: Vec<Token> = tree
        .get(tokens_of)
        .map(|n| n.tokens.clone())
        .unwrap_or_default();
    for validator in validators {
        if let Some(message) = validator(&tokens) {
            tree.errors.push(ParseError::new(
                ParseErrorKind::ValidationFailed(message),
                Some(attach),
            ));
            break;
        }
    }
}
