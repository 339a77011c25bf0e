//! The grammar walker.
//!
//! A single forward pass over the token stream. Command tokens descend into
//! subcommand scope (the only recursion), option tokens consume following
//! value tokens under arity rules, bare argument tokens fill the declared
//! positional arguments greedily in declaration order, and everything else
//! lands in the unmatched list. After each command level finishes, trailing
//! tokens are reassigned across the remaining declared positional arguments
//! (innermost command first).
use argot_lexer::{parse_bool_literal, split_directive};
use argot_model::{Grammar, ValueKind};
use argot_syntax::{ParseError, ParseErrorKind, SymbolId, Token, TokenKind};

use crate::result::ParseAction;
use crate::tree::{ResultKind, ResultTree};

pub(crate) fn walk(grammar: &Grammar, tokens: Vec<Token>) -> (ResultTree, ParseAction, Vec<Token>) {
    Walker {
        grammar,
        tokens,
        i: 0,
        tree: ResultTree::new(grammar),
        action: ParseAction::None,
    }
    .run()
}

struct Walker<'g> {
    grammar: &'g Grammar,
    tokens: Vec<Token>,
    i: usize,
    tree: ResultTree,
    action: ParseAction,
}

impl<'g> Walker<'g> {
    fn run(mut self) -> (ResultTree, ParseAction, Vec<Token>) {
        let root = self.grammar.root();
        if let Some(root_token) = self.tokens.first().cloned() {
            self.tree
                .get_or_insert(root, None, ResultKind::Command)
                .tokens
                .push(root_token);
        }
        self.i = 1;
        // Directives are always the leading run of tokens.
        while self.i < self.tokens.len() && self.tokens[self.i].kind == TokenKind::Directive {
            self.directive();
        }
        self.parse_command(root);
        self.record_unmatched();
        (self.tree, self.action, self.tokens)
    }

    fn parse_command(&mut self, command: SymbolId) {
        self.tree.innermost = command;
        let mut positional = 0usize;
        while self.i < self.tokens.len() {
            let kind = self.tokens[self.i].kind;
            let symbol = self.tokens[self.i].symbol;
            match kind {
                TokenKind::Command => match symbol {
                    Some(sub) if sub != command => {
                        let token = self.take_token();
                        self.tree
                            .get_or_insert(sub, Some(command), ResultKind::Command)
                            .tokens
                            .push(token);
                        self.parse_command(sub);
                        break;
                    }
                    Some(same) => {
                        // The command's own alias repeated; record, stay put.
                        let token = self.take_token();
                        self.tree
                            .get_or_insert(same, None, ResultKind::Command)
                            .tokens
                            .push(token);
                    }
                    None => self.unmatched_token(),
                },
                TokenKind::Option => match symbol {
                    Some(option) => self.parse_option(option, command),
                    None => self.unmatched_token(),
                },
                TokenKind::Argument => self.parse_positional(command, &mut positional),
                TokenKind::EndOfArguments => {
                    self.i += 1;
                }
                TokenKind::Operand => {
                    let token = self.take_token();
                    self.tree.unparsed.push(token);
                }
                // Late directive tokens cannot be produced by the lexer.
                TokenKind::Directive => {
                    self.i += 1;
                }
            }
        }
        self.reassign_positionals(command);
    }

    /// Record a directive and select the post-parse action it implies.
    fn directive(&mut self) {
        let token = self.take_token();
        let Some((name, value)) = split_directive(&token.value) else {
            return;
        };
        self.tree.add_directive(name, value.map(str::to_string));
        if let Some(symbol) = token.symbol {
            self.tree
                .get_or_insert(symbol, Some(self.grammar.root()), ResultKind::Directive)
                .tokens
                .push(token.clone());
        }
        if self.action != ParseAction::None {
            return;
        }
        let config = self.grammar.config();
        self.action = match name {
            "parse" if config.parse_directive => ParseAction::Diagram,
            "suggest" if config.suggest_directive => ParseAction::Suggest,
            "env" if config.env_directive => ParseAction::Env,
            _ => ParseAction::None,
        };
    }

    fn parse_option(&mut self, option: SymbolId, command: SymbolId) {
        let token = self.take_token();
        self.tree
            .get_or_insert(option, Some(command), ResultKind::Option)
            .tokens
            .push(token);

        let decl = self.grammar.option(option);
        let arg_id = decl.argument;
        let arg = self.grammar.argument(arg_id);
        // Each mention consumes on its own; repeated mentions may overfill
        // the backing argument, and the arity check reports the excess.
        let cap = if decl.allow_multiple_args_per_token {
            arg.arity.max
        } else {
            arg.arity.max.min(1)
        };

        let mut taken = 0u32;
        while taken < cap
            && self.i < self.tokens.len()
            && self.tokens[self.i].kind == TokenKind::Argument
        {
            // A boolean option only eats a token that is a boolean literal;
            // otherwise it behaves as a bare flag.
            if arg.value_kind == ValueKind::Bool
                && parse_bool_literal(&self.tokens[self.i].value).is_none()
            {
                break;
            }
            self.tokens[self.i].symbol = Some(arg_id);
            let token = self.take_token();
            self.tree
                .get_or_insert_argument(arg_id, Some(option))
                .tokens
                .push(token);
            taken += 1;
        }
    }

    /// Greedy assignment to the command's declared positional arguments.
    fn parse_positional(&mut self, command: SymbolId, positional: &mut usize) {
        loop {
            let arguments = &self.grammar.command(command).arguments;
            let Some(&arg_id) = arguments.get(*positional) else {
                self.unmatched_token();
                return;
            };
            let arity = self.grammar.argument(arg_id).arity;
            if self.argument_count(arg_id) >= arity.max {
                *positional += 1;
                continue;
            }
            self.tokens[self.i].symbol = Some(arg_id);
            let token = self.take_token();
            self.tree
                .get_or_insert_argument(arg_id, Some(command))
                .tokens
                .push(token);
            return;
        }
    }

    /// Positional assignment is greedy per argument, so a leading unbounded
    /// argument can starve the ones declared after it. Split the donor's
    /// trailing excess off as one block and hand it out front-to-back across
    /// the later declared arguments, up to each one's arity maximum; token
    /// stream order is preserved and the donor never drops below its
    /// arity minimum.
    fn reassign_positionals(&mut self, command: SymbolId) {
        let arguments = self.grammar.command(command).arguments.clone();
        if arguments.len() < 2 {
            return;
        }
        let Some(donor_idx) = arguments
            .iter()
            .rposition(|a| self.argument_count(*a) > 0)
        else {
            return;
        };
        let donor_id = arguments[donor_idx];
        let donor_min = self.grammar.argument(donor_id).arity.min;
        let excess = self.argument_count(donor_id).saturating_sub(donor_min) as usize;

        let mut capacity = 0usize;
        for &next_id in &arguments[donor_idx + 1..] {
            capacity = capacity.saturating_add(self.grammar.argument(next_id).arity.max as usize);
            if capacity >= excess {
                break;
            }
        }
        let take = excess.min(capacity);
        if take == 0 {
            return;
        }
        let Some(donor) = self.tree.get_mut(donor_id) else {
            return;
        };
        let split_at = donor.tokens.len() - take;
        let mut moved = donor.tokens.split_off(split_at);
        for &next_id in &arguments[donor_idx + 1..] {
            if moved.is_empty() {
                break;
            }
            let count = moved.len().min(self.grammar.argument(next_id).arity.max as usize);
            if count == 0 {
                continue;
            }
            let rest = moved.split_off(count);
            let node = self.tree.get_or_insert_argument(next_id, Some(command));
            for mut token in moved {
                token.symbol = Some(next_id);
                if let Some(p) = token.position {
                    self.tokens[p as usize].symbol = Some(next_id);
                }
                node.tokens.push(token);
            }
            moved = rest;
        }
    }

    fn record_unmatched(&mut self) {
        if self.tree.unmatched.is_empty() {
            return;
        }
        let owner = if self.grammar.config().unmatched_to_root {
            self.grammar.root()
        } else {
            self.tree.innermost
        };
        if !self.grammar.command(owner).treat_unmatched_as_errors {
            return;
        }
        let values: Vec<String> = self.tree.unmatched.iter().map(|t| t.value.clone()).collect();
        for value in values {
            self.tree.errors.push(ParseError::new(
                ParseErrorKind::UnrecognizedToken(value),
                Some(owner),
            ));
        }
    }

    fn argument_count(&self, argument: SymbolId) -> u32 {
        self.tree
            .get(argument)
            .map(|n| n.tokens.len() as u32)
            .unwrap_or(0)
    }

    fn take_token(&mut self) -> Token {
        let token = self.tokens[self.i].clone();
        self.i += 1;
        token
    }

    fn unmatched_token(&mut self) {
        let token = self.take_token();
        self.tree.unmatched.push(token);
    }
}
