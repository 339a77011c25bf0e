//! Tokenizer implementation.
//!
//! Scans the argument vector into classified tokens in a single forward
//! pass over a work queue (response-file expansion pushes elements back onto
//! the queue front). Per-element precedence: operand passthrough after `--`,
//! the `--` marker itself, directives, `@file` expansion, known-alias
//! resolution, POSIX bundling, inline `=`/`:` splitting, then plain
//! argument.
//!
//! Malformed input never aborts tokenization; the only errors produced here
//! are unreadable response files, and those abandon just that reference.
use std::collections::{HashMap, VecDeque};

use argot_model::{Grammar, ResponseFileMode, SymbolDecl};
use argot_syntax::{
    Location, ParseError, ParseErrorKind, SymbolId, Token, TokenKind, split_command_line, unquote,
};

use crate::response::expand_response_file;

/// Tokenization result.
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
    /// The original command line when tokenization was string-based.
    pub raw_line: Option<String>,
}

/// Tokenize an argument vector against a grammar.
pub fn tokenize(args: &[String], grammar: &Grammar) -> LexResult {
    let queue = args
        .iter()
        .enumerate()
        .map(|(i, a)| (a.clone(), Location::user(i as u32)))
        .collect();
    Tokenizer::new(grammar, queue).run(None)
}

/// Split a command-line string (quote-aware) and tokenize it.
pub fn tokenize_line(line: &str, grammar: &Grammar) -> LexResult {
    let queue = split_command_line(line)
        .into_iter()
        .map(|(a, offset)| (a, Location::user(offset)))
        .collect();
    Tokenizer::new(grammar, queue).run(Some(line.to_string()))
}

/// Split a `[name]` / `[name:value]` element into name and optional value.
///
/// The second character of the element must not be `]` or `:`; anything
/// failing that shape is not a directive.
pub fn split_directive(element: &str) -> Option<(&str, Option<&str>)> {
    let inner = element.strip_prefix('[')?.strip_suffix(']')?;
    let first = inner.chars().next()?;
    if first == ']' || first == ':' {
        return None;
    }
    match inner.split_once(':') {
        Some((name, value)) => Some((name, Some(value))),
        None => Some((inner, None)),
    }
}

/// Single-pass tokenizer over a queue of pending elements.
pub struct Tokenizer<'g> {
    grammar: &'g Grammar,
    queue: VecDeque<(String, Location)>,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
    /// Aliases visible from the active command scope.
    known: HashMap<String, SymbolId>,
    /// The previous token was an option whose argument still accepts values.
    pending_value: bool,
    directives_allowed: bool,
    after_double_dash: bool,
}

impl<'g> Tokenizer<'g> {
    pub fn new(grammar: &'g Grammar, queue: VecDeque<(String, Location)>) -> Self {
        Self {
            grammar,
            queue,
            tokens: Vec::new(),
            errors: Vec::new(),
            known: HashMap::new(),
            pending_value: false,
            directives_allowed: true,
            after_double_dash: false,
        }
    }

    pub fn run(mut self, raw_line: Option<String>) -> LexResult {
        self.tokens.reserve(self.queue.len() + 1);
        self.emit_root();
        self.enter_command(self.grammar.root());
        while let Some((element, loc)) = self.queue.pop_front() {
            self.next_element(element, loc);
        }
        LexResult {
            tokens: self.tokens,
            errors: self.errors,
            raw_line,
        }
    }

    /// Rule 1: consume the program invocation if it names the root command,
    /// otherwise synthesize an implicit root token. Either way the stream
    /// starts with a root command token.
    fn emit_root(&mut self) {
        let root = self.grammar.root();
        let root_name = self.grammar.command(root).name.clone();
        let is_invocation = self
            .queue
            .front()
            .is_some_and(|(first, _)| program_matches(first, &root_name));
        if is_invocation {
            if let Some((value, loc)) = self.queue.pop_front() {
                self.push_symbol(value, TokenKind::Command, loc, root);
                return;
            }
        }
        self.tokens
            .push(Token::implicit(root_name, TokenKind::Command, Location::internal()).with_symbol(root));
    }

    fn next_element(&mut self, element: String, loc: Location) {
        if self.after_double_dash {
            self.push(element, TokenKind::Operand, loc);
            return;
        }
        if element == "--" {
            self.push(element, TokenKind::EndOfArguments, loc);
            self.after_double_dash = true;
            self.directives_allowed = false;
            return;
        }
        if self.directives_allowed {
            let directive = if self.grammar.config().directives {
                split_directive(&element).map(|(name, _)| self.grammar.find_directive(name))
            } else {
                None
            };
            if let Some(symbol) = directive {
                let pos = self.tokens.len() as u32;
                let mut token = Token::new(element, TokenKind::Directive, pos, loc);
                token.symbol = symbol;
                self.tokens.push(token);
                return;
            }
            // Recognition stops permanently at the first non-directive.
            self.directives_allowed = false;
        }
        if self.grammar.config().response_files != ResponseFileMode::Disabled && element.len() > 1 {
            if let Some(path) = element.strip_prefix('@') {
                self.expand(path, &loc);
                return;
            }
        }
        if let Some(&symbol) = self.known.get(element.as_str()) {
            match self.grammar.decl(symbol) {
                SymbolDecl::Command(_) => {
                    self.push_symbol(element, TokenKind::Command, loc, symbol);
                    self.enter_command(symbol);
                    self.pending_value = false;
                }
                SymbolDecl::Option(opt) => {
                    let awaiting = self.grammar.argument(opt.argument).arity.max > 0;
                    self.push_symbol(element, TokenKind::Option, loc, symbol);
                    self.pending_value = awaiting;
                }
                // Arguments and directives never land in the known map.
                _ => self.push(element, TokenKind::Argument, loc),
            }
            return;
        }
        if self.grammar.config().bundling && !self.pending_value && self.try_bundle(&element, &loc)
        {
            return;
        }
        if self.try_inline_split(&element, &loc) {
            return;
        }
        self.push(element, TokenKind::Argument, loc);
        self.pending_value = false;
    }

    /// Rule 5: `-xyz` where every character is a known single-character
    /// option alias. A value-accepting option captures the remaining
    /// characters (one leading `:`/`=` stripped) and ends the bundle; any
    /// unresolved character abandons the whole attempt.
    fn try_bundle(&mut self, element: &str, loc: &Location) -> bool {
        let Some(body) = element.strip_prefix('-') else {
            return false;
        };
        if body.len() < 2 || body.starts_with('-') {
            return false;
        }
        let chars: Vec<char> = body.chars().collect();
        let mut resolved: Vec<(String, SymbolId)> = Vec::new();
        let mut value: Option<String> = None;
        let mut awaiting = false;
        for (i, c) in chars.iter().enumerate() {
            let alias = format!("-{c}");
            let Some(&symbol) = self.known.get(alias.as_str()) else {
                return false;
            };
            let SymbolDecl::Option(opt) = self.grammar.decl(symbol) else {
                return false;
            };
            resolved.push((alias, symbol));
            if self.grammar.argument(opt.argument).arity.max > 0 {
                let mut rest: String = chars[i + 1..].iter().collect();
                if rest.is_empty() {
                    awaiting = true;
                } else {
                    if let Some(stripped) = rest.strip_prefix([':', '=']) {
                        rest = stripped.to_string();
                    }
                    value = Some(unquote(&rest).to_string());
                }
                break;
            }
        }
        for (alias, symbol) in resolved {
            self.push_symbol(alias, TokenKind::Option, loc.clone(), symbol);
        }
        if let Some(v) = value {
            self.push(v, TokenKind::Argument, loc.clone());
            self.pending_value = false;
        } else {
            self.pending_value = awaiting;
        }
        true
    }

    /// Rule 6: `--name=value` / `--name:value` for any known option alias.
    fn try_inline_split(&mut self, element: &str, loc: &Location) -> bool {
        let Some(idx) = element.find([':', '=']) else {
            return false;
        };
        let (left, right) = (&element[..idx], &element[idx + 1..]);
        let Some(&symbol) = self.known.get(left) else {
            return false;
        };
        if !matches!(self.grammar.decl(symbol), SymbolDecl::Option(_)) {
            return false;
        }
        self.push_symbol(left.to_string(), TokenKind::Option, loc.clone(), symbol);
        self.push(unquote(right).to_string(), TokenKind::Argument, loc.clone());
        self.pending_value = false;
        true
    }

    fn expand(&mut self, path: &str, reference: &Location) {
        match expand_response_file(path, self.grammar.config().response_files, reference) {
            Ok(elements) => {
                for e in elements.into_iter().rev() {
                    self.queue.push_front(e);
                }
            }
            Err(reason) => self.errors.push(ParseError::new(
                ParseErrorKind::ResponseFileError {
                    path: path.to_string(),
                    reason,
                },
                None,
            )),
        }
    }

    /// Rebuild the known-alias map when a subcommand is entered: its own
    /// aliases, its immediate children's aliases, and recursive options of
    /// its ancestors.
    fn enter_command(&mut self, command: SymbolId) {
        self.known.clear();
        let decl = self.grammar.command(command);
        for alias in decl.all_aliases() {
            self.known.insert(alias.to_string(), command);
        }
        for &sub in decl.subcommands.iter() {
            for alias in self.grammar.command(sub).all_aliases() {
                self.known.insert(alias.to_string(), sub);
            }
        }
        for opt in self.grammar.options_in_scope(command) {
            for alias in self.grammar.option(opt).all_aliases() {
                self.known.insert(alias.to_string(), opt);
            }
        }
    }

    fn push(&mut self, value: String, kind: TokenKind, loc: Location) {
        let pos = self.tokens.len() as u32;
        self.tokens.push(Token::new(value, kind, pos, loc));
    }

    fn push_symbol(&mut self, value: String, kind: TokenKind, loc: Location, symbol: SymbolId) {
        let pos = self.tokens.len() as u32;
        self.tokens
            .push(Token::new(value, kind, pos, loc).with_symbol(symbol));
    }
}

/// Does the first argv element name the root command as a program path?
/// `tool`, `path/to/tool`, `tool.exe` and `tool.dll` all match a root
/// command named `tool`.
fn program_matches(element: &str, root_name: &str) -> bool {
    let file = std::path::Path::new(element)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(element);
    let stem = file
        .strip_suffix(".exe")
        .or_else(|| file.strip_suffix(".dll"))
        .unwrap_or(file);
    stem == root_name
}
