//! argot_lexer: the tokenizer.
//!
//! Converts a raw argument vector (or a single command-line string) into a
//! flat, classified token stream: root-command normalization, `--`
//! end-of-arguments, `[name]` directives, `@file` response-file expansion,
//! POSIX short-option bundling, inline `=`/`:` value splitting, and alias
//! resolution against the active command scope.
//!
//! Entry points: `tokenize(&args, &grammar)` and `tokenize_line(line, &grammar)`.
mod lexer;
mod literals;
mod response;

pub use lexer::{LexResult, Tokenizer, split_directive, tokenize, tokenize_line};
pub use literals::parse_bool_literal;
