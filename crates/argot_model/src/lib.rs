//! argot_model: the symbol model.
//!
//! The static declaration tree a grammar is parsed against: commands,
//! options, positional arguments and directives, with aliases, arities,
//! default-value factories, conversion functions and validators. Built once
//! by the embedding application via the builders, then read-only; a grammar
//! may be shared across any number of concurrent parses.
mod arity;
mod builder;
mod config;
mod symbol;
mod value;

pub use arity::Arity;
pub use builder::{ArgumentBuilder, CommandBuilder, OptionBuilder};
pub use config::{GrammarConfig, ResponseFileMode};
pub use symbol::{
    ArgumentDecl, CommandDecl, ConvertFn, DefaultFn, DirectiveDecl, Grammar, OptionDecl,
    SymbolDecl, ValidatorFn,
};
pub use value::{Value, ValueKind};
