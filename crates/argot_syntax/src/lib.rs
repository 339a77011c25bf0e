//! argot_syntax: shared token and diagnostic definitions.
//!
//! Leaf crate of the workspace: token kinds, location provenance chains,
//! parse errors with a message formatter, command-line string splitting,
//! and the edit-distance helpers used for typo suggestions.
mod error;
mod loc;
mod str_util;
mod token;
mod util;

pub use error::{ParseError, ParseErrorFormatter, ParseErrorKind, render_error, render_errors};
pub use loc::{Location, SourceKind};
pub use str_util::{split_command_line, unquote};
pub use token::{SymbolId, Token, TokenKind};
pub use util::{common_prefix_len, levenshtein_distance};
