//! Symbol declarations and the grammar arena.
//!
//! Declarations form a tagged union stored in a flat arena indexed by
//! `SymbolId`; parent and child links are ids, never references, so the
//! arena is freely shareable across parses.
use std::fmt;
use std::sync::Arc;

use argot_syntax::{SymbolId, Token};

use crate::{Arity, GrammarConfig, Value, ValueKind};

/// Runs against a result's tokens; the first `Some` message wins.
pub type ValidatorFn = Arc<dyn Fn(&[Token]) -> Option<String> + Send + Sync>;
/// Custom conversion from a result's tokens to a typed value.
pub type ConvertFn = Arc<dyn Fn(&[Token]) -> Result<Value, String> + Send + Sync>;
/// Lazy default-value factory, invoked at most once per parse.
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

pub enum SymbolDecl {
    Command(CommandDecl),
    Option(OptionDecl),
    Argument(ArgumentDecl),
    Directive(DirectiveDecl),
}

pub struct CommandDecl {
    pub name: String,
    /// Extra aliases beyond `name`.
    pub aliases: Box<[String]>,
    pub parent: Option<SymbolId>,
    pub subcommands: Box<[SymbolId]>,
    pub options: Box<[SymbolId]>,
    /// Positional arguments, in declaration order.
    pub arguments: Box<[SymbolId]>,
    pub treat_unmatched_as_errors: bool,
    pub require_subcommand: bool,
    pub validators: Vec<ValidatorFn>,
}

impl CommandDecl {
    pub fn all_aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|s| s.as_str()))
    }
}

pub struct OptionDecl {
    /// Primary alias, used in diagnostics.
    pub name: String,
    pub aliases: Box<[String]>,
    /// The backing argument symbol.
    pub argument: SymbolId,
    pub parent: Option<SymbolId>,
    /// Visible to all descendant commands, not just the declaring one.
    pub recursive: bool,
    /// When false, one option token consumes at most one value token
    /// regardless of the backing argument's arity.
    pub allow_multiple_args_per_token: bool,
    pub required: bool,
    pub validators: Vec<ValidatorFn>,
}

impl OptionDecl {
    pub fn all_aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|s| s.as_str()))
    }
}

pub struct ArgumentDecl {
    pub name: String,
    /// Owning command, or owning option for an option's backing argument.
    pub parent: Option<SymbolId>,
    pub value_kind: ValueKind,
    pub arity: Arity,
    pub default: Option<DefaultFn>,
    pub convert: Option<ConvertFn>,
    pub validators: Vec<ValidatorFn>,
}

pub struct DirectiveDecl {
    pub name: String,
    pub parent: Option<SymbolId>,
}

/// The complete symbol model for one program: a read-only arena of
/// declarations plus the tokenizer/parser configuration.
pub struct Grammar {
    symbols: Vec<SymbolDecl>,
    root: SymbolId,
    config: GrammarConfig,
}

impl Grammar {
    pub(crate) fn from_parts(symbols: Vec<SymbolDecl>, root: SymbolId, config: GrammarConfig) -> Self {
        Self {
            symbols,
            root,
            config,
        }
    }

    pub fn root(&self) -> SymbolId {
        self.root
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn decl(&self, id: SymbolId) -> &SymbolDecl {
        &self.symbols[id.0 as usize]
    }

    pub fn command(&self, id: SymbolId) -> &CommandDecl {
        match self.decl(id) {
            SymbolDecl::Command(c) => c,
            _ => panic!("symbol {id:?} is not a command"),
        }
    }

    pub fn option(&self, id: SymbolId) -> &OptionDecl {
        match self.decl(id) {
            SymbolDecl::Option(o) => o,
            _ => panic!("symbol {id:?} is not an option"),
        }
    }

    pub fn argument(&self, id: SymbolId) -> &ArgumentDecl {
        match self.decl(id) {
            SymbolDecl::Argument(a) => a,
            _ => panic!("symbol {id:?} is not an argument"),
        }
    }

    pub fn directive(&self, id: SymbolId) -> &DirectiveDecl {
        match self.decl(id) {
            SymbolDecl::Directive(d) => d,
            _ => panic!("symbol {id:?} is not a directive"),
        }
    }

    /// Display name of any symbol.
    pub fn name(&self, id: SymbolId) -> &str {
        match self.decl(id) {
            SymbolDecl::Command(c) => &c.name,
            SymbolDecl::Option(o) => &o.name,
            SymbolDecl::Argument(a) => &a.name,
            SymbolDecl::Directive(d) => &d.name,
        }
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        match self.decl(id) {
            SymbolDecl::Command(c) => c.parent,
            SymbolDecl::Option(o) => o.parent,
            SymbolDecl::Argument(a) => a.parent,
            SymbolDecl::Directive(d) => d.parent,
        }
    }

    /// Directive symbols declared on the root.
    pub fn directives(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().enumerate().filter_map(|(i, s)| {
            matches!(s, SymbolDecl::Directive(_)).then_some(SymbolId(i as u32))
        })
    }

    pub fn find_directive(&self, name: &str) -> Option<SymbolId> {
        self.directives()
            .find(|id| self.directive(*id).name == name)
    }

    /// Options visible from `command`: its own plus every ancestor's
    /// recursive options.
    pub fn options_in_scope(&self, command: SymbolId) -> Vec<SymbolId> {
        let mut out: Vec<SymbolId> = self.command(command).options.to_vec();
        let mut cursor = self.command(command).parent;
        while let Some(ancestor) = cursor {
            let decl = self.command(ancestor);
            out.extend(
                decl.options
                    .iter()
                    .copied()
                    .filter(|o| self.option(*o).recursive),
            );
            cursor = decl.parent;
        }
        out
    }

    /// Command path from the root down to `command`, inclusive.
    pub fn path_to(&self, command: SymbolId) -> Vec<SymbolId> {
        let mut path = vec![command];
        let mut cursor = self.command(command).parent;
        while let Some(ancestor) = cursor {
            path.push(ancestor);
            cursor = self.command(ancestor).parent;
        }
        path.reverse();
        path
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("root", &self.root)
            .field("symbols", &self.symbols.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SymbolDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolDecl::Command(c) => write!(f, "Command({})", c.name),
            SymbolDecl::Option(o) => write!(f, "Option({})", o.name),
            SymbolDecl::Argument(a) => write!(f, "Argument({})", a.name),
            SymbolDecl::Directive(d) => write!(f, "Directive({})", d.name),
        }
    }
}
