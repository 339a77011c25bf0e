//! Grammar builders.
//!
//! Fluent declaration of the command tree, flattened into the `Grammar`
//! arena. Malformed declarations (duplicate alias among a command's
//! immediate children, empty alias, min > max arity) are programmer errors
//! and panic at build time; parse-time input problems never do.
use std::collections::HashSet;
use std::sync::Arc;

use argot_syntax::{SymbolId, Token};

use crate::{
    ArgumentDecl, Arity, CommandDecl, ConvertFn, DefaultFn, DirectiveDecl, Grammar,
    GrammarConfig, OptionDecl, SymbolDecl, Value, ValidatorFn, ValueKind,
};

pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    subcommands: Vec<CommandBuilder>,
    options: Vec<OptionBuilder>,
    arguments: Vec<ArgumentBuilder>,
    directives: Vec<String>,
    treat_unmatched_as_errors: bool,
    require_subcommand: bool,
    validators: Vec<ValidatorFn>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "command name must not be empty");
        Self {
            name,
            aliases: Vec::new(),
            subcommands: Vec::new(),
            options: Vec::new(),
            arguments: Vec::new(),
            directives: Vec::new(),
            treat_unmatched_as_errors: true,
            require_subcommand: false,
            validators: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        assert!(!alias.is_empty(), "alias must not be empty");
        self.aliases.push(alias);
        self
    }

    pub fn subcommand(mut self, command: CommandBuilder) -> Self {
        self.subcommands.push(command);
        self
    }

    pub fn option(mut self, option: OptionBuilder) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: ArgumentBuilder) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Declare an extra directive name (only meaningful on the root).
    pub fn directive(mut self, name: impl Into<String>) -> Self {
        self.directives.push(name.into());
        self
    }

    pub fn treat_unmatched_as_errors(mut self, yes: bool) -> Self {
        self.treat_unmatched_as_errors = yes;
        self
    }

    pub fn require_subcommand(mut self) -> Self {
        self.require_subcommand = true;
        self
    }

    pub fn validator(
        mut self,
        f: impl Fn(&[Token]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(f));
        self
    }
}

pub struct OptionBuilder {
    name: String,
    aliases: Vec<String>,
    value_kind: ValueKind,
    arity: Arity,
    default: Option<DefaultFn>,
    convert: Option<ConvertFn>,
    recursive: bool,
    allow_multiple_args_per_token: bool,
    required: bool,
    validators: Vec<ValidatorFn>,
}

impl OptionBuilder {
    /// An option taking exactly one string value.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "option must have at least one alias");
        Self {
            name,
            aliases: Vec::new(),
            value_kind: ValueKind::String,
            arity: Arity::exactly_one(),
            default: None,
            convert: None,
            recursive: false,
            allow_multiple_args_per_token: false,
            required: false,
            validators: Vec::new(),
        }
    }

    /// A boolean flag: zero-or-one value, true when present.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name)
            .value_kind(ValueKind::Bool)
            .arity(Arity::zero_or_one())
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        assert!(!alias.is_empty(), "alias must not be empty");
        self.aliases.push(alias);
        self
    }

    pub fn value_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn default_value(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(Arc::new(f));
        self
    }

    pub fn convert(
        mut self,
        f: impl Fn(&[Token]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        self.convert = Some(Arc::new(f));
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn multiple_args_per_token(mut self) -> Self {
        self.allow_multiple_args_per_token = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator(
        mut self,
        f: impl Fn(&[Token]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(f));
        self
    }
}

pub struct ArgumentBuilder {
    name: String,
    value_kind: ValueKind,
    arity: Arity,
    default: Option<DefaultFn>,
    convert: Option<ConvertFn>,
    validators: Vec<ValidatorFn>,
}

impl ArgumentBuilder {
    /// A positional argument taking exactly one string value.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "argument name must not be empty");
        Self {
            name,
            value_kind: ValueKind::String,
            arity: Arity::exactly_one(),
            default: None,
            convert: None,
            validators: Vec::new(),
        }
    }

    pub fn value_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn default_value(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(Arc::new(f));
        self
    }

    pub fn convert(
        mut self,
        f: impl Fn(&[Token]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        self.convert = Some(Arc::new(f));
        self
    }

    pub fn validator(
        mut self,
        f: impl Fn(&[Token]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(f));
        self
    }
}

impl Grammar {
    pub fn new(root: CommandBuilder) -> Self {
        Self::with_config(root, GrammarConfig::default())
    }

    pub fn with_config(root: CommandBuilder, config: GrammarConfig) -> Self {
        let mut arena: Vec<SymbolDecl> = Vec::new();
        let directive_names = directive_names(&root, &config);
        let root_id = lower_command(&mut arena, root, None);
        for name in directive_names {
            arena.push(SymbolDecl::Directive(DirectiveDecl {
                name,
                parent: Some(root_id),
            }));
        }
        Grammar::from_parts(arena, root_id, config)
    }
}

fn directive_names(root: &CommandBuilder, config: &GrammarConfig) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    if config.directives {
        if config.parse_directive {
            names.push("parse".to_string());
        }
        if config.suggest_directive {
            names.push("suggest".to_string());
        }
        if config.env_directive {
            names.push("env".to_string());
        }
    }
    for extra in &root.directives {
        if !names.iter().any(|n| n == extra) {
            names.push(extra.clone());
        }
    }
    names
}

fn lower_command(
    arena: &mut Vec<SymbolDecl>,
    builder: CommandBuilder,
    parent: Option<SymbolId>,
) -> SymbolId {
    check_child_aliases(&builder);

    let id = SymbolId(arena.len() as u32);
    arena.push(SymbolDecl::Command(CommandDecl {
        name: builder.name,
        aliases: builder.aliases.into_boxed_slice(),
        parent,
        subcommands: Box::new([]),
        options: Box::new([]),
        arguments: Box::new([]),
        treat_unmatched_as_errors: builder.treat_unmatched_as_errors,
        require_subcommand: builder.require_subcommand,
        validators: builder.validators,
    }));

    let arguments: Vec<SymbolId> = builder
        .arguments
        .into_iter()
        .map(|a| lower_argument(arena, a, Some(id)))
        .collect();
    let options: Vec<SymbolId> = builder
        .options
        .into_iter()
        .map(|o| lower_option(arena, o, id))
        .collect();
    let subcommands: Vec<SymbolId> = builder
        .subcommands
        .into_iter()
        .map(|c| lower_command(arena, c, Some(id)))
        .collect();

    let SymbolDecl::Command(decl) = &mut arena[id.0 as usize] else {
        unreachable!("command slot overwritten");
    };
    decl.arguments = arguments.into_boxed_slice();
    decl.options = options.into_boxed_slice();
    decl.subcommands = subcommands.into_boxed_slice();
    id
}

fn lower_option(arena: &mut Vec<SymbolDecl>, builder: OptionBuilder, parent: SymbolId) -> SymbolId {
    let id = SymbolId(arena.len() as u32);
    arena.push(SymbolDecl::Option(OptionDecl {
        name: builder.name.clone(),
        aliases: builder.aliases.into_boxed_slice(),
        argument: id, // patched below
        parent: Some(parent),
        recursive: builder.recursive,
        allow_multiple_args_per_token: builder.allow_multiple_args_per_token,
        required: builder.required,
        validators: builder.validators,
    }));

    let arg_id = SymbolId(arena.len() as u32);
    arena.push(SymbolDecl::Argument(ArgumentDecl {
        name: builder.name,
        parent: Some(id),
        value_kind: builder.value_kind,
        arity: builder.arity,
        default: builder.default,
        convert: builder.convert,
        validators: Vec::new(),
    }));

    let SymbolDecl::Option(decl) = &mut arena[id.0 as usize] else {
        unreachable!("option slot overwritten");
    };
    decl.argument = arg_id;
    id
}

fn lower_argument(
    arena: &mut Vec<SymbolDecl>,
    builder: ArgumentBuilder,
    parent: Option<SymbolId>,
) -> SymbolId {
    let id = SymbolId(arena.len() as u32);
    arena.push(SymbolDecl::Argument(ArgumentDecl {
        name: builder.name,
        parent,
        value_kind: builder.value_kind,
        arity: builder.arity,
        default: builder.default,
        convert: builder.convert,
        validators: builder.validators,
    }));
    id
}

/// Aliases must be unique among a command's immediate children.
fn check_child_aliases(builder: &CommandBuilder) {
    let mut names: Vec<&str> = Vec::new();
    for sub in &builder.subcommands {
        names.push(&sub.name);
        names.extend(sub.aliases.iter().map(|s| s.as_str()));
    }
    for opt in &builder.options {
        names.push(&opt.name);
        names.extend(opt.aliases.iter().map(|s| s.as_str()));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for alias in names {
        assert!(
            seen.insert(alias),
            "duplicate alias '{}' under command '{}'",
            alias,
            builder.name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Grammar {
        Grammar::new(
            CommandBuilder::new("tool")
                .option(OptionBuilder::flag("--verbose").alias("-v").recursive())
                .subcommand(
                    CommandBuilder::new("build")
                        .option(OptionBuilder::new("--config").alias("-c"))
                        .argument(ArgumentBuilder::new("files").arity(Arity::zero_or_more())),
                ),
        )
    }

    #[test]
    fn arena_links_are_consistent() {
        let g = demo();
        let root = g.root();
        let build = g.command(root).subcommands[0];
        assert_eq!(g.command(build).parent, Some(root));
        assert_eq!(g.path_to(build), vec![root, build]);

        let config = g.command(build).options[0];
        let backing = g.option(config).argument;
        assert_eq!(g.argument(backing).parent, Some(config));
    }

    #[test]
    fn recursive_options_are_in_scope_of_descendants() {
        let g = demo();
        let build = g.command(g.root()).subcommands[0];
        let scope = g.options_in_scope(build);
        let names: Vec<&str> = scope.iter().map(|o| g.option(*o).name.as_str()).collect();
        assert_eq!(names, ["--config", "--verbose"]);
    }

    #[test]
    fn built_in_directives_are_declared() {
        let g = demo();
        assert!(g.find_directive("parse").is_some());
        assert!(g.find_directive("suggest").is_some());
        assert!(g.find_directive("env").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate alias")]
    fn duplicate_alias_panics_at_build_time() {
        Grammar::new(
            CommandBuilder::new("tool")
                .option(OptionBuilder::flag("-v"))
                .option(OptionBuilder::new("-v")),
        );
    }
}
