//! The built-in demonstration grammar the binary parses input against.
use argot_model::{
    ArgumentBuilder, Arity, CommandBuilder, Grammar, OptionBuilder, Value, ValueKind,
};

pub(crate) fn demo_grammar() -> Grammar {
    Grammar::new(
        CommandBuilder::new("demo")
            .option(OptionBuilder::flag("--verbose").alias("-v").recursive())
            .subcommand(
                CommandBuilder::new("build")
                    .option(
                        OptionBuilder::new("--config")
                            .alias("-c")
                            .default_value(|| Value::Str("Debug".into())),
                    )
                    .option(OptionBuilder::flag("--release").alias("-r"))
                    .argument(ArgumentBuilder::new("files").arity(Arity::zero_or_more())),
            )
            .subcommand(
                CommandBuilder::new("serve")
                    .option(
                        OptionBuilder::new("--port")
                            .value_kind(ValueKind::Int)
                            .default_value(|| Value::Int(8080)),
                    )
                    .option(OptionBuilder::new("--host").required()),
            )
            .subcommand(CommandBuilder::new("help")),
    )
}
