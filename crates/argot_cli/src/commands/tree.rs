use argot_model::Grammar;
use argot_parser::{ResultKind, parse};

use crate::args::CliArgs;
use crate::commands::emit_errors;

pub(crate) fn run(cli: &CliArgs, grammar: &Grammar) -> i32 {
    let result = parse(&cli.input, grammar);
    for node in result.results() {
        let name = grammar.name(node.symbol);
        let values: Vec<&str> = node.tokens.iter().map(|t| t.value.as_str()).collect();
        match &node.kind {
            ResultKind::Command => println!("command {name} [{}]", values.join(" ")),
            ResultKind::Option => println!("option {name} [{}]", values.join(" ")),
            ResultKind::Argument { .. } => {
                let rendered = node
                    .value()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let marker = if node.default_used() { " (default)" } else { "" };
                println!("argument {name} [{}] = {rendered}{marker}", values.join(" "));
            }
            ResultKind::Directive => println!("directive {name} [{}]", values.join(" ")),
        }
    }
    for t in result.unparsed_tokens() {
        println!("operand {}", t.value);
    }
    emit_errors(result.errors(), cli.json_out);
    if result.has_errors() { 1 } else { 0 }
}
