use argot_model::Grammar;
use argot_parser::{diagram, parse};

use crate::args::CliArgs;
use crate::commands::emit_errors;

pub(crate) fn run(cli: &CliArgs, grammar: &Grammar) -> i32 {
    let result = parse(&cli.input, grammar);
    println!("{}", diagram(&result));
    emit_errors(result.errors(), cli.json_out);
    if result.has_errors() { 1 } else { 0 }
}
