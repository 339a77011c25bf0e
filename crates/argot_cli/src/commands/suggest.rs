use argot_model::Grammar;
use argot_parser::{completions, parse};

use crate::args::CliArgs;

pub(crate) fn run(cli: &CliArgs, grammar: &Grammar) -> i32 {
    let result = parse(&cli.input, grammar);
    for completion in completions(&result) {
        println!("{completion}");
    }
    0
}
