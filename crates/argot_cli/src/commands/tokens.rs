use std::io::Write;

use argot_lexer::tokenize;
use argot_model::Grammar;
use argot_syntax::SourceKind;

use crate::args::CliArgs;
use crate::commands::emit_errors;

pub(crate) fn run(cli: &CliArgs, grammar: &Grammar) -> i32 {
    let lex = tokenize(&cli.input, grammar);
    let mut out = std::io::stdout().lock();
    for t in &lex.tokens {
        let symbol = t.symbol.map(|s| grammar.name(s)).unwrap_or("-");
        if let Err(e) = writeln!(
            out,
            "{:?}\t{}\t{}\t{}",
            t.kind,
            t.value,
            symbol,
            source_label(&t.location.source)
        ) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return 0;
            }
            eprintln!("stdout error: {e}");
            return 2;
        }
    }
    emit_errors(&lex.errors, cli.json_out);
    if lex.errors.is_empty() { 0 } else { 1 }
}

fn source_label(source: &SourceKind) -> String {
    match source {
        SourceKind::User => "user".to_string(),
        SourceKind::Internal => "internal".to_string(),
        SourceKind::Implicit => "implicit".to_string(),
        SourceKind::Response(path) => format!("@{path}"),
    }
}
