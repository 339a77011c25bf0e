use std::fs;
use std::path::Path;

use argot_lexer::tokenize;
use argot_model::{
    ArgumentBuilder, Arity, CommandBuilder, Grammar, GrammarConfig, OptionBuilder,
    ResponseFileMode,
};
use argot_syntax::{SourceKind, TokenKind};

fn grammar_with(mode: ResponseFileMode) -> Grammar {
    Grammar::with_config(
        CommandBuilder::new("tool").subcommand(
            CommandBuilder::new("build")
                .option(OptionBuilder::new("--config"))
                .argument(ArgumentBuilder::new("files").arity(Arity::zero_or_more())),
        ),
        GrammarConfig {
            response_files: mode,
            ..GrammarConfig::default()
        },
    )
}

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn line_separated_expansion_matches_direct_input() {
    let dir = tempfile::tempdir().unwrap();
    let rsp = write(
        dir.path(),
        "build.rsp",
        "# settings\nbuild\n\n--config\nRelease\n",
    );

    let g = grammar_with(ResponseFileMode::LineSeparated);
    let expanded = tokenize(&args(&[&format!("@{rsp}")]), &g);
    let direct = tokenize(&args(&["build", "--config", "Release"]), &g);

    assert!(expanded.errors.is_empty());
    let shape = |lex: &argot_lexer::LexResult| {
        lex.tokens
            .iter()
            .map(|t| (t.value.clone(), t.kind, t.symbol))
            .collect::<Vec<_>>()
    };
    // Identical streams; only Location.source differs.
    assert_eq!(shape(&expanded), shape(&direct));
    assert!(matches!(
        expanded.tokens[1].location.source,
        SourceKind::Response(_)
    ));
    assert_eq!(
        expanded.tokens[1].location.root().source,
        SourceKind::User
    );
}

#[test]
fn space_separated_mode_splits_each_line() {
    let dir = tempfile::tempdir().unwrap();
    let rsp = write(
        dir.path(),
        "build.rsp",
        "build --config \"Release Mode\"\nsrc/a.cs src/b.cs\n",
    );

    let g = grammar_with(ResponseFileMode::SpaceSeparated);
    let lex = tokenize(&args(&[&format!("@{rsp}")]), &g);
    let values: Vec<&str> = lex.tokens[1..].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        ["build", "--config", "Release Mode", "src/a.cs", "src/b.cs"]
    );
}

#[test]
fn nested_references_expand_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let inner = write(dir.path(), "inner.rsp", "--config\nRelease\n");
    let outer = write(dir.path(), "outer.rsp", &format!("build\n@{inner}\ntail\n"));

    let g = grammar_with(ResponseFileMode::LineSeparated);
    let lex = tokenize(&args(&[&format!("@{outer}")]), &g);
    assert!(lex.errors.is_empty());
    let values: Vec<&str> = lex.tokens[1..].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, ["build", "--config", "Release", "tail"]);

    // The nested token's provenance chains through both files to the user.
    let config = &lex.tokens[2];
    assert!(matches!(config.location.source, SourceKind::Response(_)));
    let outer_loc = config.location.outer.as_deref().unwrap();
    assert!(matches!(outer_loc.source, SourceKind::Response(_)));
    assert_eq!(config.location.root().source, SourceKind::User);
}

#[test]
fn missing_file_is_an_error_but_not_fatal() {
    let g = grammar_with(ResponseFileMode::LineSeparated);
    let lex = tokenize(&args(&["build", "@/no/such/file.rsp", "tail"]), &g);
    assert_eq!(lex.errors.len(), 1);
    assert!(lex.errors[0].is_tokenization());
    assert!(lex.errors[0].message.contains("/no/such/file.rsp"));
    let values: Vec<&str> = lex.tokens[1..].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, ["build", "tail"]);
}

#[test]
fn self_reference_stops_at_the_nesting_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loop.rsp");
    fs::write(&path, format!("@{}\n", path.to_string_lossy())).unwrap();

    let g = grammar_with(ResponseFileMode::LineSeparated);
    let lex = tokenize(&args(&[&format!("@{}", path.to_string_lossy())]), &g);
    assert_eq!(lex.errors.len(), 1);
    assert!(lex.errors[0].message.contains("nesting"));
}

#[test]
fn disabled_mode_treats_at_sign_literally() {
    let g = grammar_with(ResponseFileMode::Disabled);
    let lex = tokenize(&args(&["build", "@file.rsp"]), &g);
    assert_eq!(lex.tokens[2].kind, TokenKind::Argument);
    assert_eq!(lex.tokens[2].value, "@file.rsp");
}
