//! End-to-end walk scenarios over a small build-tool grammar.
use argot_model::{ArgumentBuilder, Arity, CommandBuilder, Grammar, OptionBuilder, Value};
use argot_parser::{ParseAction, parse, parse_line};
use argot_syntax::ParseErrorKind;

fn demo() -> Grammar {
    Grammar::new(
        CommandBuilder::new("tool")
            .option(OptionBuilder::flag("--verbose").alias("-v").recursive())
            .subcommand(
                CommandBuilder::new("build")
                    .option(OptionBuilder::new("--config").alias("-c"))
                    .argument(ArgumentBuilder::new("files").arity(Arity::zero_or_more())),
            )
            .subcommand(CommandBuilder::new("help")),
    )
}

#[test]
fn full_invocation() {
    let g = demo();
    let root = g.root();
    let build = g.command(root).subcommands[0];
    let verbose = g.command(root).options[0];
    let config = g.command(build).options[0];
    let files = g.command(build).arguments[0];

    let r = parse_line("tool build --config Release -v src/a.rs src/b.rs", &g);
    assert!(!r.has_errors(), "{:?}", r.errors());
    assert_eq!(r.command(), build);
    assert_eq!(r.command_path(), vec![root, build]);
    assert_eq!(r.string(config), Some("Release"));
    assert!(r.flag(verbose));
    assert!(!r.default_used(verbose));
    assert_eq!(r.strings(files), ["src/a.rs", "src/b.rs"]);
}

#[test]
fn argument_vector_entry_point() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let args: Vec<String> = ["tool", "build", "-c", "Debug"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let r = parse(&args, &g);
    assert!(!r.has_errors());
    assert_eq!(r.command(), build);
    assert!(r.raw_line().is_none());
}

#[test]
fn multi_arity_yields_a_list_even_for_one_token() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let files = g.command(build).arguments[0];
    let r = parse_line("tool build a.rs", &g);
    assert!(matches!(r.value_of(files), Some(Value::List(items)) if items.len() == 1));
    assert_eq!(r.strings(files), ["a.rs"]);
}

#[test]
fn option_without_its_value() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let config = g.command(build).options[0];
    let r = parse_line("tool build --config", &g);
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::TooFewArguments {
            name: "--config".to_string(),
            min: 1,
            actual: 0
        }
    );
    assert!(r.conversion(config).is_none());
}

#[test]
fn unknown_token_is_reported_on_the_root() {
    let g = demo();
    let r = parse_line("tool bogus", &g);
    assert_eq!(r.unmatched_tokens().len(), 1);
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::UnrecognizedToken("bogus".to_string())
    );
    assert_eq!(r.errors()[0].symbol, Some(g.root()));
}

#[test]
fn double_dash_passes_operands_through() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let config = g.command(build).options[0];
    let r = parse_line("tool build -- --config x", &g);
    assert!(!r.has_errors());
    let operands: Vec<&str> = r.unparsed_tokens().iter().map(|t| t.value.as_str()).collect();
    assert_eq!(operands, ["--config", "x"]);
    assert!(r.find(config).is_none());
}

#[test]
fn boolean_option_eats_only_boolean_literals() {
    let g = demo();
    let verbose = g.command(g.root()).options[0];
    let r = parse_line("tool -v false", &g);
    assert!(!r.has_errors());
    assert!(!r.flag(verbose));
    assert_eq!(r.value_of(verbose), Some(&Value::Bool(false)));

    let build = g.command(g.root()).subcommands[0];
    let files = g.command(build).arguments[0];
    let r = parse_line("tool build -v x.rs", &g);
    assert!(r.flag(verbose));
    assert_eq!(r.strings(files), ["x.rs"]);
}

#[test]
fn repeated_command_alias_accumulates_tokens() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let r = parse_line("tool build build", &g);
    assert!(!r.has_errors());
    assert_eq!(r.find(build).map(|n| n.tokens.len()), Some(2));
}

#[test]
fn parse_directive_selects_the_diagram_action() {
    let g = demo();
    let r = parse_line("tool [parse] build", &g);
    assert_eq!(r.action(), ParseAction::Diagram);
    assert_eq!(r.directive("parse").map(<[String]>::len), Some(0));
    let parse_sym = g.find_directive("parse").unwrap();
    assert!(r.find(parse_sym).is_some());
}

#[test]
fn response_file_feeds_the_walk() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let config = g.command(build).options[0];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("args.rsp");
    std::fs::write(&path, "build\n--config\nRelease\n").unwrap();

    let r = parse_line(&format!("tool @{}", path.display()), &g);
    assert!(!r.has_errors(), "{:?}", r.errors());
    assert_eq!(r.command(), build);
    assert_eq!(r.string(config), Some("Release"));
}

#[test]
fn unreadable_response_file_is_reported_first() {
    let g = demo();
    let r = parse_line("tool @/definitely/missing.rsp bogus", &g);
    assert!(r.errors()[0].is_tokenization());
    assert!(matches!(
        r.errors().last().unwrap().kind,
        ParseErrorKind::UnrecognizedToken(_)
    ));
}

#[test]
fn late_directive_is_a_plain_argument() {
    let g = demo();
    let build = g.command(g.root()).subcommands[0];
    let files = g.command(build).arguments[0];
    let r = parse_line("tool build [parse]", &g);
    assert_eq!(r.action(), ParseAction::None);
    assert_eq!(r.strings(files), ["[parse]"]);
}
