//! Positional assignment, trailing-token reassignment and option arity.
use argot_model::{ArgumentBuilder, Arity, CommandBuilder, Grammar, OptionBuilder};
use argot_parser::parse_line;
use argot_syntax::ParseErrorKind;

fn copy_grammar() -> Grammar {
    Grammar::new(
        CommandBuilder::new("cp")
            .argument(ArgumentBuilder::new("sources").arity(Arity::one_or_more()))
            .argument(ArgumentBuilder::new("dest")),
    )
}

#[test]
fn trailing_token_moves_to_the_later_argument() {
    let g = copy_grammar();
    let sources = g.command(g.root()).arguments[0];
    let dest = g.command(g.root()).arguments[1];

    let r = parse_line("cp a b c", &g);
    assert!(!r.has_errors(), "{:?}", r.errors());
    assert_eq!(r.strings(sources), ["a", "b"]);
    assert_eq!(r.string(dest), Some("c"));
    // The master token stream reflects the reassignment too.
    let last = r.tokens().last().unwrap();
    assert_eq!(last.value, "c");
    assert_eq!(last.symbol, Some(dest));
}

#[test]
fn refill_across_two_arguments_keeps_stream_order() {
    let g = Grammar::new(
        CommandBuilder::new("cp")
            .argument(ArgumentBuilder::new("sources").arity(Arity::one_or_more()))
            .argument(ArgumentBuilder::new("mid"))
            .argument(ArgumentBuilder::new("dest")),
    );
    let sources = g.command(g.root()).arguments[0];
    let mid = g.command(g.root()).arguments[1];
    let dest = g.command(g.root()).arguments[2];

    let r = parse_line("cp w x y z", &g);
    assert!(!r.has_errors(), "{:?}", r.errors());
    // The earlier declared argument gets the earlier token.
    assert_eq!(r.strings(sources), ["w", "x"]);
    assert_eq!(r.string(mid), Some("y"));
    assert_eq!(r.string(dest), Some("z"));
}

#[test]
fn donor_never_drops_below_its_minimum() {
    let g = copy_grammar();
    let sources = g.command(g.root()).arguments[0];

    let r = parse_line("cp a", &g);
    assert_eq!(r.strings(sources), ["a"]);
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::RequiredMissing {
            name: "dest".to_string()
        }
    );
}

#[test]
fn bounded_positional_overflow_is_unmatched() {
    let g = Grammar::new(
        CommandBuilder::new("pair").argument(ArgumentBuilder::new("two").arity(Arity::new(2, 2))),
    );
    let two = g.command(g.root()).arguments[0];
    let r = parse_line("pair a b c", &g);
    assert_eq!(r.strings(two), ["a", "b"]);
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::UnrecognizedToken("c".to_string())
    );
}

#[test]
fn repeated_single_value_option_overflows_its_arity() {
    let g = Grammar::new(CommandBuilder::new("cfg").option(OptionBuilder::new("--config")));
    let config = g.command(g.root()).options[0];
    let r = parse_line("cfg --config a --config b", &g);
    assert_eq!(r.find(config).map(|n| n.tokens.len()), Some(2));
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::TooManyArguments {
            name: "--config".to_string(),
            max: 1,
            actual: 2,
        }
    );
    // An overfilled option never converts to a value.
    assert!(r.string(config).is_none());
}

#[test]
fn arity_bounds_reject_one_below_and_one_above() {
    let g = Grammar::new(
        CommandBuilder::new("pick").option(
            OptionBuilder::new("--pair")
                .arity(Arity::new(2, 2))
                .multiple_args_per_token(),
        ),
    );
    let pair = g.command(g.root()).options[0];

    let short = parse_line("pick --pair a", &g);
    assert_eq!(
        short.errors()[0].kind,
        ParseErrorKind::TooFewArguments {
            name: "--pair".to_string(),
            min: 2,
            actual: 1,
        }
    );

    let exact = parse_line("pick --pair a b", &g);
    assert!(!exact.has_errors(), "{:?}", exact.errors());
    assert_eq!(exact.strings(pair), ["a", "b"]);

    let over = parse_line("pick --pair a b --pair c", &g);
    assert_eq!(
        over.errors()[0].kind,
        ParseErrorKind::TooManyArguments {
            name: "--pair".to_string(),
            max: 2,
            actual: 3,
        }
    );
}

#[test]
fn multiple_args_per_token_takes_the_whole_run() {
    let g = Grammar::new(
        CommandBuilder::new("gen").option(
            OptionBuilder::new("--define")
                .arity(Arity::zero_or_more())
                .multiple_args_per_token(),
        ),
    );
    let define = g.command(g.root()).options[0];
    let r = parse_line("gen --define A B C", &g);
    assert!(!r.has_errors(), "{:?}", r.errors());
    assert_eq!(r.strings(define), ["A", "B", "C"]);
}

#[test]
fn one_value_per_mention_without_the_opt_in() {
    let g = Grammar::new(
        CommandBuilder::new("gen")
            .option(OptionBuilder::new("--tag").arity(Arity::zero_or_more())),
    );
    let tag = g.command(g.root()).options[0];
    let r = parse_line("gen --tag A B --tag C", &g);
    assert_eq!(r.strings(tag), ["A", "C"]);
    assert_eq!(
        r.errors()[0].kind,
        ParseErrorKind::UnrecognizedToken("B".to_string())
    );
}
