use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

use argot_lexer::tokenize;
use argot_model::{
    ArgumentBuilder, Arity, CommandBuilder, Grammar, GrammarConfig, OptionBuilder,
    ResponseFileMode,
};
use argot_syntax::TokenKind;

fn grammar() -> Grammar {
    // Response files disabled: random `@` elements must not touch the disk.
    Grammar::with_config(
        CommandBuilder::new("tool")
            .option(OptionBuilder::flag("-a"))
            .option(OptionBuilder::flag("-b"))
            .option(OptionBuilder::new("--config").alias("-c"))
            .subcommand(
                CommandBuilder::new("build")
                    .argument(ArgumentBuilder::new("files").arity(Arity::zero_or_more())),
            ),
        GrammarConfig {
            response_files: ResponseFileMode::Disabled,
            ..GrammarConfig::default()
        },
    )
}

fn any_argv() -> impl Strategy<Value = Vec<String>> {
    let element = prop_oneof![
        "[-a-zA-Z0-9=:@\\[\\]\"]{0,12}",
        Just("--".to_string()),
        Just("-abc".to_string()),
        Just("[parse]".to_string()),
        Just("build".to_string()),
        Just("--config=x y".to_string()),
    ];
    proptest::collection::vec(element, 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, max_shrink_iters: 200, .. ProptestConfig::default()
    })]
    #[ignore]
    #[test]
    fn tokenize_random_input_should_not_panic(argv in any_argv()) {
        let g = grammar();
        let lex = tokenize(&argv, &g);
        // The stream always starts with the root command token.
        prop_assert_eq!(lex.tokens[0].kind, TokenKind::Command);
        prop_assert!(lex.tokens[0].symbol.is_some());
        // With response files disabled nothing can fail, only classify.
        prop_assert!(lex.errors.is_empty());
    }
}
