mod args;
mod commands;
mod demo;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    let cli = match args::parse_args() {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let grammar = demo::demo_grammar();
    let code = match cli.cmd.as_str() {
        "tokens" => commands::tokens::run(&cli, &grammar),
        "tree" => commands::tree::run(&cli, &grammar),
        "diagram" => commands::diagram::run(&cli, &grammar),
        "suggest" => commands::suggest::run(&cli, &grammar),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("{}", args::usage());
            std::process::exit(2);
        }
    };
    std::process::exit(code);
}
