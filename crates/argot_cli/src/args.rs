pub(crate) struct CliArgs {
    pub cmd: String,
    pub json_out: bool,
    /// The input handed to the demo grammar, verbatim.
    pub input: Vec<String>,
}

pub(crate) fn usage() -> &'static str {
    "Usage: argot <tokens|tree|diagram|suggest> [--json] [--] <input...>"
}

pub(crate) fn parse_args() -> Result<CliArgs, String> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    let cmd = argv.first().cloned().ok_or_else(|| usage().to_string())?;
    argv.remove(0);

    let mut json_out = false;
    let mut input: Vec<String> = Vec::new();
    let mut rest = false;

    let mut i = 0;
    while i < argv.len() {
        let a = &argv[i];
        if rest {
            input.push(a.clone());
        } else if a == "--" {
            rest = true;
        } else if a == "--json" {
            json_out = true;
        } else {
            // First non-flag element: everything from here on is input.
            rest = true;
            input.push(a.clone());
        }
        i += 1;
    }

    Ok(CliArgs {
        cmd,
        json_out,
        input,
    })
}
