use argot_syntax::ParseError;
use serde_json::json;

pub(crate) mod diagram;
pub(crate) mod suggest;
pub(crate) mod tokens;
pub(crate) mod tree;

pub(crate) fn emit_errors(errors: &[ParseError], json_out: bool) {
    for e in errors {
        if json_out {
            let obj = json!({
                "severity": "error",
                "message": e.message,
                "suggestion": e.suggestion,
            });
            println!("{obj}");
        } else {
            eprintln!("{}", argot_syntax::render_error(e));
        }
    }
}
