//! Command-line string utilities.

/// Split a full command line into arguments.
///
/// Whitespace separates arguments; `"` toggles quote mode, inside which
/// whitespace is literal. Quote characters themselves are stripped from the
/// produced arguments. Returns each argument with the byte offset of its
/// first character in `line`.
pub fn split_command_line(line: &str) -> Vec<(String, u32)> {
    let mut args: Vec<(String, u32)> = Vec::new();
    let mut current = String::new();
    let mut start: Option<u32> = None;
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
            if start.is_none() {
                start = Some(i as u32);
            }
            continue;
        }
        if c.is_whitespace() && !in_quotes {
            if let Some(s) = start.take() {
                args.push((std::mem::take(&mut current), s));
            }
            continue;
        }
        if start.is_none() {
            start = Some(i as u32);
        }
        current.push(c);
    }
    if let Some(s) = start {
        args.push((current, s));
    }
    args
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &s[1..bytes.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let args = split_command_line("build --config Release");
        let values: Vec<&str> = args.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, ["build", "--config", "Release"]);
        assert_eq!(args[1].1, 6);
    }

    #[test]
    fn quotes_protect_whitespace_and_are_stripped() {
        let args = split_command_line(r#"add "two words" tail"#);
        let values: Vec<&str> = args.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, ["add", "two words", "tail"]);
    }

    #[test]
    fn embedded_quotes_join_pieces() {
        let args = split_command_line(r#"--name="a b""#);
        assert_eq!(args[0].0, "--name=a b");
    }

    #[test]
    fn unquote_strips_one_pair() {
        assert_eq!(unquote(r#""x y""#), "x y");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#"""#), r#"""#);
    }
}
