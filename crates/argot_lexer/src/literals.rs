//! Static literal tables.
use phf::phf_map;

static BOOL_LITERALS: phf::Map<&'static str, bool> = phf_map! {
    "true" => true,
    "false" => false,
};

/// Parse a boolean literal the way the grammar walker's flag rule does:
/// `true`/`false`, case-insensitive, nothing else.
pub fn parse_bool_literal(s: &str) -> Option<bool> {
    if s.chars().any(|c| c.is_ascii_uppercase()) {
        BOOL_LITERALS.get(s.to_ascii_lowercase().as_str()).copied()
    } else {
        BOOL_LITERALS.get(s).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_literals() {
        assert_eq!(parse_bool_literal("true"), Some(true));
        assert_eq!(parse_bool_literal("FALSE"), Some(false));
        assert_eq!(parse_bool_literal("1"), None);
        assert_eq!(parse_bool_literal("yes"), None);
    }
}
