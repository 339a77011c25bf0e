//! Edit distance for typo suggestions.

/// Edit distance over raw characters: insertion, deletion and substitution
/// cost 1, as does swapping two adjacent characters (so `hlep` is one edit
/// from `help`). Rolling three-row dynamic programming, no case folding.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let width = b_chars.len() + 1;
    let mut prev2: Vec<usize> = vec![0; width];
    let mut prev: Vec<usize> = (0..width).collect();
    let mut curr: Vec<usize> = vec![0; width];

    for (i, ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            let mut d = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            if i > 0
                && j > 0
                && *ac == b_chars[j - 1]
                && a_chars[i - 1] == *bc
            {
                d = d.min(prev2[j - 1] + 1);
            }
            curr[j + 1] = d;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

/// Length of the longest common prefix, in characters.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("helpp", "help"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn adjacent_swap_is_one_edit() {
        assert_eq!(levenshtein_distance("hlep", "help"), 1);
        assert_eq!(levenshtein_distance("ehlp", "help"), 1);
    }

    #[test]
    fn prefix_len() {
        assert_eq!(common_prefix_len("--verbose", "--version"), 6);
        assert_eq!(common_prefix_len("a", "b"), 0);
    }
}
