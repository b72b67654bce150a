//! Token estimation from text length.
//!
//! Uses the ~4 characters per token heuristic. This is an estimate for
//! display and quota purposes, not an exact tokenizer.

/// Estimate the number of tokens in `text` using the ~4 chars/token heuristic.
///
/// Returns the ceiling of the UTF-8 byte length divided by 4; empty input
/// estimates to 0.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.len() as u64).div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn short_strings_round_up() {
        // "hi" = 2 chars -> 1 token
        assert_eq!(estimate_tokens("hi"), 1);
        // "there" = 5 chars -> 2 tokens
        assert_eq!(estimate_tokens("there"), 2);
        // 10 chars -> 3 tokens
        assert_eq!(estimate_tokens("aaaaaaaaaa"), 3);
    }

    #[test]
    fn exact_multiple_of_four() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
    }

    #[test]
    fn longer_text() {
        let text = "a".repeat(100);
        assert_eq!(estimate_tokens(&text), 25);
    }
}
