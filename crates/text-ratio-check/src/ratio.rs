use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Any run of Unicode whitespace, plus the ASCII separators U+001C..U+001F.
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").expect("Invalid whitespace regex"));

/// Remove every whitespace character from `text`.
pub fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

/// Number of non-whitespace characters in `text`.
pub fn non_whitespace_len(text: &str) -> usize {
    WHITESPACE.replace_all(text, "").chars().count()
}

/// Ratio of non-whitespace characters, candidate over reference.
///
/// Returns `0.0` when the reference has no non-whitespace characters.
pub fn evaluate_ratio(candidate: &str, reference: &str) -> f64 {
    let candidate_len = non_whitespace_len(candidate);
    let reference_len = non_whitespace_len(reference);

    if reference_len == 0 {
        debug!(candidate_len, "reference is empty after whitespace removal");
        return 0.0;
    }

    let ratio = candidate_len as f64 / reference_len as f64;
    debug!(candidate_len, reference_len, ratio, "whitespace ratio evaluated");
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_ignored_on_both_sides() {
        assert_eq!(evaluate_ratio("a b c", "abc"), 1.0);
        assert_eq!(evaluate_ratio("abc", "a\tb\nc"), 1.0);
    }

    #[test]
    fn half_length_candidate() {
        assert_eq!(evaluate_ratio("ab", "abcd"), 0.5);
    }

    #[test]
    fn empty_reference_yields_zero() {
        assert_eq!(evaluate_ratio("anything", ""), 0.0);
        assert_eq!(evaluate_ratio("", ""), 0.0);
        assert_eq!(evaluate_ratio("abc", " \t\r\n "), 0.0);
    }

    #[test]
    fn longer_candidate_exceeds_one() {
        assert_eq!(evaluate_ratio("abcdef", "abc"), 2.0);
    }

    #[test]
    fn empty_candidate_is_zero() {
        assert_eq!(evaluate_ratio("   ", "abc"), 0.0);
    }

    #[test]
    fn strips_unicode_whitespace() {
        // NBSP, ideographic space, form feed, vertical tab
        let text = "a\u{00A0}b\u{3000}c\u{000C}d\u{000B}e";
        assert_eq!(strip_whitespace(text), "abcde");
        assert_eq!(non_whitespace_len(text), 5);
    }

    #[test]
    fn strips_ascii_separators() {
        assert_eq!(strip_whitespace("a\u{1C}b\u{1D}c\u{1E}d\u{1F}e"), "abcde");
        assert_eq!(evaluate_ratio("a\u{1F}b", "ab"), 1.0);
        assert_eq!(evaluate_ratio("ab", "\u{1C}"), 0.0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(non_whitespace_len("日本 語"), 3);
        assert_eq!(evaluate_ratio("日本", "日本語だ"), 0.5);
    }

    #[test]
    fn strip_keeps_other_characters_in_order() {
        assert_eq!(strip_whitespace("  My CRM\tintegration\n"), "MyCRMintegration");
        assert_eq!(strip_whitespace(""), "");
    }
}
