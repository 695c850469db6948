//! ASCII folding for free-text fields.
//!
//! The production system rejects most non-ASCII input. Text is decomposed,
//! combining marks are dropped and a few letters that do not decompose are
//! mapped by hand. Characters outside that table pass through unchanged.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

fn substitute(c: char) -> Option<char> {
    match c {
        'ø' => Some('o'),
        'å' => Some('a'),
        'Ø' => Some('O'),
        'Å' => Some('A'),
        '/' => Some(' '),
        '.' => None,
        other => Some(other),
    }
}

pub fn sanitize_text(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .filter_map(substitute)
        .collect()
}

/// First `max_chars` characters of `input`.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_example() {
        assert_eq!(sanitize_text("Øster/gård."), "Oster gard");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(sanitize_text("Café Müller"), "Cafe Muller");
        assert_eq!(sanitize_text("Ærøskøbing"), "Æroskobing");
        assert_eq!(sanitize_text("Łódź"), "Łodz");
    }

    #[test]
    fn test_passes_plain_ascii() {
        assert_eq!(sanitize_text("Main Street 12"), "Main Street 12");
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn test_compatibility_forms_are_folded() {
        assert_eq!(sanitize_text("ﬁle"), "file");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("2024-05-02T10:00:00", 10), "2024-05-02");
        assert_eq!(truncate_chars("Åbc", 2), "Åb");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
