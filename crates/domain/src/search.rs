use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

const COMBINING_DIACRITICAL_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Lowercase, decompose (NFD), strip combining diacritical marks and trim.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_DIACRITICAL_MARKS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Substring containment over normalized forms. An empty or whitespace-only
/// term matches everything.
#[must_use]
pub fn matches_search_term(term: &str, text: &str) -> bool {
    let term = normalize(term);

    if term.is_empty() {
        return true;
    }

    normalize(text).contains(&term)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "")]
    #[case("  Bench Press  ", "bench press")]
    #[case("Développé couché", "developpe couche")]
    #[case("ÜBERZÜGE", "uberzuge")]
    #[case("Rueckenstrecker", "rueckenstrecker")]
    fn test_normalize(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(normalize(text), expected);
    }

    #[rstest]
    #[case("", "Développé couché", true)]
    #[case("   ", "Développé couché", true)]
    #[case("developpe", "Développé couché", true)]
    #[case("DÉVELOPPÉ", "developpe couche", true)]
    #[case("couche", "Développé couché", true)]
    #[case("press", "Développé couché", false)]
    #[case("bench", "", false)]
    fn test_matches_search_term(#[case] term: &str, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(matches_search_term(term, text), expected);
    }
}
