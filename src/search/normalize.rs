//! Text normalization and edit-distance similarity.
//!
//! Every lexical comparison in the ranking pipeline goes through [`normalize`]
//! first, so "iPhone-16!" and "iphone16" compare the way a shopper expects.

/// Lowercase, trim, and drop every character that is neither a word character
/// (alphanumeric or `_`) nor whitespace.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Levenshtein edit distance with unit costs, counted over chars rather
/// than bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    rapidfuzz::distance::levenshtein::distance(a.chars(), b.chars())
}

/// Similarity ratio in [0, 1] derived from the edit distance of the
/// normalized strings. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    let max_len = a.chars().count().max(b.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Exact substring containment after normalizing both sides.
pub fn text_matches(text: &str, query: &str) -> bool {
    normalize(text).contains(&normalize(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("  iPhone 16 Pro!  ", "iphone 16 pro")]
    #[case("Galaxy S24+ (256GB)", "galaxy s24 256gb")]
    #[case("snake_case stays", "snake_case stays")]
    #[case("", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        check!(normalize(input) == expected);
    }

    #[rstest]
    #[case("", "", 0)]
    #[case("abc", "", 3)]
    #[case("", "abc", 3)]
    #[case("kitten", "sitting", 3)]
    #[case("iphone", "ifone", 2)]
    #[case("flaw", "lawn", 2)]
    #[case("same", "same", 0)]
    #[case("café", "cafe", 1)]
    fn test_levenshtein(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        check!(levenshtein(a, b) == expected);
        check!(levenshtein(b, a) == expected);
    }

    #[test]
    fn test_similarity_of_empty_strings_is_one() {
        check!(similarity("", "") == 1.0);
        check!(similarity("!!!", "  ") == 1.0);
    }

    #[test]
    fn test_similarity_single_edit() {
        // "iphone" -> "iphne": one deletion over max length 6
        let score = similarity("iPhone", "iphne");
        check!((score - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_phonetic_misspelling() {
        // "iphone" -> "ifone": substitute p->f, delete h
        let score = similarity("iPhone", "ifone");
        check!((score - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_case_and_punctuation_insensitive() {
        check!(similarity("iPhone-16", "iphone16") == 1.0);
    }

    #[rstest]
    #[case("Apple iPhone 16 Pro", "iphone 16", true)]
    // hyphen removed, "iphone16" is not a substring
    #[case("Apple iPhone 16 Pro", "IPHONE-16", false)]
    #[case("Apple iPhone 16 Pro", "", true)]
    #[case("Galaxy S24", "pixel", false)]
    fn test_text_matches(#[case] text: &str, #[case] query: &str, #[case] expected: bool) {
        check!(text_matches(text, query) == expected);
    }
}
