use crate::Term;

/// Normalize a raw token into a comparable term: lowercase, with every
/// non-alphabetic character deleted. `"Dog!"` and `"dOg"` both normalize
/// to `"dog"`; a token with no letters normalizes to the empty string.
pub fn normalize(word: &str) -> Term {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Split a query on whitespace and normalize each token.
///
/// Tokens that normalize to the empty string are kept as empty terms, so
/// the returned sequence has one entry per whitespace-delimited token.
pub fn to_terms(query: &str) -> Vec<Term> {
    query.split_whitespace().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize("Dog!"), "dog");
        assert_eq!(normalize("DOG."), "dog");
        assert_eq!(normalize("cAt"), "cat");
    }

    #[test]
    fn deletes_embedded_non_letters() {
        // Embedded punctuation is removed, not turned into a boundary.
        assert_eq!(normalize("a.b1c"), "abc");
        assert_eq!(normalize("don't"), "dont");
    }

    #[test]
    fn all_non_letters_becomes_empty() {
        assert_eq!(normalize("123"), "");
        assert_eq!(normalize("!?"), "");
    }

    #[test]
    fn query_splits_and_keeps_empty_terms() {
        assert_eq!(to_terms("Dog! DOG."), vec!["dog", "dog"]);
        assert_eq!(to_terms("dog 42 cat"), vec!["dog", "", "cat"]);
        assert!(to_terms("   ").is_empty());
    }
}
