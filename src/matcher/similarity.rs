//! Text similarity between an AI guess and element text

use std::collections::HashSet;

use crate::lexicon::normalize_text;

/// Similarity in `[0, 1]`.
///
/// 1.0 for equal normalized text, 0.8 when one contains the other, otherwise
/// the share of common words relative to the longer side.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_text(a);
    let b = normalize_text(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return 0.8;
    }

    let words_a: HashSet<&str> = a.split(' ').collect();
    let words_b: HashSet<&str> = b.split(' ').collect();
    let common = words_a.intersection(&words_b).count();
    if common == 0 {
        return 0.0;
    }
    common as f64 / words_a.len().max(words_b.len()) as f64
}

/// Best similarity of `text` against the primary guess and every alternative
pub fn best_similarity(text: &str, primary: &str, alternatives: &[String]) -> f64 {
    std::iter::once(primary)
        .chain(alternatives.iter().map(String::as_str))
        .map(|guess| similarity(text, guess))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_after_normalization() {
        assert_eq!(similarity("Buy Now", "buy now"), 1.0);
        assert_eq!(similarity("  Buy\n Now ", "BUY NOW"), 1.0);
    }

    #[test]
    fn test_containment() {
        assert_eq!(similarity("Get Started Today", "Get Started"), 0.8);
        assert_eq!(similarity("Get Started", "Get Started Today"), 0.8);
    }

    #[test]
    fn test_word_overlap() {
        // common {start, trial} over max(3, 4)
        assert_eq!(similarity("start free trial", "start your 14-day trial"), 0.5);
        assert_eq!(similarity("Shop", "Learn More"), 0.0);
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("Buy", "   "), 0.0);
    }

    #[test]
    fn test_best_similarity_uses_alternatives() {
        let alts = vec!["Sign up".to_string(), "Create account".to_string()];
        assert_eq!(best_similarity("Create Account", "Join now", &alts), 1.0);
        assert_eq!(best_similarity("Contact", "Join now", &[]), 0.0);
    }
}
