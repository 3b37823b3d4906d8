//! # Token Counter

use crate::types::{CKHashMap, CKHashSet};

/// Corpus frequency table over caption tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    /// The token counts.
    pub token_counts: CKHashMap<String, usize>,
}

impl TokenCounter {
    /// Create a new, empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the token counts and return them.
    pub fn release(self) -> CKHashMap<String, usize> {
        self.token_counts
    }

    /// Number of distinct tokens seen.
    pub fn len(&self) -> usize {
        self.token_counts.len()
    }

    /// Have no tokens been seen?
    pub fn is_empty(&self) -> bool {
        self.token_counts.is_empty()
    }

    /// The count for a token; `0` if never seen.
    pub fn count(
        &self,
        token: &str,
    ) -> usize {
        self.token_counts.get(token).copied().unwrap_or_default()
    }

    /// Update counts inplace from one token sequence.
    pub fn update_from_sequence<S: AsRef<str>>(
        &mut self,
        sequence: &[S],
    ) {
        for token in sequence {
            let token = token.as_ref();
            match self.token_counts.get_mut(token) {
                Some(c) => *c += 1,
                None => {
                    self.token_counts.insert(token.to_string(), 1);
                }
            }
        }
    }

    /// Tokens whose count is strictly below `min_occurrences`.
    pub fn below_threshold(
        &self,
        min_occurrences: usize,
    ) -> CKHashSet<&str> {
        self.token_counts
            .iter()
            .filter(|&(_, &c)| c < min_occurrences)
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_counter() {
        let mut counter = TokenCounter::new();
        assert!(counter.is_empty());

        counter.update_from_sequence(&["SOS", "a", "dog", "EOS"]);
        counter.update_from_sequence(&["SOS", "a", "cat", "EOS"]);

        assert_eq!(counter.len(), 5);
        assert_eq!(counter.count("a"), 2);
        assert_eq!(counter.count("dog"), 1);
        assert_eq!(counter.count("bird"), 0);

        let mut below: Vec<&str> = counter.below_threshold(2).into_iter().collect();
        below.sort();
        assert_eq!(below, vec!["cat", "dog"]);

        assert!(counter.below_threshold(1).is_empty());

        let counts = counter.release();
        assert_eq!(counts.get("SOS"), Some(&2));
    }
}
