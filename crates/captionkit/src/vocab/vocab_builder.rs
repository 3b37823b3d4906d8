//! # Caption Vocabulary Builder

use crate::{
    tokenize::{caption_sequence, is_numeric_token},
    vocab::{CaptionVocab, TokenCounter},
};

/// Options for [`CaptionVocabBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionVocabBuilderOptions {
    /// Tokens seen fewer times than this are excluded.
    pub min_occurrences: usize,
}

impl Default for CaptionVocabBuilderOptions {
    fn default() -> Self {
        Self { min_occurrences: 1 }
    }
}

impl CaptionVocabBuilderOptions {
    /// Set the minimum occurrence threshold.
    pub fn with_min_occurrences(
        self,
        min_occurrences: usize,
    ) -> Self {
        Self { min_occurrences }
    }

    /// Initialize a [`CaptionVocabBuilder`].
    pub fn init(self) -> CaptionVocabBuilder {
        CaptionVocabBuilder::new(self)
    }
}

/// Summary counts from a vocab build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabStats {
    /// Distinct tokens seen, including `SOS`/`EOS`.
    pub total_tokens: usize,

    /// Distinct tokens below the occurrence threshold.
    pub excluded_tokens: usize,
}

impl VocabStats {
    /// Distinct tokens at or above the threshold.
    pub fn remaining_tokens(&self) -> usize {
        self.total_tokens - self.excluded_tokens
    }
}

/// The products of [`CaptionVocabBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct VocabBuild {
    /// The vocabulary.
    pub vocab: CaptionVocab,

    /// Longest caption sequence seen, counting `SOS` and `EOS`.
    pub max_seq_len: usize,

    /// Summary counts.
    pub stats: VocabStats,
}

/// Accumulates caption token frequencies, then builds a [`CaptionVocab`].
#[derive(Debug, Clone)]
pub struct CaptionVocabBuilder {
    options: CaptionVocabBuilderOptions,
    counter: TokenCounter,
    max_seq_len: usize,
}

impl CaptionVocabBuilder {
    /// Create a new builder.
    pub fn new(options: CaptionVocabBuilderOptions) -> Self {
        Self {
            options,
            counter: TokenCounter::new(),
            max_seq_len: 0,
        }
    }

    /// The builder options.
    pub fn options(&self) -> &CaptionVocabBuilderOptions {
        &self.options
    }

    /// Tokenize a raw caption and record its tokens.
    pub fn observe_caption(
        &mut self,
        caption: &str,
    ) {
        let seq = caption_sequence(caption);
        self.max_seq_len = self.max_seq_len.max(seq.len());
        self.counter.update_from_sequence(&seq);
    }

    /// Record every caption in a sample iterator.
    pub fn observe_captions<I>(
        &mut self,
        captions: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for caption in captions {
            self.observe_caption(caption.as_ref());
        }
    }

    /// Filter the counted tokens and assign indices.
    pub fn build(self) -> VocabBuild {
        let min_occurrences = self.options.min_occurrences;
        let excluded = self.counter.below_threshold(min_occurrences);

        let stats = VocabStats {
            total_tokens: self.counter.len(),
            excluded_tokens: excluded.len(),
        };

        let vocab = CaptionVocab::from_tokens(
            self.counter
                .token_counts
                .keys()
                .map(String::as_str)
                .filter(|t| !excluded.contains(t) && !is_numeric_token(t)),
        );

        log::debug!(
            "vocab build: {} distinct, {} excluded, {} indexed",
            stats.total_tokens,
            stats.excluded_tokens,
            vocab.len()
        );

        VocabBuild {
            vocab,
            max_seq_len: self.max_seq_len,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::ReservedToken;

    fn build(
        captions: &[&str],
        min_occurrences: usize,
    ) -> VocabBuild {
        let mut builder = CaptionVocabBuilderOptions::default()
            .with_min_occurrences(min_occurrences)
            .init();
        builder.observe_captions(captions);
        builder.build()
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(CaptionVocabBuilderOptions::default().min_occurrences, 1);
    }

    #[test]
    fn test_punctuation_normalized() {
        let res = build(&["A Dog.", "a dog!"], 1);
        assert_eq!(
            res.vocab.tokens(),
            &["EOS", "PAD", "SOS", "UNK", "a", "dog"]
        );
        assert_eq!(res.max_seq_len, 4);
        assert_eq!(
            res.stats,
            VocabStats {
                total_tokens: 4,
                excluded_tokens: 0
            }
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let res = build(&["a dog", "a cat", "a cat"], 2);
        assert!(res.vocab.token_index("cat").is_some());
        assert!(res.vocab.token_index("a").is_some());
        assert_eq!(res.vocab.token_index("dog"), None);
        assert_eq!(res.stats.excluded_tokens, 1);
        assert_eq!(res.stats.remaining_tokens(), 4);
    }

    #[test]
    fn test_numeric_tokens_excluded() {
        let res = build(&["2 dogs", "2 dogs", "3pm"], 1);
        assert_eq!(res.vocab.token_index("2"), None);
        assert!(res.vocab.token_index("dogs").is_some());
        assert!(res.vocab.token_index("3pm").is_some());
    }

    #[test]
    fn test_only_decimal_digit_tokens_excluded() {
        let res = build(&["½ cup", "٣ cups", "chapter ⅻ"], 1);
        assert!(res.vocab.token_index("½").is_some());
        assert!(res.vocab.token_index("ⅻ").is_some());
        assert_eq!(res.vocab.token_index("٣"), None);
    }

    #[test]
    fn test_reserved_survive_high_threshold() {
        let res = build(&["a dog"], 10);
        assert_eq!(res.vocab.len(), 4);
        assert_eq!(res.vocab.token_index("a"), None);
        assert_eq!(
            res.vocab.token_str(res.vocab.reserved_index(ReservedToken::Sos)),
            Some("SOS")
        );
    }

    #[test]
    fn test_max_seq_len() {
        let res = build(&["a", "a man riding a horse", ""], 1);
        assert_eq!(res.max_seq_len, 7);
    }

    #[test]
    fn test_empty() {
        let res = build(&[], 1);
        assert_eq!(res.vocab.len(), 4);
        assert_eq!(res.max_seq_len, 0);
    }
}
