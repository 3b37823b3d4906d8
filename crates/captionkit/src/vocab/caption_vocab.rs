//! # Caption Vocabulary Map

use crate::{
    types::CKHashMap,
    vocab::reserved::{RESERVED_TOKENS, ReservedToken},
};

/// A bijective token <-> index mapping.
///
/// Indices are assigned `0..len()` in lexicographic (byte) order of the
/// token strings, reserved tokens included.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionVocab {
    word2idx: CKHashMap<String, usize>,
    idx2word: Vec<String>,
}

impl CaptionVocab {
    /// Build a vocab from discovered tokens.
    ///
    /// The reserved tokens are always added; duplicates are dropped.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut idx2word: Vec<String> = RESERVED_TOKENS.iter().map(|t| t.to_string()).collect();
        idx2word.extend(tokens.into_iter().map(Into::into));
        idx2word.sort();
        idx2word.dedup();

        let word2idx = idx2word
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();

        Self { word2idx, idx2word }
    }

    /// The number of tokens in the vocab.
    pub fn len(&self) -> usize {
        self.idx2word.len()
    }

    /// Is the vocab empty? (Never true; reserved tokens are always present.)
    pub fn is_empty(&self) -> bool {
        self.idx2word.is_empty()
    }

    /// Look up a token's index.
    ///
    /// Unknown tokens are not mapped to `UNK`; see [`Self::index_or_unk`].
    pub fn token_index(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.word2idx.get(token).copied()
    }

    /// Look up a token's index, routing unknown tokens to `UNK`.
    pub fn index_or_unk(
        &self,
        token: &str,
    ) -> usize {
        self.token_index(token)
            .unwrap_or_else(|| self.reserved_index(ReservedToken::Unk))
    }

    /// Look up the token at an index.
    pub fn token_str(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.idx2word.get(index).map(String::as_str)
    }

    /// The index of a reserved token.
    pub fn reserved_index(
        &self,
        token: ReservedToken,
    ) -> usize {
        // Every constructor inserts the reserved tokens.
        self.word2idx[token.as_str()]
    }

    /// The tokens, in index order.
    pub fn tokens(&self) -> &[String] {
        &self.idx2word
    }

    /// Iterate `(index, token)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.idx2word
            .iter()
            .enumerate()
            .map(|(idx, word)| (idx, word.as_str()))
    }

    /// Encode a token sequence, routing unknown tokens to `UNK`.
    pub fn encode_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<usize> {
        tokens
            .iter()
            .map(|t| self.index_or_unk(t.as_ref()))
            .collect()
    }

    /// Decode indices to tokens; out-of-range indices yield `None`.
    pub fn decode_indices(
        &self,
        indices: &[usize],
    ) -> Option<Vec<&str>> {
        indices.iter().map(|&idx| self.token_str(idx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_sorted_with_reserved() {
        let vocab = CaptionVocab::from_tokens(["dog", "a", "3d", "dog"]);
        assert_eq!(
            vocab.tokens(),
            &["3d", "EOS", "PAD", "SOS", "UNK", "a", "dog"]
        );
        assert_eq!(vocab.len(), 7);
        assert!(!vocab.is_empty());

        assert_eq!(vocab.reserved_index(ReservedToken::Pad), 2);
        assert_eq!(vocab.reserved_index(ReservedToken::Sos), 3);
        assert_eq!(vocab.reserved_index(ReservedToken::Eos), 1);
        assert_eq!(vocab.reserved_index(ReservedToken::Unk), 4);
    }

    #[test]
    fn test_bijection() {
        let vocab = CaptionVocab::from_tokens(["man", "riding", "horse"]);
        for (idx, token) in vocab.iter() {
            assert_eq!(vocab.token_index(token), Some(idx));
            assert_eq!(vocab.token_str(idx), Some(token));
        }
        assert_eq!(vocab.token_str(vocab.len()), None);
    }

    #[test]
    fn test_reserved_only() {
        let vocab = CaptionVocab::from_tokens(Vec::<String>::new());
        assert_eq!(vocab.len(), 4);
        for r in ReservedToken::iter() {
            assert_eq!(vocab.token_str(vocab.reserved_index(r)), Some(r.as_str()));
        }
    }

    #[test]
    fn test_unknown_lookup() {
        let vocab = CaptionVocab::from_tokens(["a", "dog"]);
        assert_eq!(vocab.token_index("zebra"), None);

        let unk = vocab.reserved_index(ReservedToken::Unk);
        assert_eq!(vocab.index_or_unk("zebra"), unk);

        let encoded = vocab.encode_tokens(&["SOS", "a", "zebra", "EOS"]);
        assert_eq!(
            vocab.decode_indices(&encoded),
            Some(vec!["SOS", "a", "UNK", "EOS"])
        );
        assert_eq!(vocab.decode_indices(&[99]), None);
    }
}
