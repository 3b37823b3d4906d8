//! # Caption Vocabulary
//!
//! A [`CaptionVocab`] is a bijection between caption tokens and indices,
//! built by a [`CaptionVocabBuilder`] from word frequencies over the training
//! captions.
//!
//! Reserved tokens are sorted together with discovered tokens; their indices
//! must always be looked up (see [`CaptionVocab::reserved_index`]), never
//! assumed to be `0..4`.

mod caption_vocab;
mod reserved;
mod token_counter;
mod vocab_builder;

pub use caption_vocab::CaptionVocab;
pub use reserved::{EOS_TOKEN, PAD_TOKEN, RESERVED_TOKENS, ReservedToken, SOS_TOKEN, UNK_TOKEN};
pub use token_counter::TokenCounter;
pub use vocab_builder::{CaptionVocabBuilder, CaptionVocabBuilderOptions, VocabBuild, VocabStats};
