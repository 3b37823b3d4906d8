//! # Reserved Tokens

/// Padding token.
pub const PAD_TOKEN: &str = "PAD";
/// Start-of-sequence token.
pub const SOS_TOKEN: &str = "SOS";
/// End-of-sequence token.
pub const EOS_TOKEN: &str = "EOS";
/// Unknown-word token.
pub const UNK_TOKEN: &str = "UNK";

/// All reserved token strings.
pub const RESERVED_TOKENS: [&str; 4] = [PAD_TOKEN, SOS_TOKEN, EOS_TOKEN, UNK_TOKEN];

/// The reserved tokens present in every [`CaptionVocab`](super::CaptionVocab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ReservedToken {
    /// See [`PAD_TOKEN`].
    #[strum(to_string = "PAD")]
    Pad,

    /// See [`SOS_TOKEN`].
    #[strum(to_string = "SOS")]
    Sos,

    /// See [`EOS_TOKEN`].
    #[strum(to_string = "EOS")]
    Eos,

    /// See [`UNK_TOKEN`].
    #[strum(to_string = "UNK")]
    Unk,
}

impl ReservedToken {
    /// The token string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedToken::Pad => PAD_TOKEN,
            ReservedToken::Sos => SOS_TOKEN,
            ReservedToken::Eos => EOS_TOKEN,
            ReservedToken::Unk => UNK_TOKEN,
        }
    }
}
