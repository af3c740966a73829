//! # Token Encoder Trait

use crate::{
    encoders::EncodingResult,
    errors::RBResult,
    types::TokenType,
    vocab::SpecialVocab,
};

/// How special token literals in the input are treated.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[non_exhaustive]
pub enum EncodeMode {
    /// Reject input containing a special literal.
    #[default]
    #[strum(serialize = "strict")]
    Strict,

    /// Encode special literals as ordinary text.
    #[strum(serialize = "ordinary")]
    Ordinary,

    /// Encode special literals as their reserved tokens.
    #[strum(serialize = "with_specials")]
    WithSpecials,
}

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached special vocab.
    fn special_vocab(&self) -> &SpecialVocab<T>;

    /// Encode text.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `mode` - The special token handling.
    /// * `max_tokens` - An optional token budget.
    ///
    /// ## Returns
    /// The tokens, truncation flag, and last processed byte.
    fn try_encode_with(
        &self,
        text: &str,
        mode: EncodeMode,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>>;

    /// Count the tokens `text` encodes to, without keeping them.
    fn try_count_with(
        &self,
        text: &str,
        mode: EncodeMode,
    ) -> RBResult<usize>;

    /// Encode text, rejecting special literals.
    fn encode(
        &self,
        text: &str,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>> {
        self.try_encode_with(text, EncodeMode::Strict, max_tokens)
    }

    /// Encode text, treating special literals as text.
    fn encode_ordinary(
        &self,
        text: &str,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>> {
        self.try_encode_with(text, EncodeMode::Ordinary, max_tokens)
    }

    /// Encode text into tokens, rejecting special literals.
    ///
    /// ## Returns
    /// A `Result` containing the vector of tokens or an error.
    fn try_encode(
        &self,
        text: &str,
    ) -> RBResult<Vec<T>> {
        self.encode(text, None).map(EncodingResult::into_tokens)
    }

    /// Encode text into tokens, treating special literals as text.
    fn try_encode_ordinary(
        &self,
        text: &str,
    ) -> RBResult<Vec<T>> {
        self.encode_ordinary(text, None)
            .map(EncodingResult::into_tokens)
    }

    /// Encode text into tokens, mapping special literals to their tokens.
    fn try_encode_with_special_tokens(
        &self,
        text: &str,
    ) -> RBResult<Vec<T>> {
        self.try_encode_with(text, EncodeMode::WithSpecials, None)
            .map(EncodingResult::into_tokens)
    }

    /// Count tokens, rejecting special literals.
    fn count_tokens(
        &self,
        text: &str,
    ) -> RBResult<usize> {
        self.try_count_with(text, EncodeMode::Strict)
    }

    /// Count tokens, treating special literals as text.
    fn count_tokens_ordinary(
        &self,
        text: &str,
    ) -> RBResult<usize> {
        self.try_count_with(text, EncodeMode::Ordinary)
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    ///
    /// ## Returns
    /// A `Result` containing the token vectors, in order.
    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> RBResult<Vec<Vec<T>>> {
        batch.iter().map(|text| self.try_encode(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_mode_names() {
        assert_eq!(EncodeMode::default(), EncodeMode::Strict);
        assert_eq!(EncodeMode::WithSpecials.to_string(), "with_specials");
        assert_eq!(
            "ordinary".parse::<EncodeMode>().unwrap(),
            EncodeMode::Ordinary
        );
    }
}
