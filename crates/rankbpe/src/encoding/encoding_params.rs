//! # Encoding Parameters

use crate::{
    spanning::SpannerPattern,
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// Everything needed to construct a [`BpeEncoding`](crate::BpeEncoding).
#[derive(Debug, Clone)]
pub struct EncodingParams<T: TokenType> {
    /// The encoding name, e.g. ``"cl100k_base"``.
    pub name: String,

    /// The fragment splitter.
    pub pattern: SpannerPattern,

    /// The mergeable ranks.
    pub ranks: RankTable<T>,

    /// The special tokens.
    pub specials: SpecialVocab<T>,
}

impl<T: TokenType> EncodingParams<T> {
    /// Build parameters.
    ///
    /// ## Arguments
    /// * `name` - the encoding name.
    /// * `pattern` - the splitter selection.
    /// * `ranks` - the rank table.
    /// * `specials` - the special tokens.
    pub fn new<S, P>(
        name: S,
        pattern: P,
        ranks: RankTable<T>,
        specials: SpecialVocab<T>,
    ) -> Self
    where
        S: Into<String>,
        P: Into<SpannerPattern>,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            ranks,
            specials,
        }
    }

    /// Replace the special tokens.
    pub fn with_specials(
        mut self,
        specials: SpecialVocab<T>,
    ) -> Self {
        self.specials = specials;
        self
    }
}
