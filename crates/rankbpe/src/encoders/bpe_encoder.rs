//! # BPE Encoder
//!
//! Drives the splitter and the [`FragmentMerger`] over a whole text.

use std::sync::Arc;

use crate::{
    encoders::{EncodeMode, EncodingResult, FragmentMerger, TokenEncoder},
    errors::{RBResult, RankBpeError, invariant_violation},
    spanning::{SpanRef, TextSpanner},
    types::TokenType,
    vocab::SpecialVocab,
};

/// Expected bytes per token; sizes the output buffer.
const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// The [`TokenEncoder`] for rank-table vocabularies.
#[derive(Debug, Clone)]
pub struct BpeEncoder<T: TokenType> {
    spanner: TextSpanner,
    specials: Arc<SpecialVocab<T>>,
    merger: FragmentMerger<T>,
}

impl<T: TokenType> BpeEncoder<T> {
    /// Build an encoder.
    ///
    /// ## Arguments
    /// * `spanner` - the fragment splitter.
    /// * `specials` - the special tokens.
    /// * `merger` - the fragment merger.
    pub fn new(
        spanner: TextSpanner,
        specials: Arc<SpecialVocab<T>>,
        merger: FragmentMerger<T>,
    ) -> Self {
        Self {
            spanner,
            specials,
            merger,
        }
    }

    /// Get the spanner.
    pub fn spanner(&self) -> &TextSpanner {
        &self.spanner
    }

    /// Get the fragment merger.
    pub fn merger(&self) -> &FragmentMerger<T> {
        &self.merger
    }

    /// Split `text` and merge its fragments in order.
    ///
    /// Splitting stops once the running token count reaches `max_tokens`.
    ///
    /// ## Returns
    /// The running token count.
    fn merge_spans(
        &self,
        text: &str,
        mode: EncodeMode,
        max_tokens: usize,
        mut tokens: Option<&mut Vec<T>>,
    ) -> RBResult<usize> {
        let bytes = text.as_bytes();
        let mut count = 0;
        let mut failure: Option<RankBpeError> = None;

        let mut visit = |span: SpanRef| -> bool {
            if count >= max_tokens {
                return false;
            }
            let merged = match span {
                SpanRef::Word(range) | SpanRef::Gap(range) => {
                    self.merger
                        .merge_fragment(&bytes[range], max_tokens, tokens.as_deref_mut())
                }
                SpanRef::Special(range) => match self.specials.lookup_token(&text[range]) {
                    Some(token) => {
                        if let Some(tokens) = tokens.as_deref_mut()
                            && tokens.len() < max_tokens
                        {
                            tokens.push(token);
                        }
                        Ok(1)
                    }
                    None => Err(invariant_violation("special span matched no special token")),
                },
            };
            match merged {
                Ok(n) => {
                    count += n;
                    true
                }
                Err(err) => {
                    failure = Some(err);
                    false
                }
            }
        };

        match mode {
            EncodeMode::WithSpecials => self.spanner.for_each_split_span(text, &mut visit)?,
            _ => self.spanner.for_each_word(text, &mut visit)?,
        };

        match failure {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// The bytes of a token, from the rank table or the special set.
    fn token_bytes(
        &self,
        token: T,
    ) -> RBResult<&[u8]> {
        self.merger
            .table()
            .decode_token(token)
            .or_else(|| self.specials.decode_if_present(token))
            .ok_or_else(|| invariant_violation(format!("encoder produced unknown token {token}")))
    }

    /// Trim trailing tokens until they decode to a prefix of `text`
    /// ending on a character boundary.
    fn trim_to_prefix(
        &self,
        text: &str,
        mut tokens: Vec<T>,
    ) -> RBResult<EncodingResult<T>> {
        let mut decoded: Vec<u8> = Vec::with_capacity(text.len());
        let mut ends: Vec<usize> = Vec::with_capacity(tokens.len());
        for &token in &tokens {
            decoded.extend_from_slice(self.token_bytes(token)?);
            ends.push(decoded.len());
        }

        while let Some(&end) = ends.last() {
            if text.as_bytes().starts_with(&decoded[..end]) && text.is_char_boundary(end) {
                break;
            }
            ends.pop();
            tokens.pop();
        }

        let decoded_len = ends.last().copied().unwrap_or(0);
        Ok(EncodingResult::new(
            tokens,
            decoded_len < text.len(),
            decoded_len.checked_sub(1),
        ))
    }
}

impl<T: TokenType> TokenEncoder<T> for BpeEncoder<T> {
    fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_encode_with(
        &self,
        text: &str,
        mode: EncodeMode,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>> {
        if text.is_empty() {
            return Ok(EncodingResult::default());
        }
        if mode == EncodeMode::Strict {
            self.specials.check_for_special_tokens(text)?;
        }

        let budget = max_tokens.unwrap_or(usize::MAX);
        let mut tokens = Vec::with_capacity(
            (text.len() / EXPECTED_BYTES_PER_TOKEN + 1).min(budget),
        );
        self.merge_spans(text, mode, budget, Some(&mut tokens))?;

        match max_tokens {
            Some(_) => self.trim_to_prefix(text, tokens),
            None => Ok(EncodingResult::complete(tokens, text.len())),
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_count_with(
        &self,
        text: &str,
        mode: EncodeMode,
    ) -> RBResult<usize> {
        if text.is_empty() {
            return Ok(0);
        }
        if mode == EncodeMode::Strict {
            self.specials.check_for_special_tokens(text)?;
        }
        self.merge_spans(text, mode, usize::MAX, None)
    }
}
