//! # Parallel Encoder

use std::sync::Arc;

use crate::{
    encoders::{EncodeMode, EncodingResult, TokenEncoder},
    errors::RBResult,
    types::TokenType,
    vocab::SpecialVocab,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
pub struct ParallelRayonEncoder<T: TokenType> {
    /// Inner encoder.
    pub inner: Arc<dyn TokenEncoder<T>>,
}

impl<T> ParallelRayonEncoder<T>
where
    T: TokenType,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: Arc<dyn TokenEncoder<T>>) -> Self {
        Self { inner }
    }
}

impl<T> TokenEncoder<T> for ParallelRayonEncoder<T>
where
    T: TokenType,
{
    fn special_vocab(&self) -> &SpecialVocab<T> {
        self.inner.special_vocab()
    }

    fn try_encode_with(
        &self,
        text: &str,
        mode: EncodeMode,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>> {
        self.inner.try_encode_with(text, mode, max_tokens)
    }

    fn try_count_with(
        &self,
        text: &str,
        mode: EncodeMode,
    ) -> RBResult<usize> {
        self.inner.try_count_with(text, mode)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> RBResult<Vec<Vec<T>>> {
        use rayon::prelude::*;

        let results: Vec<RBResult<Vec<T>>> = batch
            .par_iter()
            .map(|text| self.inner.try_encode(text))
            .collect();

        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoders::TokenEncoderOptions,
        errors::RankBpeError,
        spanning::{SpannerPattern, TextSpanner},
        vocab::testing::{test_rank_table, test_special_vocab},
    };

    #[test]
    fn test_encoder() {
        let samples = vec![
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
        ];

        let specials = Arc::new(test_special_vocab::<u32>());
        let spanner = TextSpanner::from_pattern(&SpannerPattern::Cl100k, &*specials).unwrap();
        let inner =
            TokenEncoderOptions::default().build(Arc::new(test_rank_table()), specials, spanner);
        let encoder = ParallelRayonEncoder::new(inner.clone());

        let expected: Vec<Vec<u32>> = samples
            .iter()
            .map(|s| inner.try_encode(s).unwrap())
            .collect();
        assert_eq!(encoder.try_encode_batch(&samples).unwrap(), expected);

        assert_eq!(
            encoder.count_tokens(samples[0]).unwrap(),
            expected[0].len()
        );
        assert_eq!(encoder.special_vocab().len(), 3);

        let err = encoder
            .try_encode_batch(&["fine", "not <|endoftext|> fine"])
            .unwrap_err();
        assert!(matches!(err, RankBpeError::SpecialTokenCollision { .. }));
    }
}
