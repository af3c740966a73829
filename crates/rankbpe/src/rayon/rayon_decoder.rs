//! # Parallel Decoder

use std::sync::Arc;

use crate::{
    decoders::{BatchDecodeResult, TokenDecoder},
    errors::RBResult,
    types::TokenType,
};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches when available.
pub struct ParallelRayonDecoder<T: TokenType> {
    /// Wrapped decoder.
    pub inner: Arc<dyn TokenDecoder<T>>,
}

impl<T> ParallelRayonDecoder<T>
where
    T: TokenType,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonDecoder` instance.
    pub fn new(inner: Arc<dyn TokenDecoder<T>>) -> Self {
        Self { inner }
    }
}

impl<T> TokenDecoder<T> for ParallelRayonDecoder<T>
where
    T: TokenType,
{
    fn decode_token(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.inner.decode_token(token)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<Vec<u8>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_bytes(tokens))
            .collect::<RBResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<String>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_string(tokens))
            .collect::<RBResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoders::RankTableDecoder,
        vocab::testing::{test_rank_table, test_special_vocab},
    };

    #[test]
    fn test_decoder() {
        let samples = vec![
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
        ];

        let decoder = ParallelRayonDecoder::new(Arc::new(RankTableDecoder::new(
            Arc::new(test_rank_table::<u32>()),
            Arc::new(test_special_vocab::<u32>()),
        )));

        let token_batch: Vec<Vec<u32>> = samples
            .iter()
            .map(|s| s.as_bytes().iter().map(|&b| b as u32).collect())
            .collect();
        let refs: Vec<&[u32]> = token_batch.iter().map(Vec::as_slice).collect();

        let strings = decoder.try_decode_batch_to_strings(&refs).unwrap();
        assert_eq!(strings.try_results().unwrap(), samples);

        let bytes = decoder.try_decode_batch_to_bytes(&refs).unwrap();
        assert!(bytes.is_complete());
        assert_eq!(bytes.results[0].value, samples[0].as_bytes().to_vec());
    }
}
