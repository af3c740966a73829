//! # Token Decoder Trait

use crate::{
    decoders::{BatchDecodeResult, DecodeResult},
    errors::{RBResult, RankBpeError},
    types::TokenType,
};

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// The bytes of a single token, if it is known.
    fn decode_token(
        &self,
        token: T,
    ) -> Option<&[u8]>;

    /// Decodes tokens into bytes.
    ///
    /// Stops at the first unknown token.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// The decoded bytes, and the count of undecoded tokens.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> RBResult<DecodeResult<Vec<u8>>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        for (idx, &token) in tokens.iter().enumerate() {
            match self.decode_token(token) {
                Some(bytes) => buf.extend_from_slice(bytes),
                None => return Ok(DecodeResult::new(buf, Some(tokens.len() - idx))),
            }
        }
        Ok(DecodeResult::new(buf, None))
    }

    /// Decodes tokens into bytes, skipping unknown tokens.
    fn decode_bytes_lossy(
        &self,
        tokens: &[T],
    ) -> Vec<u8> {
        tokens
            .iter()
            .filter_map(|&token| self.decode_token(token))
            .flatten()
            .copied()
            .collect()
    }

    /// Decodes a batch of tokens.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect::<RBResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }

    /// Decodes tokens into a string.
    ///
    /// ## Returns
    /// The decoded string; or [`RankBpeError::InvalidUtf8`] if the
    /// decoded bytes are not valid UTF-8.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> RBResult<DecodeResult<String>> {
        self.try_decode_to_bytes(tokens)?
            .try_convert(|buf| String::from_utf8(buf).map_err(|_| RankBpeError::InvalidUtf8))
    }

    /// Decodes a batch of tokens into strings.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect::<RBResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }
}
