//! # Rank Table ``{ T -> Vec<u8> }`` Token Decoder

use std::sync::Arc;

use crate::{
    decoders::TokenDecoder,
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// A [`TokenDecoder<T>`] over a [`RankTable`], falling back to special tokens.
#[derive(Debug, Clone)]
pub struct RankTableDecoder<T: TokenType> {
    table: Arc<RankTable<T>>,
    specials: Arc<SpecialVocab<T>>,
}

impl<T: TokenType> RankTableDecoder<T> {
    /// Creates a new Decoder.
    ///
    /// ## Arguments
    /// * `table` - The rank table.
    /// * `specials` - The special tokens, consulted after the table.
    pub fn new(
        table: Arc<RankTable<T>>,
        specials: Arc<SpecialVocab<T>>,
    ) -> Self {
        Self { table, specials }
    }
}

impl<T: TokenType> TokenDecoder<T> for RankTableDecoder<T> {
    #[inline]
    fn decode_token(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.table
            .decode_token(token)
            .or_else(|| self.specials.decode_if_present(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::{test_rank_table, test_special_vocab};

    #[test]
    fn test_rank_table_decoder() {
        let table = Arc::new(test_rank_table::<u32>());
        let specials = Arc::new(test_special_vocab::<u32>());
        let decoder = RankTableDecoder::new(table.clone(), specials);

        let hello: Vec<u32> = b"hello".iter().map(|&b| b as u32).collect();
        let mut tokens = hello.clone();
        tokens.push(100257);
        tokens.extend(&hello);

        let res = decoder.try_decode_to_string(&tokens).unwrap();
        assert_eq!(res.try_result().unwrap(), "hello<|endoftext|>hello");

        let unknown = table.max_rank().unwrap() + 1;
        let res = decoder.try_decode_to_bytes(&[104, unknown, 105]).unwrap();
        assert_eq!(res.remaining, Some(2));
        assert_eq!(res.value, b"h".to_vec());

        assert_eq!(decoder.decode_bytes_lossy(&[104, unknown, 105]), b"hi".to_vec());
    }
}
