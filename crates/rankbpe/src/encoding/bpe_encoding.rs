//! # BPE Encoding
//!
//! One named vocabulary with its splitter, encoder, and decoder.

use core::ops::Range;
use std::sync::Arc;

use crate::{
    decoders::{BatchDecodeResult, DecodeResult, TokenDecoder, TokenDecoderOptions},
    encoders::{EncodeMode, EncodingResult, TokenEncoder, TokenEncoderOptions},
    encoding::EncodingParams,
    errors::RBResult,
    spanning::{SpanRef, TextSpanner},
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// A named BPE encoding.
///
/// Combines:
///  * a [`RankTable`] and [`SpecialVocab`],
///  * a [`TextSpanner`],
///  * [`TokenEncoder`] and [`TokenDecoder`] implementations.
///
/// Immutable once built; share it across threads with an `Arc`.
#[derive(Clone)]
pub struct BpeEncoding<T: TokenType> {
    name: String,
    table: Arc<RankTable<T>>,
    specials: Arc<SpecialVocab<T>>,
    spanner: TextSpanner,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> core::fmt::Debug for BpeEncoding<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("BpeEncoding")
            .field("name", &self.name)
            .field("ranks", &self.table.len())
            .field("specials", &self.specials.len())
            .finish_non_exhaustive()
    }
}

impl<T: TokenType> BpeEncoding<T> {
    /// Build an encoding with default options.
    pub fn from_params(params: EncodingParams<T>) -> RBResult<Self> {
        Self::from_params_with_options(
            params,
            TokenEncoderOptions::default(),
            TokenDecoderOptions::default(),
        )
    }

    /// Build an encoding.
    ///
    /// ## Arguments
    /// * `params` - the encoding parameters.
    /// * `encoder_options` - encoder configuration.
    /// * `decoder_options` - decoder configuration.
    ///
    /// ## Returns
    /// The encoding; or an error if a special token reuses a rank,
    /// or the split pattern does not compile.
    pub fn from_params_with_options(
        params: EncodingParams<T>,
        encoder_options: TokenEncoderOptions,
        decoder_options: TokenDecoderOptions,
    ) -> RBResult<Self> {
        let EncodingParams {
            name,
            pattern,
            ranks,
            specials,
        } = params;

        specials.validate_disjoint(&ranks)?;
        let spanner = TextSpanner::from_pattern(&pattern, &specials)?;

        log::debug!(
            "encoding {name}: {} ranks, {} special tokens, threshold {}",
            ranks.len(),
            specials.len(),
            encoder_options.large_span_threshold()
        );

        let table = Arc::new(ranks);
        let specials = Arc::new(specials);
        let encoder = encoder_options.build(table.clone(), specials.clone(), spanner.clone());
        let decoder = decoder_options.build(table.clone(), specials.clone());

        Ok(Self {
            name,
            table,
            specials,
            spanner,
            encoder,
            decoder,
        })
    }

    /// The encoding name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rank table.
    pub fn rank_table(&self) -> &Arc<RankTable<T>> {
        &self.table
    }

    /// The special tokens.
    pub fn specials(&self) -> &Arc<SpecialVocab<T>> {
        &self.specials
    }

    /// The fragment splitter.
    pub fn spanner(&self) -> &TextSpanner {
        &self.spanner
    }

    /// The underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// The underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }

    /// The largest token id, counting special tokens.
    pub fn max_token_value(&self) -> Option<T> {
        self.table.max_rank().max(self.specials.max_token())
    }

    /// Split `text` into fragments.
    ///
    /// ## Arguments
    /// * `text` - the text to split; special literals are ordinary text.
    /// * `sink` - receives each fragment; return `false` to stop.
    ///
    /// ## Returns
    /// `true` if every fragment was accepted.
    pub fn split<'a>(
        &self,
        text: &'a str,
        sink: &mut dyn FnMut(&'a str) -> bool,
    ) -> RBResult<bool> {
        let (completed, _) = self
            .spanner
            .for_each_word(text, &mut |span: SpanRef| sink(&text[Range::from(span)]))?;
        Ok(completed)
    }
}

impl<T: TokenType> TokenEncoder<T> for BpeEncoding<T> {
    fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    fn try_encode_with(
        &self,
        text: &str,
        mode: EncodeMode,
        max_tokens: Option<usize>,
    ) -> RBResult<EncodingResult<T>> {
        self.encoder.try_encode_with(text, mode, max_tokens)
    }

    fn try_count_with(
        &self,
        text: &str,
        mode: EncodeMode,
    ) -> RBResult<usize> {
        self.encoder.try_count_with(text, mode)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> RBResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch)
    }
}

impl<T: TokenType> TokenDecoder<T> for BpeEncoding<T> {
    fn decode_token(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.decoder.decode_token(token)
    }

    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> RBResult<DecodeResult<Vec<u8>>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<Vec<u8>>> {
        self.decoder.try_decode_batch_to_bytes(batch)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> RBResult<BatchDecodeResult<String>> {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        errors::RankBpeError,
        pretrained::openai::OA_R50K_BASE_PATTERN,
        spanning::SpannerPattern,
        vocab::testing::{test_rank_table, test_special_vocab},
    };

    fn cl100k_like<T: TokenType>() -> BpeEncoding<T> {
        BpeEncoding::from_params(EncodingParams::new(
            "test_cl100k",
            SpannerPattern::Cl100k,
            test_rank_table(),
            test_special_vocab(),
        ))
        .unwrap()
    }

    fn check_hello_world<T: TokenType>() {
        let enc = cl100k_like::<T>();
        assert_eq!(enc.name(), "test_cl100k");

        let mut fragments: Vec<&str> = Vec::new();
        assert!(
            enc.split("Hello, world!", &mut |f| {
                fragments.push(f);
                true
            })
            .unwrap()
        );
        assert_eq!(fragments, vec!["Hello", ",", " world", "!"]);

        let tokens = enc.try_encode("Hello, world!").unwrap();
        let text = enc.try_decode_to_string(&tokens).unwrap();
        assert_eq!(text.try_result().unwrap(), "Hello, world!");
    }

    #[test]
    fn test_hello_world_u32() {
        check_hello_world::<u32>();
    }

    #[test]
    fn test_hello_world_u64() {
        check_hello_world::<u64>();
    }

    #[test]
    fn test_split_stops_early() {
        let enc = cl100k_like::<u32>();
        let mut seen = 0;
        let completed = enc
            .split("one two three", &mut |_: &str| {
                seen += 1;
                seen < 2
            })
            .unwrap();
        assert!(!completed);
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_endoftext_strict_vs_ordinary() {
        let enc = cl100k_like::<u32>();
        let text = "The end.<|endoftext|>";

        assert!(matches!(
            enc.encode(text, None),
            Err(RankBpeError::SpecialTokenCollision { .. })
        ));

        let tokens = enc.try_encode_ordinary(text).unwrap();
        let decoded = enc.try_decode_to_string(&tokens).unwrap().try_result().unwrap();
        assert_eq!(decoded, text);

        let tokens = enc.try_encode_with_special_tokens(text).unwrap();
        assert_eq!(tokens.last(), Some(&100257));
        let decoded = enc.try_decode_to_string(&tokens).unwrap().try_result().unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_regex_splitter_encoding() {
        let enc: BpeEncoding<u32> = BpeEncoding::from_params(EncodingParams::new(
            "test_r50k",
            OA_R50K_BASE_PATTERN,
            test_rank_table(),
            SpecialVocab::from_pairs([("<|endoftext|>", 50256)]).unwrap(),
        ))
        .unwrap();

        let text = "It's a beautiful day, and I'll be taking my 3 dogs.";
        let tokens = enc.try_encode(text).unwrap();
        assert_eq!(enc.count_tokens(text).unwrap(), tokens.len());
        assert_eq!(enc.decode_bytes_lossy(&tokens), text.as_bytes());
    }

    #[test]
    fn test_special_rank_conflict() {
        let table = test_rank_table::<u32>();
        let err = BpeEncoding::from_params(EncodingParams::new(
            "bad",
            SpannerPattern::Cl100k,
            table,
            SpecialVocab::from_pairs([("<|endoftext|>", 97)]).unwrap(),
        ))
        .unwrap_err();
        assert!(matches!(err, RankBpeError::VocabConflict(_)));
    }

    #[test]
    fn test_max_token_value() {
        let enc = cl100k_like::<u32>();
        assert_eq!(enc.max_token_value(), Some(100276));
        assert_eq!(enc.specials().len(), 3);
        assert!(enc.rank_table().len() > 256);
    }

    #[test]
    fn test_threshold_option() {
        let params = EncodingParams::new(
            "test_cl100k",
            SpannerPattern::Cl100k,
            test_rank_table::<u32>(),
            test_special_vocab(),
        );
        let tiny = BpeEncoding::from_params_with_options(
            params.clone(),
            TokenEncoderOptions::default().with_large_span_threshold(2),
            TokenDecoderOptions::default(),
        )
        .unwrap();
        let default = BpeEncoding::from_params(params).unwrap();

        let text = TEST_TEXT.repeat(4);
        assert_eq!(
            tiny.try_encode(&text).unwrap(),
            default.try_encode(&text).unwrap()
        );
    }

    const TEST_TEXT: &str = "Hello world, hello there!\n\n  indented code();\n\treturn 42;\n";

    #[test]
    fn test_batch() {
        let enc = cl100k_like::<u32>();
        let batch = enc.try_encode_batch(&["hello", "world"]).unwrap();
        let refs: Vec<&[u32]> = batch.iter().map(Vec::as_slice).collect();
        let strings = enc.try_decode_batch_to_strings(&refs).unwrap();
        assert_eq!(strings.try_results().unwrap(), vec!["hello", "world"]);
    }

    proptest! {
        #[test]
        fn round_trip(text in "\\PC{0,100}") {
            let enc = cl100k_like::<u32>();
            let tokens = enc.try_encode_ordinary(&text).unwrap();
            let decoded = enc.try_decode_to_bytes(&tokens).unwrap().try_result().unwrap();
            prop_assert_eq!(decoded, text.as_bytes());
            prop_assert_eq!(enc.count_tokens_ordinary(&text).unwrap(), tokens.len());

            if let Ok(strict) = enc.try_encode(&text) {
                prop_assert_eq!(&strict, &tokens);
                prop_assert_eq!(enc.count_tokens(&text).unwrap(), strict.len());
            }
        }

        #[test]
        fn prefix_law(text in "\\PC{0,60}", budget in 0usize..16) {
            let enc = cl100k_like::<u32>();
            let result = enc.encode_ordinary(&text, Some(budget)).unwrap();
            let decoded = enc.decode_bytes_lossy(&result.tokens);
            prop_assert!(text.as_bytes().starts_with(&decoded));
            prop_assert_eq!(result.truncated, decoded.len() < text.len());
        }
    }
}
