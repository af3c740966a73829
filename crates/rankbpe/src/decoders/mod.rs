//! # Token Decoders
//!
//! Decoder clients should use:
//!
//! * [`RankTableDecoder`] - rank table lookups, with special token fallback.
//! * `ParallelRayonDecoder` - a batch parallelism wrapper around any `TokenDecoder`.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rankbpe::{
//!     decoders::{TokenDecoder, TokenDecoderOptions},
//!     vocab::{RankTable, SpecialVocab},
//! };
//!
//! let table = RankTable::<u32>::from_pairs([(b"hi".to_vec(), 0), (b"!".to_vec(), 1)])?;
//! let specials = SpecialVocab::from_pairs([("<|end|>", 2)])?;
//!
//! let decoder = TokenDecoderOptions::default()
//!     .with_parallel(true)
//!     .build(Arc::new(table), Arc::new(specials));
//!
//! let text = decoder.try_decode_to_string(&[0, 1, 2])?.try_result()?;
//! assert_eq!(text, "hi!<|end|>");
//! # Ok::<(), rankbpe::RankBpeError>(())
//! ```

mod decode_results;
mod decoder_options;
mod rank_table_decoder;
mod token_decoder;

#[doc(inline)]
pub use decode_results::{BatchDecodeResult, DecodeResult};
#[doc(inline)]
pub use decoder_options::TokenDecoderOptions;
#[doc(inline)]
pub use rank_table_decoder::RankTableDecoder;
#[doc(inline)]
pub use token_decoder::TokenDecoder;
