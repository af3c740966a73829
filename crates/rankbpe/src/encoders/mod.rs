//! # Encoders
//!
//! Text is split into fragments by a [`TextSpanner`](crate::spanning::TextSpanner);
//! each fragment is looked up whole, and otherwise reduced by the [`merge`] engine.
//!
//! * [`TokenEncoder`] - the encoder trait.
//! * [`BpeEncoder`] - the rank-table implementation.
//! * [`TokenEncoderOptions`] - builds encoders.

mod bpe_encoder;
mod encoder_options;
mod encoding_result;
mod fragment_merger;
pub mod merge;
mod token_encoder;

#[doc(inline)]
pub use bpe_encoder::BpeEncoder;
#[doc(inline)]
pub use encoder_options::{
    DEFAULT_LARGE_SPAN_THRESHOLD,
    LARGE_SPAN_THRESHOLD_ENV,
    TokenEncoderOptions,
};
#[doc(inline)]
pub use encoding_result::EncodingResult;
#[doc(inline)]
pub use fragment_merger::FragmentMerger;
#[doc(inline)]
pub use token_encoder::{EncodeMode, TokenEncoder};
