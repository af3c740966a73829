//! # Encodings
//!
//! A [`BpeEncoding`] is one named vocabulary, ready to encode and decode.
//! Build one from [`EncodingParams`], or get a pretrained one from the
//! [`EncodingRegistry`](crate::pretrained::EncodingRegistry).

mod bpe_encoding;
mod encoding_params;

#[doc(inline)]
pub use bpe_encoding::BpeEncoding;
#[doc(inline)]
pub use encoding_params::EncodingParams;
