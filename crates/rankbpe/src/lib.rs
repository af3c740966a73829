//! # `rankbpe` Rank-Table BPE Tokenizer
//!
//! This is a byte-pair-encoding tokenizer for `tiktoken`-format vocabularies
//! (`r50k_base`, `p50k_base`, `p50k_edit`, `cl100k_base`, `o200k_base`).
//!
//! Text is split into fragments, and each fragment is reduced to vocabulary
//! ranks by repeatedly merging the lowest-ranked adjacent pair. Decoding maps
//! ranks back to their bytes.
//!
//! See:
//! * [`vocab`] for the [`vocab::RankTable`], special tokens, and vocab io.
//! * [`spanning`] for the fragment splitters.
//! * [`encoders`] for the merge engine and the [`TokenEncoder`] trait.
//! * [`decoders`] for the [`TokenDecoder`] trait.
//! * [`encoding`] for [`BpeEncoding`], which ties them together.
//! * [`pretrained`] for the `OpenAI` encodings, model table, and registry.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Loading An Encoding
//!
//! ```rust,no_run
//! use rankbpe::{TokenDecoder, TokenEncoder, pretrained::EncodingRegistry};
//!
//! let registry = EncodingRegistry::lazy("/path/to/vocabs");
//! let encoding = registry.get_encoding_for_model("gpt-4")?;
//!
//! let tokens = encoding.try_encode("Hello, world!")?;
//! let text = encoding.try_decode_to_string(&tokens)?.try_result()?;
//! assert_eq!(text, "Hello, world!");
//! # Ok::<(), rankbpe::RankBpeError>(())
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod encoding;
pub mod errors;
pub mod pretrained;
pub mod regex;
pub mod spanning;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{DecodeResult, TokenDecoder};
#[doc(inline)]
pub use encoders::{EncodeMode, EncodingResult, TokenEncoder, TokenEncoderOptions};
#[doc(inline)]
pub use encoding::{BpeEncoding, EncodingParams};
#[doc(inline)]
pub use errors::{RBResult, RankBpeError};
#[doc(inline)]
pub use types::TokenType;
