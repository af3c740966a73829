//! # Pretrained Encodings
//!
//! The built-in `OpenAI` encodings, the model table, and the
//! [`EncodingRegistry`] which loads and shares them.
//!
//! Vocabulary files are not bundled; point the registry at a directory
//! of `.tiktoken` rank files (see [`openai::EncodingType::vocab_file_name`]).
//!
//! ```rust,no_run
//! use rankbpe::{
//!     TokenEncoder,
//!     pretrained::{EncodingRegistry, openai::ModelType},
//! };
//!
//! let registry = EncodingRegistry::with_defaults("/path/to/vocabs")?;
//! let encoding = registry.get_encoding_for_model_type(ModelType::GPT_4O)?;
//! let count = encoding.count_tokens("Hello, world!")?;
//! assert!(count <= ModelType::GPT_4O.max_context_length());
//! # Ok::<(), rankbpe::RankBpeError>(())
//! ```

pub mod openai;
mod registry;

#[doc(inline)]
pub use registry::{EncodingRegistry, VOCAB_DIR_ENV};
