//! Public `OpenAI` Patterns, Special Tokens, Encodings, and Models.

mod encoding_type;
mod loaders;
mod model_type;
pub mod patterns;
pub mod specials;

#[doc(inline)]
pub use encoding_type::EncodingType;
#[doc(inline)]
pub use model_type::{ModelType, OA_MODEL_TYPES};
#[doc(inline)]
pub use patterns::*;
