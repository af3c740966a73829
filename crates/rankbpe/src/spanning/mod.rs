//! # Text Spanning
//!
//! This module splits text into fragments before merging.
//!
//! * [`Cl100kSplitter`] - the hand-coded `cl100k_base` splitter.
//! * [`RegexLexer`] - pattern splitting for the other encodings.
//! * [`TextSpanner`] - a word lexer plus special-token scanning.
//!
//! Every lexer's spans partition its input: concatenating them rebuilds
//! the text exactly.

pub mod char_classes;
mod cl100k_splitter;
mod regex_lexer;
mod span_lexer;
mod spanner_pattern;
mod text_spanner;

#[doc(inline)]
pub use cl100k_splitter::Cl100kSplitter;
#[doc(inline)]
pub use regex_lexer::RegexLexer;
#[doc(inline)]
pub use span_lexer::{SpanLexer, SpanRef};
#[doc(inline)]
pub use spanner_pattern::SpannerPattern;
#[doc(inline)]
pub use text_spanner::TextSpanner;
