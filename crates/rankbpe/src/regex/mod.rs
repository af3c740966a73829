//! # Regex Utilities
//!
//! The GPT-2 and `o200k` split patterns need look-around and possessive
//! quantifiers, which only [`fancy_regex`] provides; plain literal unions
//! (special tokens) are cheaper under [`regex`].
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

pub mod exact_match_union;
pub mod pattern_macros;
pub mod regex_wrapper;

#[doc(inline)]
pub use exact_match_union::exact_match_union_regex_pattern;
#[doc(inline)]
pub use regex_wrapper::{ConstRegexWrapperPattern, RegexMatches, RegexWrapper, RegexWrapperPattern};
