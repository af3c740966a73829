//! # Vocabulary
//!
//! This module provides the vocabulary and related io mechanisms.
//!
//! ## Rank Table
//!
//! The primary vocabulary is [`RankTable`], an immutable ``{ Vec<u8> <-> T }``
//! mapping where the rank doubles as merge priority: lower ranks merge first.
//!
//! ## Special Tokens
//!
//! Reserved delimiter literals (``<|endoftext|>`` and friends) live in a
//! separate [`SpecialVocab`]; they are never produced by merging.
pub mod io;
pub mod rank_table;
pub mod special_vocab;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use rank_table::{RankTable, absorbed_rank, no_match_rank};
#[doc(inline)]
pub use special_vocab::{SPECIAL_END, SPECIAL_START, SpecialVocab};

use crate::types::RBHashMap;

/// ``{ Vec<u8> -> T }`` map.
pub type SpanTokenMap<T> = RBHashMap<Vec<u8>, T>;
