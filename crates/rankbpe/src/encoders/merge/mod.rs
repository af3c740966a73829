//! # Merge Engine
//!
//! Reduces one fragment to vocabulary ranks by repeatedly merging the
//! leftmost lowest-ranked adjacent pair of pieces.
//!
//! Two strategies implement the same merge order:
//! * [`merge_boundary_sweep`] - rescans a boundary rank array; best for short fragments.
//! * [`merge_rank_levels`] - sweeps rank levels over a linked list; best for long fragments.

mod boundary_sweep;
mod rank_levels;

#[doc(inline)]
pub use boundary_sweep::merge_boundary_sweep;
#[doc(inline)]
pub use rank_levels::merge_rank_levels;

use crate::{errors::RBResult, types::TokenType, vocab::RankTable};

/// Merge strategy selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[non_exhaustive]
pub enum MergeStrategy {
    /// See: [`merge_boundary_sweep`].
    #[strum(serialize = "boundary_sweep")]
    BoundarySweep,

    /// See: [`merge_rank_levels`].
    #[strum(serialize = "rank_levels")]
    RankLevels,
}

impl MergeStrategy {
    /// Select the strategy for a fragment length.
    ///
    /// ## Arguments
    /// * `len` - the fragment byte length.
    /// * `large_span_threshold` - lengths at or above this use [`RankLevels`](Self::RankLevels).
    pub fn select(
        len: usize,
        large_span_threshold: usize,
    ) -> Self {
        if len >= large_span_threshold {
            Self::RankLevels
        } else {
            Self::BoundarySweep
        }
    }

    /// Merge `piece` with this strategy.
    ///
    /// See [`merge_boundary_sweep`] for the arguments.
    pub fn merge<T: TokenType>(
        self,
        table: &RankTable<T>,
        piece: &[u8],
        max_tokens: usize,
        tokens: Option<&mut Vec<T>>,
    ) -> RBResult<usize> {
        match self {
            Self::BoundarySweep => merge_boundary_sweep(table, piece, max_tokens, tokens),
            Self::RankLevels => merge_rank_levels(table, piece, max_tokens, tokens),
        }
    }
}
