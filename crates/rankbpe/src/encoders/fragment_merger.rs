//! # Fragment Merger

use std::sync::Arc;

use crate::{
    encoders::{DEFAULT_LARGE_SPAN_THRESHOLD, merge::MergeStrategy},
    errors::RBResult,
    types::TokenType,
    vocab::RankTable,
};

/// Reduces single fragments to ranks.
///
/// Whole-fragment vocabulary hits short-circuit; other fragments go to the
/// [`MergeStrategy`] selected by byte length.
#[derive(Debug, Clone)]
pub struct FragmentMerger<T: TokenType> {
    table: Arc<RankTable<T>>,
    large_span_threshold: usize,
}

impl<T: TokenType> FragmentMerger<T> {
    /// Build a merger.
    ///
    /// ## Arguments
    /// * `table` - the rank table.
    /// * `large_span_threshold` - fragments at least this long use [`MergeStrategy::RankLevels`].
    pub fn new(
        table: Arc<RankTable<T>>,
        large_span_threshold: usize,
    ) -> Self {
        Self {
            table,
            large_span_threshold,
        }
    }

    /// Get the rank table.
    pub fn table(&self) -> &Arc<RankTable<T>> {
        &self.table
    }

    /// Get the large span threshold.
    pub fn large_span_threshold(&self) -> usize {
        self.large_span_threshold
    }

    /// The rank of a whole fragment, if it is a single entry.
    #[inline]
    pub fn encode_fragment(
        &self,
        fragment: &[u8],
    ) -> Option<T> {
        self.table.lookup(fragment)
    }

    /// Merge one fragment.
    ///
    /// ## Arguments
    /// * `fragment` - the fragment bytes; never empty.
    /// * `max_tokens` - stop appending once `tokens` holds this many ids.
    /// * `tokens` - the output buffer; `None` to only count.
    ///
    /// ## Returns
    /// The number of tokens the whole fragment encodes to.
    pub fn merge_fragment(
        &self,
        fragment: &[u8],
        max_tokens: usize,
        tokens: Option<&mut Vec<T>>,
    ) -> RBResult<usize> {
        if let Some(token) = self.encode_fragment(fragment) {
            if let Some(tokens) = tokens
                && tokens.len() < max_tokens
            {
                tokens.push(token);
            }
            return Ok(1);
        }

        let strategy = MergeStrategy::select(fragment.len(), self.large_span_threshold);
        if strategy == MergeStrategy::RankLevels {
            log::trace!("{strategy} merge for a {} byte fragment", fragment.len());
        }
        strategy.merge(&self.table, fragment, max_tokens, tokens)
    }
}

impl<T: TokenType> From<Arc<RankTable<T>>> for FragmentMerger<T> {
    fn from(table: Arc<RankTable<T>>) -> Self {
        Self::new(table, DEFAULT_LARGE_SPAN_THRESHOLD)
    }
}
