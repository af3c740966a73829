//! # Length-Bucketed Rank Table ``{ Vec<u8> <-> T }``

use crate::{
    errors::{RBResult, RankBpeError},
    types::{RBHashMap, TokenType, hash_map_with_capacity},
    vocab::SpanTokenMap,
};

/// The merge-state rank for a boundary with no vocabulary entry.
///
/// Reserved; never a real vocabulary rank.
#[inline(always)]
pub fn no_match_rank<T: TokenType>() -> T {
    T::max_value() - T::one()
}

/// The merge-state rank for a boundary absorbed by an earlier merge.
///
/// Reserved; never a real vocabulary rank.
#[inline(always)]
pub fn absorbed_rank<T: TokenType>() -> T {
    T::max_value()
}

/// Immutable byte-sequence / rank table.
///
/// Forward lookups are bucketed by byte length, so probing a slice
/// touches only the entries of exactly that length.
///
/// Built once, read-only afterward; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RankTable<T: TokenType> {
    /// ``buckets[len]`` holds every entry of byte length ``len``; ``buckets[0]`` is unused.
    buckets: Vec<SpanTokenMap<T>>,

    /// ``{ T -> Vec<u8> }`` inverse.
    decoder: RBHashMap<T, Vec<u8>>,
}

impl<T: TokenType> PartialEq for RankTable<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.decoder == other.decoder
    }
}

impl<T: TokenType> RankTable<T> {
    /// Build a table from ``(bytes, rank)`` pairs.
    ///
    /// ## Arguments
    /// * `pairs` - the vocabulary entries.
    ///
    /// ## Returns
    /// The table; or an error if an entry is empty, a rank or byte sequence
    /// repeats, or a rank collides with the reserved sentinels.
    pub fn from_pairs<I>(pairs: I) -> RBResult<Self>
    where
        I: IntoIterator<Item = (Vec<u8>, T)>,
    {
        let pairs = pairs.into_iter();
        let mut decoder: RBHashMap<T, Vec<u8>> = hash_map_with_capacity(pairs.size_hint().0);
        let mut buckets: Vec<SpanTokenMap<T>> = Vec::new();

        let limit = no_match_rank::<T>();
        for (span, rank) in pairs {
            if span.is_empty() {
                return Err(RankBpeError::VocabConflict(format!(
                    "rank {rank} maps to an empty byte sequence"
                )));
            }
            if rank >= limit {
                return Err(RankBpeError::TokenOutOfRange {
                    rank: rank.to_u64().unwrap_or(u64::MAX),
                });
            }

            if buckets.len() <= span.len() {
                buckets.resize_with(span.len() + 1, SpanTokenMap::default);
            }
            if let Some(prev) = buckets[span.len()].insert(span.clone(), rank) {
                return Err(RankBpeError::VocabConflict(format!(
                    "byte sequence {span:?} has ranks {prev} and {rank}"
                )));
            }
            if let Some(prev) = decoder.insert(rank, span) {
                return Err(RankBpeError::VocabConflict(format!(
                    "rank {rank} is shared by {prev:?} and {:?}",
                    decoder[&rank]
                )));
            }
        }

        buckets.iter_mut().for_each(|b| b.shrink_to_fit());

        Ok(Self { buckets, decoder })
    }

    /// The number of entries in the table.
    pub fn len(&self) -> usize {
        self.decoder.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.decoder.is_empty()
    }

    /// The byte length of the longest entry.
    pub fn max_span_len(&self) -> usize {
        self.buckets.len().saturating_sub(1)
    }

    /// The largest rank in the table.
    pub fn max_rank(&self) -> Option<T> {
        self.decoder.keys().copied().max()
    }

    /// Exact-match lookup.
    ///
    /// ## Arguments
    /// * `span` - the byte sequence to look up.
    ///
    /// ## Returns
    /// The rank of `span`, if it is a vocabulary entry.
    #[inline]
    pub fn lookup(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.buckets.get(span.len())?.get(span).copied()
    }

    /// Sliced lookup used by the merge engine.
    ///
    /// Returns `None` when `end` runs past `piece`, or when the slice covers
    /// the whole of `piece`; the whole-piece case is only answered by a direct
    /// [`lookup`](Self::lookup), before merging starts.
    ///
    /// ## Arguments
    /// * `piece` - the fragment being merged.
    /// * `start` - slice start (inclusive).
    /// * `end` - slice end (exclusive).
    #[inline]
    pub fn lookup_slice(
        &self,
        piece: &[u8],
        start: usize,
        end: usize,
    ) -> Option<T> {
        if end > piece.len() || end - start == piece.len() {
            None
        } else {
            self.lookup(&piece[start..end])
        }
    }

    /// Decode a rank to its bytes.
    #[inline]
    pub fn decode_token(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.decoder.get(&token).map(Vec::as_slice)
    }

    /// Iterate over all ``(bytes, rank)`` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], T)> + '_ {
        self.decoder
            .iter()
            .map(|(&rank, span)| (span.as_slice(), rank))
    }

    /// Entries sorted by rank.
    pub fn sorted_pairs(&self) -> Vec<(Vec<u8>, T)> {
        let mut pairs: Vec<(Vec<u8>, T)> = self
            .iter()
            .map(|(span, rank)| (span.to_vec(), rank))
            .collect();
        pairs.sort_by_key(|&(_, rank)| rank);
        pairs
    }
}
