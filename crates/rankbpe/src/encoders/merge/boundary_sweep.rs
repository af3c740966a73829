//! # Boundary Sweep Merge
//!
//! The short-fragment merge strategy.
//!
//! Keeps one rank per byte boundary, ``ranks[i] = rank(piece starting at i ++ next piece)``,
//! and rescans the whole array for the leftmost minimum after every merge.
//! Quadratic in the worst case, but with no allocation beyond the rank array.

use crate::{
    errors::{RBResult, invariant_violation},
    types::TokenType,
    vocab::{RankTable, absorbed_rank, no_match_rank},
};

/// Index of the leftmost minimal mergeable rank.
#[inline]
fn min_rank_index<T: TokenType>(ranks: &[T]) -> Option<usize> {
    let no_match = no_match_rank::<T>();
    ranks
        .iter()
        .enumerate()
        .filter(|&(_, &rank)| rank < no_match)
        .min_by_key(|&(_, &rank)| rank)
        .map(|(idx, _)| idx)
}

/// First live boundary at or after `from`; ``ranks.len()`` if none.
#[inline]
fn next_live<T: TokenType>(
    ranks: &[T],
    from: usize,
) -> usize {
    let absorbed = absorbed_rank::<T>();
    let mut idx = from.min(ranks.len());
    while idx < ranks.len() && ranks[idx] == absorbed {
        idx += 1;
    }
    idx
}

/// Last live boundary before `idx`.
#[inline]
fn prev_live<T: TokenType>(
    ranks: &[T],
    idx: usize,
) -> Option<usize> {
    let absorbed = absorbed_rank::<T>();
    (0..idx).rev().find(|&j| ranks[j] != absorbed)
}

/// Merge `piece` by rescanning boundary ranks.
///
/// ## Arguments
/// * `table` - the rank table.
/// * `piece` - the fragment bytes; at least 2 bytes, and not itself an entry.
/// * `max_tokens` - stop emitting once `tokens` holds this many ids.
/// * `tokens` - the output buffer; `None` to only count.
///
/// ## Returns
/// The number of pieces the fragment merged to,
/// regardless of how many were emitted.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(table, piece, tokens)))]
pub fn merge_boundary_sweep<T: TokenType>(
    table: &RankTable<T>,
    piece: &[u8],
    max_tokens: usize,
    tokens: Option<&mut Vec<T>>,
) -> RBResult<usize> {
    let len = piece.len();
    if len < 2 {
        return Err(invariant_violation(format!(
            "merge called on a {len} byte fragment"
        )));
    }

    let no_match = no_match_rank::<T>();
    let absorbed = absorbed_rank::<T>();
    let rank_of = |start: usize, end: usize| {
        table
            .lookup_slice(piece, start, end)
            .unwrap_or(no_match)
    };

    let mut ranks: Vec<T> = (0..=len).map(|i| rank_of(i, i + 2)).collect();
    let mut pieces = len;

    let mut min_index = min_rank_index(&ranks);
    while let Some(idx) = min_index {
        let next = next_live(&ranks, idx + 1);
        if next >= len {
            return Err(invariant_violation(format!(
                "mergeable boundary {idx} has no right neighbor"
            )));
        }
        let next_next = next_live(&ranks, next + 1);
        let next_next_next = next_live(&ranks, next_next + 1);

        if let Some(prev) = prev_live(&ranks, idx) {
            ranks[prev] = rank_of(prev, next_next);
        }
        ranks[idx] = rank_of(idx, next_next_next);
        ranks[next] = absorbed;

        pieces -= 1;
        if pieces < 3 {
            break;
        }
        min_index = min_rank_index(&ranks);
    }

    if let Some(tokens) = tokens {
        let mut start = 0;
        for end in 1..ranks.len() {
            if tokens.len() >= max_tokens {
                break;
            }
            if ranks[end] == absorbed {
                continue;
            }
            match table.lookup_slice(piece, start, end) {
                Some(token) => {
                    tokens.push(token);
                    start = end;
                }
                None => {
                    return Err(invariant_violation(format!(
                        "surviving piece {:?} is not in the rank table",
                        &piece[start..end]
                    )));
                }
            }
        }
    }

    Ok(pieces)
}
