//! # Rank Level Merge
//!
//! The long-fragment merge strategy.
//!
//! Pieces are nodes of an index-linked list over an arena (one slot per byte
//! boundary). Live mergeable boundaries are grouped into rank levels,
//! ``{ rank -> { boundary } }``; the lowest level is swept leftmost first.
//! The merge order is the same as [`merge_boundary_sweep`](super::merge_boundary_sweep),
//! so both strategies produce identical tokens.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    errors::{RBResult, invariant_violation},
    types::TokenType,
    vocab::{RankTable, absorbed_rank, no_match_rank},
};

#[derive(Debug, Clone, Copy)]
struct Node<T> {
    rank: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// The rank level index, plus the level currently being swept.
///
/// Boundaries ranked at the swept `level` live in `members`, never in `levels`.
struct LevelIndex<T: TokenType> {
    levels: BTreeMap<T, BTreeSet<usize>>,
    level: T,
    members: BTreeSet<usize>,
}

impl<T: TokenType> LevelIndex<T> {
    fn detach(
        &mut self,
        idx: usize,
        rank: T,
    ) {
        if rank == self.level {
            self.members.remove(&idx);
        } else if rank < no_match_rank::<T>()
            && let Some(set) = self.levels.get_mut(&rank)
        {
            set.remove(&idx);
            if set.is_empty() {
                self.levels.remove(&rank);
            }
        }
    }

    fn attach(
        &mut self,
        idx: usize,
        rank: T,
    ) {
        if rank == self.level {
            self.members.insert(idx);
        } else if rank < no_match_rank::<T>() {
            self.levels.entry(rank).or_default().insert(idx);
        }
    }

    /// Start sweeping the lowest level.
    fn next_level(&mut self) -> bool {
        match self.levels.pop_first() {
            Some((level, members)) => {
                self.level = level;
                self.members = members;
                true
            }
            None => false,
        }
    }

    /// Return the unswept members to the index.
    fn suspend(&mut self) {
        let members = std::mem::take(&mut self.members);
        if !members.is_empty() {
            self.levels.insert(self.level, members);
        }
        self.level = absorbed_rank::<T>();
    }
}

/// Merge `piece` by sweeping rank levels.
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
pub fn merge_rank_levels<T: TokenType>(
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
    let rank_of = |start: usize, end: usize| {
        table
            .lookup_slice(piece, start, end)
            .unwrap_or(no_match)
    };

    let mut nodes: Vec<Node<T>> = (0..=len)
        .map(|i| Node {
            rank: rank_of(i, i + 2),
            prev: i.checked_sub(1),
            next: (i < len).then_some(i + 1),
        })
        .collect();

    let mut index = LevelIndex {
        levels: BTreeMap::new(),
        level: absorbed_rank::<T>(),
        members: BTreeSet::new(),
    };
    for (idx, node) in nodes.iter().enumerate() {
        index.attach(idx, node.rank);
    }

    let mut pieces = len;

    'levels: while pieces >= 3 && index.next_level() {
        while let Some(idx) = index.members.pop_first() {
            let node = nodes[idx];
            if node.rank != index.level {
                return Err(invariant_violation(format!(
                    "boundary {idx} swept at rank {} but holds {}",
                    index.level, node.rank
                )));
            }

            let next = node.next.ok_or_else(|| {
                invariant_violation(format!("mergeable boundary {idx} has no right neighbor"))
            })?;
            let next_next = nodes[next].next.ok_or_else(|| {
                invariant_violation(format!("mergeable boundary {idx} has no second neighbor"))
            })?;
            let next_next_next = nodes[next_next].next.unwrap_or(len + 1);

            let mut lowered = false;
            let mut reassign = |nodes: &mut Vec<Node<T>>, target: usize, rank: T| {
                index.detach(target, nodes[target].rank);
                nodes[target].rank = rank;
                index.attach(target, rank);
                lowered |= rank < index.level;
            };

            if let Some(prev) = node.prev {
                reassign(&mut nodes, prev, rank_of(prev, next_next));
            }
            reassign(&mut nodes, idx, rank_of(idx, next_next_next));

            index.detach(next, nodes[next].rank);
            nodes[next].rank = absorbed_rank::<T>();
            nodes[idx].next = Some(next_next);
            nodes[next_next].prev = Some(idx);

            pieces -= 1;
            if pieces < 3 {
                break 'levels;
            }
            if lowered {
                index.suspend();
                continue 'levels;
            }
        }
    }

    if let Some(tokens) = tokens {
        let mut start = 0;
        while let Some(end) = nodes[start].next {
            if tokens.len() >= max_tokens {
                break;
            }
            match table.lookup_slice(piece, start, end) {
                Some(token) => tokens.push(token),
                None => {
                    return Err(invariant_violation(format!(
                        "surviving piece {:?} is not in the rank table",
                        &piece[start..end]
                    )));
                }
            }
            start = end;
        }
    }

    Ok(pieces)
}
