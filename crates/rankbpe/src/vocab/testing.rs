//! # Test Vocabularies
//!
//! Small rank tables for tests and benchmarks.
//!
//! [`train_test_ranks`] is a deliberately naive BPE trainer: every entry it
//! emits is reachable by lowest-rank-first merging, like a real vocabulary.

use std::collections::BTreeMap;

use crate::{
    types::TokenType,
    vocab::{RankTable, SpecialVocab},
};

/// Corpus used by [`test_rank_table`].
pub const TEST_CORPUS: &[&str] = &[
    "Hello, world! Hello world, hello there.",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "We've been waiting since 10:30am; they're late, aren't they?",
    "    indented code();\n\treturn 42;\n",
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
    "abababababababababababababab bababababab",
    "Ünïcödé wörds, 日本語のテキスト, and emoji 🚀🚀🚀.",
];

/// The 256 single-byte entries, ranked by byte value.
pub fn byte_rank_pairs<T: TokenType>() -> Vec<(Vec<u8>, T)> {
    (0..=255u8)
        .map(|b| (vec![b], T::from_u8(b).unwrap()))
        .collect()
}

/// Train a tiny BPE vocabulary.
///
/// Starts from [`byte_rank_pairs`], then learns up to `merges` merges over
/// the whitespace-separated words of `corpus`. Each step merges the most
/// frequent adjacent pair; ties go to the smallest pair.
///
/// ## Arguments
/// * `corpus` - training samples.
/// * `merges` - the maximum number of merges to learn.
///
/// ## Returns
/// ``(bytes, rank)`` pairs, ranks contiguous from 0.
pub fn train_test_ranks<T: TokenType>(
    corpus: &[&str],
    merges: usize,
) -> Vec<(Vec<u8>, T)> {
    let mut pairs = byte_rank_pairs::<T>();
    let mut known: BTreeMap<Vec<u8>, usize> = pairs
        .iter()
        .enumerate()
        .map(|(idx, (span, _))| (span.clone(), idx))
        .collect();

    let mut words: Vec<Vec<Vec<u8>>> = corpus
        .iter()
        .flat_map(|sample| sample.split_inclusive(' '))
        .map(|word| word.bytes().map(|b| vec![b]).collect())
        .collect();

    for _ in 0..merges {
        let mut counts: BTreeMap<(Vec<u8>, Vec<u8>), usize> = BTreeMap::new();
        for word in &words {
            for w in word.windows(2) {
                *counts.entry((w[0].clone(), w[1].clone())).or_default() += 1;
            }
        }

        let Some(((left, right), _)) = counts
            .into_iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        else {
            break;
        };

        let merged: Vec<u8> = [left.as_slice(), right.as_slice()].concat();
        if !known.contains_key(&merged) {
            known.insert(merged.clone(), pairs.len());
            pairs.push((merged.clone(), T::from_usize(pairs.len()).unwrap()));
        }

        for word in words.iter_mut() {
            let mut out: Vec<Vec<u8>> = Vec::with_capacity(word.len());
            let mut i = 0;
            while i < word.len() {
                if i + 1 < word.len() && word[i] == left && word[i + 1] == right {
                    out.push(merged.clone());
                    i += 2;
                } else {
                    out.push(word[i].clone());
                    i += 1;
                }
            }
            *word = out;
        }
    }

    pairs
}

/// A [`RankTable`] trained on [`TEST_CORPUS`].
pub fn test_rank_table<T: TokenType>() -> RankTable<T> {
    RankTable::from_pairs(train_test_ranks::<T>(TEST_CORPUS, 400)).unwrap()
}

/// The special literals used with [`test_rank_table`].
pub fn test_special_vocab<T: TokenType>() -> SpecialVocab<T> {
    SpecialVocab::from_pairs([
        ("<|endoftext|>", T::from_u32(100257).unwrap()),
        ("<|fim_prefix|>", T::from_u32(100258).unwrap()),
        ("<|endofprompt|>", T::from_u32(100276).unwrap()),
    ])
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_rank_pairs() {
        let pairs = byte_rank_pairs::<u32>();
        assert_eq!(pairs.len(), 256);
        assert_eq!(pairs[65], (b"A".to_vec(), 65));
    }

    #[test]
    fn test_trainer_is_deterministic() {
        let a = train_test_ranks::<u32>(TEST_CORPUS, 50);
        let b = train_test_ranks::<u32>(TEST_CORPUS, 50);
        assert_eq!(a, b);
        assert!(a.len() > 256);
    }

    #[test]
    fn test_trainer_learns_reachable_merges() {
        let pairs = train_test_ranks::<u32>(&["aaaa aaaa"], 10);
        let spans: Vec<&[u8]> = pairs[256..].iter().map(|(s, _)| s.as_slice()).collect();
        assert_eq!(spans[0], b"aa");
        assert_eq!(spans[1], b"aaaa");
    }

    #[test]
    fn test_test_rank_table() {
        let table = test_rank_table::<u32>();
        assert!(table.len() > 256);
        assert_eq!(table.lookup(b"a"), Some(97));
        assert!(table.lookup(b"aa").is_some());

        let specials = test_special_vocab::<u32>();
        specials.validate_disjoint(&table).unwrap();
    }
}
