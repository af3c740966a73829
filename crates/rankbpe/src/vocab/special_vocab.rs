//! # Special Token Vocabulary

use crate::{
    errors::{RBResult, RankBpeError},
    regex::{RegexWrapperPattern, exact_match_union_regex_pattern},
    types::{RBHashMap, TokenType},
    vocab::RankTable,
};

/// Every special token literal must contain this start marker.
pub const SPECIAL_START: &str = "<|";

/// Every special token literal must contain this end marker.
pub const SPECIAL_END: &str = "|>";

/// Immutable ``{ String <-> T }`` map of reserved delimiter tokens.
///
/// Validated at construction: every literal carries both
/// [`SPECIAL_START`] and [`SPECIAL_END`].
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SpecialVocab<T: TokenType> {
    /// Entries, sorted by token.
    entries: Vec<(String, T)>,

    /// ``{ T -> index into entries }``.
    decoder: RBHashMap<T, usize>,
}

impl<T: TokenType> SpecialVocab<T> {
    /// Build a special vocab from ``(literal, token)`` pairs.
    ///
    /// ## Arguments
    /// * `pairs` - the special literals and their reserved tokens.
    ///
    /// ## Returns
    /// The vocab; or an error if a literal lacks the markers,
    /// or a literal or token repeats.
    pub fn from_pairs<I, S>(pairs: I) -> RBResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, T)> = Vec::new();
        for (literal, token) in pairs {
            let literal = literal.as_ref();
            if !literal.contains(SPECIAL_START) || !literal.contains(SPECIAL_END) {
                return Err(RankBpeError::InvalidSpecialToken {
                    token: literal.to_string(),
                });
            }
            if entries.iter().any(|(l, _)| l == literal) {
                return Err(RankBpeError::VocabConflict(format!(
                    "special token {literal:?} is declared twice"
                )));
            }
            entries.push((literal.to_string(), token));
        }
        entries.sort_by_key(|&(_, token)| token);

        let mut decoder: RBHashMap<T, usize> = RBHashMap::default();
        for (idx, (literal, token)) in entries.iter().enumerate() {
            if decoder.insert(*token, idx).is_some() {
                return Err(RankBpeError::VocabConflict(format!(
                    "special token {literal:?} reuses token {token}"
                )));
            }
        }

        Ok(Self { entries, decoder })
    }

    /// Get the number of special tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocab is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over ``(literal, token)`` entries, sorted by token.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.entries
            .iter()
            .map(|(literal, token)| (literal.as_str(), *token))
    }

    /// The largest special token.
    pub fn max_token(&self) -> Option<T> {
        self.entries.last().map(|&(_, token)| token)
    }

    /// Return the token for a literal, if any.
    pub fn lookup_token(
        &self,
        literal: &str,
    ) -> Option<T> {
        self.entries
            .iter()
            .find_map(|(l, token)| (l == literal).then_some(*token))
    }

    /// Return the literal bytes for a reserved token, if any.
    ///
    /// Used as a fallback after the rank table misses.
    #[inline]
    pub fn decode_if_present(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.decoder
            .get(&token)
            .map(|&idx| self.entries[idx].0.as_bytes())
    }

    /// Find the first special literal occurring in `text`.
    ///
    /// Only searches when both markers are present somewhere in `text`.
    pub fn find_special_literal(
        &self,
        text: &str,
    ) -> Option<&str> {
        if !(text.contains(SPECIAL_START) && text.contains(SPECIAL_END)) {
            return None;
        }
        self.entries
            .iter()
            .map(|(literal, _)| literal.as_str())
            .find(|literal| text.contains(literal))
    }

    /// Guard for the strict encode path.
    ///
    /// ## Returns
    /// `Ok(())` if no special literal occurs in `text`;
    /// [`RankBpeError::SpecialTokenCollision`] otherwise.
    pub fn check_for_special_tokens(
        &self,
        text: &str,
    ) -> RBResult<()> {
        match self.find_special_literal(text) {
            Some(literal) => Err(RankBpeError::SpecialTokenCollision {
                token: literal.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Verify that no special token is also a rank in `table`.
    pub fn validate_disjoint(
        &self,
        table: &RankTable<T>,
    ) -> RBResult<()> {
        for (literal, token) in self.iter() {
            if let Some(span) = table.decode_token(token) {
                return Err(RankBpeError::VocabConflict(format!(
                    "special token {literal:?} reuses rank {token} of {span:?}"
                )));
            }
        }
        Ok(())
    }

    /// Get the exact-match pattern for the special literals.
    ///
    /// Longer literals are listed first.
    ///
    /// ## Returns
    /// `None` if no special tokens are present.
    pub fn special_pattern(&self) -> Option<RegexWrapperPattern> {
        if self.is_empty() {
            return None;
        }
        let mut literals: Vec<&str> = self.iter().map(|(literal, _)| literal).collect();
        literals.sort_by_key(|literal| core::cmp::Reverse(literal.len()));
        Some(exact_match_union_regex_pattern(&literals))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cl100k_like() -> SpecialVocab<u32> {
        SpecialVocab::from_pairs([
            ("<|endoftext|>", 100257),
            ("<|fim_prefix|>", 100258),
            ("<|endofprompt|>", 100276),
        ])
        .unwrap()
    }

    #[test]
    fn test_special_vocab() {
        let vocab = cl100k_like();
        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.max_token(), Some(100276));
        assert_eq!(vocab.lookup_token("<|fim_prefix|>"), Some(100258));
        assert_eq!(vocab.lookup_token("<|nope|>"), None);

        assert_eq!(
            vocab.decode_if_present(100257),
            Some("<|endoftext|>".as_bytes())
        );
        assert_eq!(vocab.decode_if_present(42), None);

        let empty: SpecialVocab<u32> = SpecialVocab::default();
        assert!(empty.is_empty());
        assert!(empty.special_pattern().is_none());
    }

    #[test]
    fn test_markers_required() {
        let err = SpecialVocab::<u32>::from_pairs([("<|endoftext", 1)]).unwrap_err();
        assert!(matches!(err, RankBpeError::InvalidSpecialToken { .. }));

        let err = SpecialVocab::<u32>::from_pairs([("endoftext|>", 1)]).unwrap_err();
        assert!(matches!(err, RankBpeError::InvalidSpecialToken { .. }));

        // Markers need not wrap the literal.
        assert!(SpecialVocab::<u32>::from_pairs([("x|>y<|z", 1)]).is_ok());
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = SpecialVocab::<u32>::from_pairs([("<|a|>", 1), ("<|a|>", 2)]).unwrap_err();
        assert!(matches!(err, RankBpeError::VocabConflict(_)));

        let err = SpecialVocab::<u32>::from_pairs([("<|a|>", 1), ("<|b|>", 1)]).unwrap_err();
        assert!(matches!(err, RankBpeError::VocabConflict(_)));
    }

    #[test]
    fn test_check_for_special_tokens() {
        let vocab = cl100k_like();

        assert!(vocab.check_for_special_tokens("hello world").is_ok());
        assert!(vocab.check_for_special_tokens("a <| b |> c").is_ok());
        assert!(vocab.check_for_special_tokens("<|endoftext").is_ok());

        let err = vocab
            .check_for_special_tokens("before <|endoftext|> after")
            .unwrap_err();
        assert!(matches!(
            err,
            RankBpeError::SpecialTokenCollision { token } if token == "<|endoftext|>"
        ));
    }

    #[test]
    fn test_validate_disjoint() {
        let vocab = cl100k_like();
        let table = RankTable::from_pairs([(b"a".to_vec(), 0u32)]).unwrap();
        assert!(vocab.validate_disjoint(&table).is_ok());

        let table = RankTable::from_pairs([(b"a".to_vec(), 100257u32)]).unwrap();
        assert!(matches!(
            vocab.validate_disjoint(&table),
            Err(RankBpeError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_special_pattern() {
        let vocab =
            SpecialVocab::<u32>::from_pairs([("<|end|>", 1), ("<|endoftext|>", 2)]).unwrap();
        let pattern = vocab.special_pattern().unwrap();
        assert_eq!(pattern.as_str(), r"(<\|endoftext\|>|<\|end\|>)");
    }

    proptest! {
        #[test]
        fn guard_is_idempotent(text in "(\\PC|<\\||\\|>|<\\|endoftext\\|>){0,40}") {
            let vocab = cl100k_like();
            let first = vocab.check_for_special_tokens(&text).is_ok();
            let second = vocab.check_for_special_tokens(&text).is_ok();
            prop_assert_eq!(first, second);
            prop_assert_eq!(first, !text.contains("<|endoftext|>")
                && !text.contains("<|fim_prefix|>")
                && !text.contains("<|endofprompt|>"));
        }
    }
}
