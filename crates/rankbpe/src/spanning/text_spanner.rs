//! # Text Spanner

use std::sync::Arc;

use crate::{
    errors::RBResult,
    spanning::{RegexLexer, SpanLexer, SpanRef, SpannerPattern, span_lexer::offset_range},
    types::TokenType,
    vocab::SpecialVocab,
};

/// A word [`SpanLexer`] plus an optional special-token scanner.
///
/// The special scanner splits the input into segments around special
/// literals; the word lexer segments the text between them.
#[derive(Clone)]
pub struct TextSpanner {
    word_lexer: Arc<dyn SpanLexer>,
    special_lexer: Option<Arc<dyn SpanLexer>>,
}

impl core::fmt::Debug for TextSpanner {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("TextSpanner")
            .field("specials", &self.special_lexer.is_some())
            .finish_non_exhaustive()
    }
}

impl TextSpanner {
    /// Build a new [`TextSpanner`].
    ///
    /// ## Arguments
    /// * `word_lexer` - The lexer for word splitting.
    /// * `special_lexer` - The optional lexer for special word matching.
    pub fn new(
        word_lexer: Arc<dyn SpanLexer>,
        special_lexer: Option<Arc<dyn SpanLexer>>,
    ) -> Self {
        Self {
            word_lexer,
            special_lexer,
        }
    }

    /// Build a [`TextSpanner`] for a pattern and its special tokens.
    ///
    /// ## Arguments
    /// * `pattern` - the word splitter selection.
    /// * `specials` - the special tokens to scan for.
    pub fn from_pattern<T: TokenType>(
        pattern: &SpannerPattern,
        specials: &SpecialVocab<T>,
    ) -> RBResult<Self> {
        let word_lexer = pattern.build_lexer()?;
        let special_lexer: Option<Arc<dyn SpanLexer>> = match specials.special_pattern() {
            Some(pattern) => Some(Arc::new(RegexLexer::from_pattern(pattern)?)),
            None => None,
        };
        Ok(Self::new(word_lexer, special_lexer))
    }

    /// Get the word lexer.
    pub fn word_lexer(&self) -> &Arc<dyn SpanLexer> {
        &self.word_lexer
    }

    /// Iterate over the word spans of `text`, treating special literals as text.
    ///
    /// ## Returns
    /// `(completed, consumed)`; see [`SpanLexer::for_each_word`].
    pub fn for_each_word(
        &self,
        text: &str,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        self.word_lexer.for_each_word(text, 0, f)
    }

    /// Iterate over all split [`SpanRef`]s in the text.
    ///
    /// Special literals are reported as [`SpanRef::Special`].
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `f` - the function to apply to each span;
    ///   halts when the function returns `false`.
    ///
    /// ## Returns
    /// ``(completed, consumed)`` where:
    /// - `consumed` is the number of bytes covered by spans accepted by `f`;
    /// - `completed` is if all spans were accepted.
    pub fn for_each_split_span(
        &self,
        text: &str,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        let Some(special_lexer) = &self.special_lexer else {
            return self.for_each_word(text, f);
        };

        let mut current = text;
        let mut offset = 0;

        while let Some((start, end)) = special_lexer.next_span(current, 0)? {
            let pre = &current[..start];

            let (cont, used) = self.word_lexer.for_each_word(pre, offset, f)?;
            if !cont {
                return Ok((false, offset + used));
            }

            if !f(SpanRef::Special(offset_range(start..end, offset))) {
                return Ok((false, offset + start));
            }

            current = &current[end..];
            offset += end;
        }

        let (cont, used) = self.word_lexer.for_each_word(current, offset, f)?;
        Ok((cont, offset + used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanner() -> TextSpanner {
        let specials =
            SpecialVocab::<u32>::from_pairs([("<|endoftext|>", 100), ("<|end|>", 101)]).unwrap();
        TextSpanner::from_pattern(&SpannerPattern::Cl100k, &specials).unwrap()
    }

    fn collect(
        text: &str,
        with_specials: bool,
    ) -> Vec<SpanRef> {
        let spanner = spanner();
        let mut out = Vec::new();
        let mut f = |span: SpanRef| {
            out.push(span);
            true
        };
        let result = if with_specials {
            spanner.for_each_split_span(text, &mut f)
        } else {
            spanner.for_each_word(text, &mut f)
        };
        let (completed, consumed) = result.unwrap();
        assert!(completed);
        assert_eq!(consumed, text.len());
        out
    }

    #[test]
    fn test_split_specials() {
        let text = "hi<|endoftext|> there<|end|>";
        assert_eq!(
            collect(text, true),
            vec![
                SpanRef::Word(0..2),
                SpanRef::Special(2..15),
                SpanRef::Word(15..21),
                SpanRef::Special(21..28),
            ]
        );
    }

    #[test]
    fn test_specials_as_text() {
        let text = "hi<|end|>";
        let spans = collect(text, false);
        assert!(spans.iter().all(|s| matches!(s, SpanRef::Word(_))));
        assert_eq!(spans.last(), Some(&SpanRef::Word(7..9)));
    }

    #[test]
    fn test_early_stop_consumed() {
        let spanner = spanner();
        let mut seen = 0;
        let (completed, consumed) = spanner
            .for_each_split_span("ab<|end|>cd", &mut |_| {
                seen += 1;
                seen < 2
            })
            .unwrap();
        assert!(!completed);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_no_specials() {
        let spanner =
            TextSpanner::from_pattern(&SpannerPattern::Cl100k, &SpecialVocab::<u32>::default())
                .unwrap();
        let mut spans = Vec::new();
        spanner
            .for_each_split_span("a<|end|>", &mut |s| {
                spans.push(s);
                true
            })
            .unwrap();
        assert!(spans.iter().all(|s| matches!(s, SpanRef::Word(_))));
    }
}
