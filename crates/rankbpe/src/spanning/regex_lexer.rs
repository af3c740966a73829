//! # Regex Span Lexer

use crate::{
    errors::RBResult,
    regex::{RegexWrapper, RegexWrapperPattern},
    spanning::{SpanLexer, SpanRef, span_lexer::offset_range},
};

/// [`SpanLexer`] over a compiled split pattern.
///
/// Text the pattern does not match is reported as [`SpanRef::Gap`] spans,
/// so the spans always partition the input.
#[derive(Debug, Clone)]
pub struct RegexLexer {
    regex: RegexWrapper,
}

impl From<RegexWrapper> for RegexLexer {
    fn from(regex: RegexWrapper) -> Self {
        Self { regex }
    }
}

impl RegexLexer {
    /// Compile a lexer from a pattern.
    ///
    /// ## Returns
    /// The lexer; or [`RankBpeError::Regex`](crate::RankBpeError::Regex)
    /// if the pattern does not compile.
    pub fn from_pattern<P>(pattern: P) -> RBResult<Self>
    where
        P: Into<RegexWrapperPattern>,
    {
        Ok(pattern.into().compile()?.into())
    }

    /// Get the underlying regex.
    pub fn regex(&self) -> &RegexWrapper {
        &self.regex
    }
}

impl SpanLexer for RegexLexer {
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> RBResult<Option<(usize, usize)>> {
        Ok(self.regex.find_at(text, offset)?.map(|m| (m.start, m.end)))
    }

    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            let range = m?;
            if range.is_empty() {
                continue;
            }
            let (start, end) = (range.start, range.end);

            if last < start {
                if !f(SpanRef::Gap(offset_range(last..start, offset))) {
                    return Ok((false, last));
                }
                last = start;
            }

            if !f(SpanRef::Word(offset_range(range, offset))) {
                return Ok((false, last));
            }
            last = end;
        }

        if last < text.len() {
            if !f(SpanRef::Gap(offset_range(last..text.len(), offset))) {
                return Ok((false, last));
            }
            last = text.len();
        }

        Ok((true, last))
    }
}
