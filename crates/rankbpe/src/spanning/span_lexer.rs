//! # Span Lexer Trait

use core::ops::{Deref, Range};

use crate::errors::RBResult;

/// Span Label/Range Reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A normal word reference.
    Word(Range<usize>),

    /// A special word reference.
    Special(Range<usize>),

    /// A gap reference; text no pattern alternative matched.
    Gap(Range<usize>),
}

impl SpanRef {
    /// The byte range of the span.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SpanRef::Word(range) => range,
            SpanRef::Special(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) => range,
            SpanRef::Special(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

pub(crate) fn offset_range(
    range: Range<usize>,
    offset: usize,
) -> Range<usize> {
    (range.start + offset)..(range.end + offset)
}

/// Word-scanning plugin trait.
///
/// The default [`for_each_word`](Self::for_each_word) loops over
/// [`next_span`](Self::next_span) matches, emitting `Word` and `Gap` spans.
/// Hand-coded splitters override `for_each_word` directly and leave
/// `next_span` at its default.
///
/// Smart pointer types (`Arc<T>`, `Box<T>`) implement `SpanLexer` through a
/// blanket `Deref` implementation.
pub trait SpanLexer: Send + Sync {
    /// Find the next match in `text` at or after `offset`.
    ///
    /// ## Returns
    /// `(start, end)` byte positions relative to `text`, or `None`.
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> RBResult<Option<(usize, usize)>> {
        let _ = (text, offset);
        Ok(None)
    }

    /// Scan `text` into [`Word`](SpanRef::Word) and [`Gap`](SpanRef::Gap) spans.
    ///
    /// The spans partition `text`, in order.
    ///
    /// ## Arguments
    /// * `text` - the text segment to scan (no special tokens).
    /// * `offset` - byte offset to add to emitted span ranges.
    /// * `f` - callback; return `false` to halt early.
    ///
    /// ## Returns
    /// `(completed, consumed)` where `consumed` is the byte count of
    /// accepted spans and `completed` indicates all spans were accepted.
    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        let mut last = 0;
        let mut pos = 0;
        while let Some((start, end)) = self.next_span(text, pos)? {
            if start == end {
                // Empty matches carry no text.
                match text[end..].chars().next() {
                    Some(ch) => {
                        pos = end + ch.len_utf8();
                        continue;
                    }
                    None => break,
                }
            }

            if last < start {
                if !f(SpanRef::Gap(offset_range(last..start, offset))) {
                    return Ok((false, last));
                }
                last = start;
            }

            if !f(SpanRef::Word(offset_range(start..end, offset))) {
                return Ok((false, last));
            }
            last = end;
            pos = end;
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

impl<D> SpanLexer for D
where
    D: Deref + Send + Sync,
    D::Target: SpanLexer,
{
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> RBResult<Option<(usize, usize)>> {
        self.deref().next_span(text, offset)
    }

    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        self.deref().for_each_word(text, offset, f)
    }
}
