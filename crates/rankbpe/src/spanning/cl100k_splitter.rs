//! # Hand-Coded `cl100k` Splitter
//!
//! Replicates the `cl100k_base` split pattern with a single forward scan:
//!
//! ```text
//! '(?i:[sdmt]|ll|ve|re)
//! | [^\r\n\p{L}\p{N}]?+\p{L}+
//! | \p{N}{1,3}
//! | ' '?[^\s\p{L}\p{N}]++[\r\n]*
//! | \s*[\r\n]
//! | \s+(?!\S)
//! | \s+
//! ```
//!
//! No backtracking is needed; each fragment is decided from at most two
//! chars of lookahead, except whitespace runs, which remember their last
//! line break.

use core::ops::Range;

use crate::{
    errors::{RBResult, RankBpeError, invariant_violation},
    spanning::{
        SpanLexer,
        SpanRef,
        char_classes::{
            is_letter,
            is_long_contraction,
            is_newline,
            is_not_newline_or_letter_or_numeric,
            is_not_whitespace_or_letter_or_numeric,
            is_numeric,
            is_short_contraction,
            is_whitespace,
        },
        span_lexer::offset_range,
    },
};

#[inline]
fn char_at(
    text: &str,
    pos: usize,
) -> Option<char> {
    text[pos..].chars().next()
}

#[inline]
fn scan_while(
    text: &str,
    mut pos: usize,
    pred: fn(char) -> bool,
) -> usize {
    for ch in text[pos..].chars() {
        if !pred(ch) {
            break;
        }
        pos += ch.len_utf8();
    }
    pos
}

/// Hand-coded fragment splitter for `cl100k_base`.
///
/// Fragments partition the input exactly, in order, and are never empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cl100kSplitter;

impl Cl100kSplitter {
    /// Split `text` into fragments.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `sink` - receives each fragment; return `false` to stop.
    ///
    /// ## Returns
    /// `true` if every fragment was accepted by `sink`.
    pub fn split<'a, F>(
        &self,
        text: &'a str,
        mut sink: F,
    ) -> RBResult<bool>
    where
        F: FnMut(&'a str) -> bool,
    {
        self.split_ranges(text, &mut |range| sink(&text[range]))
    }

    /// Split UTF-8 `bytes` into fragments.
    ///
    /// ## Returns
    /// [`RankBpeError::InvalidUtf8`] before any fragment is produced, if
    /// `bytes` is malformed; otherwise as [`split`](Self::split).
    pub fn split_bytes<'a, F>(
        &self,
        bytes: &'a [u8],
        sink: F,
    ) -> RBResult<bool>
    where
        F: FnMut(&'a str) -> bool,
    {
        let text = core::str::from_utf8(bytes).map_err(|_| RankBpeError::InvalidUtf8)?;
        self.split(text, sink)
    }

    /// Split `text` into fragment byte ranges.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `sink` - receives each fragment range; return `false` to stop.
    ///
    /// ## Returns
    /// `true` if every fragment was accepted by `sink`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, sink)))]
    pub fn split_ranges(
        &self,
        text: &str,
        sink: &mut dyn FnMut(Range<usize>) -> bool,
    ) -> RBResult<bool> {
        let len = text.len();
        let mut end = 0;

        while end < len {
            let mut start = end;
            let Some(c0) = char_at(text, start) else {
                break;
            };
            let next = start + c0.len_utf8();
            let c1 = if next < len { char_at(text, next) } else { None };

            if c0 == '\'' {
                if let Some(c1) = c1 {
                    let after = next + c1.len_utf8();
                    if is_short_contraction(c1) {
                        end = after;
                        if !sink(start..end) {
                            return Ok(false);
                        }
                        continue;
                    }
                    if let Some(c2) = char_at(text, after)
                        && is_long_contraction(c1, c2)
                    {
                        end = after + c2.len_utf8();
                        if !sink(start..end) {
                            return Ok(false);
                        }
                        continue;
                    }
                }
            }

            let c1_is = |pred: fn(char) -> bool| c1.is_some_and(pred);

            if (is_not_newline_or_letter_or_numeric(c0) && c1_is(is_letter)) || is_letter(c0) {
                end = next;
                if let Some(c1) = c1.filter(|&c| is_letter(c)) {
                    end = scan_while(text, end + c1.len_utf8(), is_letter);
                }
            } else if is_numeric(c0) {
                end = next;
                if let Some(c1) = c1.filter(|&c| is_numeric(c)) {
                    end += c1.len_utf8();
                    if let Some(c2) = char_at(text, end).filter(|&c| is_numeric(c)) {
                        end += c2.len_utf8();
                    }
                }
            } else if is_not_whitespace_or_letter_or_numeric(c0)
                || (c0 == ' ' && c1_is(is_not_whitespace_or_letter_or_numeric))
            {
                end = next;
                if let Some(c1) = c1.filter(|&c| is_not_whitespace_or_letter_or_numeric(c)) {
                    end = scan_while(
                        text,
                        end + c1.len_utf8(),
                        is_not_whitespace_or_letter_or_numeric,
                    );
                }
                end = scan_while(text, end, is_newline);
            } else {
                if !is_whitespace(c0) {
                    return Err(invariant_violation(format!(
                        "unclassified char {c0:?} at byte {start}"
                    )));
                }

                // The char that ended the run; a non-whitespace char here
                // means the run was followed by a word.
                let mut last = c0;
                let mut last_newline = is_newline(c0).then_some(start);

                end = next;
                if let Some(c1) = c1.filter(|&c| is_whitespace(c)) {
                    if is_newline(c1) {
                        last_newline = Some(end);
                    }
                    end += c1.len_utf8();
                    while let Some(ch) = char_at(text, end) {
                        last = ch;
                        if !is_whitespace(ch) {
                            break;
                        }
                        if is_newline(ch) {
                            last_newline = Some(end);
                        }
                        end += ch.len_utf8();
                    }
                }

                if let Some(newline) = last_newline {
                    let run_end = end;
                    end = newline + 1;
                    if end < run_end {
                        if !sink(start..end) {
                            return Ok(false);
                        }
                        start = end;
                        end = run_end;
                    }
                }

                if last_newline.map_or(0, |nl| nl + 1) < end && !is_whitespace(last) {
                    // Leave the final space to prefix the following word.
                    end -= text[..end].chars().next_back().map_or(0, char::len_utf8);
                }
                if start < end && !sink(start..end) {
                    return Ok(false);
                }
                continue;
            }

            if !sink(start..end) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl SpanLexer for Cl100kSplitter {
    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> RBResult<(bool, usize)> {
        let mut consumed = 0;
        let completed = self.split_ranges(text, &mut |range| {
            let end = range.end;
            if f(SpanRef::Word(offset_range(range, offset))) {
                consumed = end;
                true
            } else {
                false
            }
        })?;
        Ok((completed, consumed))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{pretrained::openai::OA_CL100K_BASE_PATTERN, spanning::RegexLexer};

    fn fragments(text: &str) -> Vec<&str> {
        let mut out = Vec::new();
        assert!(
            Cl100kSplitter
                .split(text, |frag| {
                    out.push(frag);
                    true
                })
                .unwrap()
        );
        out
    }

    fn oracle(text: &str) -> Vec<&str> {
        let lexer = RegexLexer::from_pattern(OA_CL100K_BASE_PATTERN).unwrap();
        let mut out = Vec::new();
        lexer
            .for_each_word(text, 0, &mut |span| {
                out.push(&text[Range::from(span)]);
                true
            })
            .unwrap();
        out
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(fragments("Hello, world!"), vec!["Hello", ",", " world", "!"]);
        assert!(fragments("").is_empty());
    }

    #[test]
    fn test_contractions() {
        assert_eq!(fragments("I'll"), vec!["I", "'ll"]);
        assert_eq!(fragments("he's"), vec!["he", "'s"]);
        assert_eq!(fragments("WE'VE"), vec!["WE", "'VE"]);
        assert_eq!(fragments("they'Re"), vec!["they", "'Re"]);
        assert_eq!(fragments("x'ſ"), vec!["x", "'ſ"]);
        assert_eq!(fragments("'x"), vec!["'x"]);
        assert_eq!(fragments("'"), vec!["'"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(fragments("1234567"), vec!["123", "456", "7"]);
        assert_eq!(fragments("3½"), vec!["3½"]);
        assert_eq!(fragments("a1"), vec!["a", "1"]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(fragments("a ...b"), vec!["a", " ...", "b"]);
        assert_eq!(fragments("!!\n\nx"), vec!["!!\n\n", "x"]);
        assert_eq!(fragments("$a"), vec!["$a"]);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(fragments("a   b"), vec!["a", "  ", " b"]);
        assert_eq!(fragments("a   1"), vec!["a", "  ", " ", "1"]);
        assert_eq!(fragments("a  "), vec!["a", "  "]);
        assert_eq!(fragments("\n  x"), vec!["\n", " ", " x"]);
        assert_eq!(fragments("\n x"), vec!["\n", " x"]);
        assert_eq!(fragments("a \n\n  b"), vec!["a", " \n\n", " ", " b"]);
        assert_eq!(fragments(" \n  "), vec![" \n", "  "]);
        assert_eq!(fragments("\tx"), vec!["\tx"]);
        assert_eq!(fragments("\u{3000}\u{3000}日本"), vec!["\u{3000}", "\u{3000}日本"]);
    }

    #[test]
    fn test_early_stop() {
        let mut seen = Vec::new();
        let completed = Cl100kSplitter
            .split("one two three", |frag| {
                seen.push(frag.to_string());
                seen.len() < 2
            })
            .unwrap();
        assert!(!completed);
        assert_eq!(seen, vec!["one", " two"]);
    }

    #[test]
    fn test_fragments_borrow_input() {
        let bytes = "caf\u{e9} 42!".as_bytes();
        let mut kept: Vec<&str> = Vec::new();
        assert!(
            Cl100kSplitter
                .split_bytes(bytes, |frag| {
                    kept.push(frag);
                    true
                })
                .unwrap()
        );
        assert_eq!(kept, vec!["caf\u{e9}", " ", "42", "!"]);
        assert!(
            kept.iter()
                .all(|f| bytes.as_ptr_range().contains(&f.as_ptr()))
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut called = false;
        let err = Cl100kSplitter
            .split_bytes(b"ok \xff", |_| {
                called = true;
                true
            })
            .unwrap_err();
        assert!(matches!(err, RankBpeError::InvalidUtf8));
        assert!(!called);
    }

    #[test]
    fn test_span_lexer_consumed() {
        let text = "ab cd ef";
        let mut count = 0;
        let (completed, consumed) = Cl100kSplitter
            .for_each_word(text, 10, &mut |span| {
                count += 1;
                assert!(matches!(span, SpanRef::Word(_)));
                count < 3
            })
            .unwrap();
        assert!(!completed);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_matches_regex_on_samples() {
        for text in [
            "Hello, world!",
            "It's 2024; we've   got\r\n\r\n  1234 things\t\tto do.\n",
            "  leading and trailing  ",
            "x'LL 'Ve 'rE ...\n\n\n!",
        ] {
            assert_eq!(fragments(text), oracle(text), "{text:?}");
        }
    }

    proptest! {
        #[test]
        fn fragments_partition_text(text in "\\PC{0,200}") {
            let frags = fragments(&text);
            prop_assert!(frags.iter().all(|f| !f.is_empty()));
            prop_assert_eq!(frags.concat(), text);
        }

        #[test]
        fn fragments_match_regex(
            text in "[aZé日ª²½٣0 \n\r\t\u{0B}\u{0C}\u{85}\u{A0}\u{3000}\u{2028}'sSlLvVeErR!,.$_\u{0301}\u{200B}ſ\u{1FBF9}\u{20000}\u{E0041}]{0,30}"
        ) {
            prop_assert_eq!(fragments(&text), oracle(&text));
        }
    }
}
