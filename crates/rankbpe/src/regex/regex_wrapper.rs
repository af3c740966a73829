//! # Regex Wrapper
//!
//! One compiled-regex type over both engines.

use core::ops::Range;

use crate::errors::{RBResult, RankBpeError};

fn regex_error<E: core::fmt::Display>(err: E) -> RankBpeError {
    RankBpeError::Regex(err.to_string())
}

/// A split pattern fixed at compile time, tagged with its engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConstRegexWrapperPattern {
    /// Compiled with `regex`.
    Basic(&'static str),

    /// Compiled with `fancy_regex`.
    Fancy(&'static str),
}

impl ConstRegexWrapperPattern {
    /// The pattern source.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Basic(pattern) | Self::Fancy(pattern) => pattern,
        }
    }

    /// Compile with the tagged engine.
    pub fn compile(&self) -> RBResult<RegexWrapper> {
        RegexWrapperPattern::from(*self).compile()
    }
}

impl From<ConstRegexWrapperPattern> for RegexWrapperPattern {
    fn from(pattern: ConstRegexWrapperPattern) -> Self {
        match pattern {
            ConstRegexWrapperPattern::Basic(p) => Self::Basic(p.to_string()),
            ConstRegexWrapperPattern::Fancy(p) => Self::Fancy(p.to_string()),
        }
    }
}

/// An owned pattern, tagged with its engine.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegexWrapperPattern {
    /// Compiled with `regex`.
    Basic(String),

    /// Compiled with `fancy_regex`.
    Fancy(String),

    /// `regex` when the pattern allows it, else `fancy_regex`.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexWrapperPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexWrapperPattern {
    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(p) | Self::Fancy(p) | Self::Adaptive(p) => p,
        }
    }

    /// Compile the pattern.
    ///
    /// ## Returns
    /// The compiled regex, or [`RankBpeError::Regex`].
    pub fn compile(&self) -> RBResult<RegexWrapper> {
        match self {
            Self::Basic(p) => Ok(RegexWrapper::Basic(regex::Regex::new(p).map_err(regex_error)?)),
            Self::Fancy(p) => Ok(RegexWrapper::Fancy(
                fancy_regex::Regex::new(p).map_err(regex_error)?,
            )),
            Self::Adaptive(p) => match regex::Regex::new(p) {
                Ok(re) => Ok(RegexWrapper::Basic(re)),
                Err(_) => {
                    log::debug!("pattern needs fancy_regex: {p:?}");
                    Ok(RegexWrapper::Fancy(
                        fancy_regex::Regex::new(p).map_err(regex_error)?,
                    ))
                }
            },
        }
    }
}

/// A compiled regex from either engine.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// A `regex` regex.
    Basic(regex::Regex),

    /// A `fancy_regex` regex.
    Fancy(fancy_regex::Regex),
}

impl RegexWrapper {
    /// Compiled with `regex`?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Compiled with `fancy_regex`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// The first match at or after `start`.
    ///
    /// Text before `start` is still visible to look-behind and anchors.
    pub fn find_at(
        &self,
        haystack: &str,
        start: usize,
    ) -> RBResult<Option<Range<usize>>> {
        match self {
            Self::Basic(re) => Ok(re.find_at(haystack, start).map(|m| m.range())),
            Self::Fancy(re) => Ok(re
                .find_from_pos(haystack, start)
                .map_err(regex_error)?
                .map(|m| m.range())),
        }
    }

    /// Iterate match ranges over `haystack`.
    ///
    /// `fancy_regex` can fail mid-scan (backtrack limit); that surfaces as an
    /// `Err` item.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> RegexMatches<'r, 'h> {
        match self {
            Self::Basic(re) => RegexMatches::Basic(re.find_iter(haystack)),
            Self::Fancy(re) => RegexMatches::Fancy(re.find_iter(haystack)),
        }
    }
}

/// Match ranges from [`RegexWrapper::find_iter`].
pub enum RegexMatches<'r, 'h> {
    /// From `regex`.
    Basic(regex::Matches<'r, 'h>),

    /// From `fancy_regex`.
    Fancy(fancy_regex::Matches<'r, 'h>),
}

impl Iterator for RegexMatches<'_, '_> {
    type Item = RBResult<Range<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Basic(matches) => matches.next().map(|m| Ok(m.range())),
            Self::Fancy(matches) => matches
                .next()
                .map(|m| m.map(|m| m.range()).map_err(regex_error)),
        }
    }
}
