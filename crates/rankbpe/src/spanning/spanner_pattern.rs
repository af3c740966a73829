//! # Spanner Pattern

use std::sync::Arc;

use crate::{
    errors::RBResult,
    regex::{ConstRegexWrapperPattern, RegexWrapperPattern},
    spanning::{Cl100kSplitter, RegexLexer, SpanLexer},
};

/// Selects which word splitter an encoding uses.
///
/// `Regex` runs a split pattern through [`RegexLexer`];
/// `Cl100k` uses the hand-coded [`Cl100kSplitter`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SpannerPattern {
    /// Use regex-based spanning with the given pattern.
    Regex(RegexWrapperPattern),

    /// Use the hand-coded `cl100k_base` splitter.
    Cl100k,
}

impl From<RegexWrapperPattern> for SpannerPattern {
    fn from(pattern: RegexWrapperPattern) -> Self {
        Self::Regex(pattern)
    }
}

impl From<ConstRegexWrapperPattern> for SpannerPattern {
    fn from(pattern: ConstRegexWrapperPattern) -> Self {
        Self::Regex(pattern.into())
    }
}

impl From<&str> for SpannerPattern {
    fn from(pattern: &str) -> Self {
        Self::Regex(RegexWrapperPattern::from(pattern))
    }
}

impl SpannerPattern {
    /// Build the word lexer for this pattern.
    ///
    /// ## Returns
    /// The lexer; or an error if the pattern does not compile.
    pub fn build_lexer(&self) -> RBResult<Arc<dyn SpanLexer>> {
        Ok(match self {
            Self::Regex(pattern) => Arc::new(RegexLexer::from_pattern(pattern.clone())?),
            Self::Cl100k => Arc::new(Cl100kSplitter),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from() {
        assert_eq!(
            SpannerPattern::from(r"\w+"),
            SpannerPattern::Regex(RegexWrapperPattern::Adaptive(r"\w+".to_string()))
        );
        assert_eq!(
            SpannerPattern::from(ConstRegexWrapperPattern::Fancy(r"\s+(?!\S)")),
            SpannerPattern::Regex(RegexWrapperPattern::Fancy(r"\s+(?!\S)".to_string()))
        );
    }

    #[test]
    fn test_build_lexer() {
        assert!(SpannerPattern::Cl100k.build_lexer().is_ok());
        assert!(SpannerPattern::from(r"\w+").build_lexer().is_ok());
        assert!(SpannerPattern::from(r"(").build_lexer().is_err());
    }
}
