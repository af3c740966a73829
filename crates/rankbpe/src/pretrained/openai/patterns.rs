//! # `OpenAI` Patterns

use crate::{join_patterns, regex::ConstRegexWrapperPattern};

/// The "`r50k_base`" pretrained vocabulary word pattern.
pub const OA_R50K_BASE_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"'(?:[sdmt]|ll|ve|re)",
        r" ?\p{L}+",
        r" ?\p{N}+",
        r" ?[^\s\p{L}\p{N}]+",
        r"\s+(?!\S)",
        r"\s+",
    ));

/// The "`p50k_base`" pretrained vocabulary word pattern.
pub const OA_P50K_BASE_PATTERN: ConstRegexWrapperPattern = OA_R50K_BASE_PATTERN;

/// The "`cl100k_base`" pretrained vocabulary word pattern.
///
/// Encoding uses the hand-coded [`Cl100kSplitter`](crate::spanning::Cl100kSplitter);
/// this pattern is its reference.
pub const OA_CL100K_BASE_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"'(?i:[sdmt]|ll|ve|re)",
        r"[^\r\n\p{L}\p{N}]?+\p{L}+",
        r"\p{N}{1,3}",
        r" ?[^\s\p{L}\p{N}]++[\r\n]*",
        r"\s*[\r\n]",
        r"\s+(?!\S)",
        r"\s+",
    ));

/// The "`o200k_base`" pretrained vocabulary word pattern.
pub const OA_O200K_BASE_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]*[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
        r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]+[\p{Ll}\p{Lm}\p{Lo}\p{M}]*(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
        r"\p{N}{1,3}",
        r" ?[^\s\p{L}\p{N}]+[\r\n/]*",
        r"\s*[\r\n]+",
        r"\s+(?!\S)",
        r"\s+",
    ));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(OA_R50K_BASE_PATTERN.compile().is_ok());
        assert!(OA_P50K_BASE_PATTERN.compile().is_ok());
        assert!(OA_CL100K_BASE_PATTERN.compile().is_ok());
        assert!(OA_O200K_BASE_PATTERN.compile().is_ok());
    }

    #[test]
    fn test_patterns_need_fancy_regex() {
        use crate::regex::RegexWrapperPattern;

        for pattern in [
            OA_R50K_BASE_PATTERN,
            OA_CL100K_BASE_PATTERN,
            OA_O200K_BASE_PATTERN,
        ] {
            let adaptive = RegexWrapperPattern::Adaptive(pattern.as_str().to_string());
            assert!(adaptive.compile().unwrap().is_fancy());
        }
    }
}
