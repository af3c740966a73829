//! # `OpenAI` Encoding Types

use crate::{
    pretrained::openai::{
        patterns::{OA_O200K_BASE_PATTERN, OA_P50K_BASE_PATTERN, OA_R50K_BASE_PATTERN},
        specials::{
            OA_CL100K_BASE_SPECIALS,
            OA_O200K_BASE_SPECIALS,
            OA_P50K_BASE_SPECIALS,
            OA_P50K_EDIT_SPECIALS,
            OA_R50K_BASE_SPECIALS,
        },
    },
    spanning::SpannerPattern,
};

/// The built-in `OpenAI` encodings.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[non_exhaustive]
pub enum EncodingType {
    /// GPT-2 "`r50k_base`" encoding.
    #[strum(serialize = "r50k_base")]
    R50kBase,

    /// GPT-2 "`p50k_base`" encoding.
    #[strum(serialize = "p50k_base")]
    P50kBase,

    /// GPT-2 "`p50k_edit`" encoding.
    #[strum(serialize = "p50k_edit")]
    P50kEdit,

    /// GPT-3 "`cl100k_base`" encoding.
    #[strum(serialize = "cl100k_base")]
    Cl100kBase,

    /// GPT-4o "`o200k_base`" encoding.
    #[strum(serialize = "o200k_base")]
    O200kBase,
}

impl EncodingType {
    /// The encoding name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up an encoding type by name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// The vocabulary file name, relative to a vocabulary directory.
    ///
    /// `p50k_edit` shares the `p50k_base` ranks.
    pub fn vocab_file_name(self) -> &'static str {
        use EncodingType::*;
        match self {
            R50kBase => "r50k_base.tiktoken",
            P50kBase | P50kEdit => "p50k_base.tiktoken",
            Cl100kBase => "cl100k_base.tiktoken",
            O200kBase => "o200k_base.tiktoken",
        }
    }

    /// The word splitter.
    pub fn spanner_pattern(self) -> SpannerPattern {
        use EncodingType::*;
        match self {
            R50kBase => OA_R50K_BASE_PATTERN.into(),
            P50kBase | P50kEdit => OA_P50K_BASE_PATTERN.into(),
            Cl100kBase => SpannerPattern::Cl100k,
            O200kBase => OA_O200K_BASE_PATTERN.into(),
        }
    }

    /// The special token table.
    pub fn specials(self) -> &'static [(&'static str, usize)] {
        use EncodingType::*;
        match self {
            R50kBase => OA_R50K_BASE_SPECIALS,
            P50kBase => OA_P50K_BASE_SPECIALS,
            P50kEdit => OA_P50K_EDIT_SPECIALS,
            Cl100kBase => OA_CL100K_BASE_SPECIALS,
            O200kBase => OA_O200K_BASE_SPECIALS,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(EncodingType::R50kBase.to_string(), "r50k_base");
        assert_eq!(EncodingType::P50kBase.to_string(), "p50k_base");
        assert_eq!(EncodingType::P50kEdit.to_string(), "p50k_edit");
        assert_eq!(EncodingType::Cl100kBase.to_string(), "cl100k_base");
        assert_eq!(EncodingType::O200kBase.name(), "o200k_base");

        for ty in EncodingType::iter() {
            assert_eq!(EncodingType::from_str(ty.name()).unwrap(), ty);
            assert_eq!(EncodingType::from_name(&ty.to_string()), Some(ty));
        }
        assert_eq!(EncodingType::from_name("o100k_base"), None);
    }

    #[test]
    fn test_vocab_files() {
        assert_eq!(
            EncodingType::P50kEdit.vocab_file_name(),
            EncodingType::P50kBase.vocab_file_name()
        );
        assert_eq!(
            EncodingType::Cl100kBase.vocab_file_name(),
            "cl100k_base.tiktoken"
        );
    }

    #[test]
    fn test_spanner_patterns() {
        assert_eq!(
            EncodingType::Cl100kBase.spanner_pattern(),
            SpannerPattern::Cl100k
        );
        assert_eq!(
            EncodingType::P50kEdit.spanner_pattern(),
            EncodingType::R50kBase.spanner_pattern()
        );
        for ty in EncodingType::iter() {
            assert!(ty.spanner_pattern().build_lexer().is_ok());
        }
    }

    #[test]
    fn test_specials() {
        assert_eq!(EncodingType::P50kEdit.specials().len(), 4);
        assert_eq!(EncodingType::O200kBase.specials()[0], ("<|endoftext|>", 199999));
    }
}
