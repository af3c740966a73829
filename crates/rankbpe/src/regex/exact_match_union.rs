//! Exact Match Union Patterns

use crate::regex::regex_wrapper::RegexWrapperPattern;

/// Create a union pattern of exact matches.
///
/// This will always be a [`RegexWrapperPattern::Basic`] variant.
/// Alternatives are tried in the order given; list longer literals first
/// when one is a prefix of another.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
///
/// ## Returns
/// A new `RegexWrapperPattern::Basic` containing the union pattern.
pub fn exact_match_union_regex_pattern<S: AsRef<str>>(alts: &[S]) -> RegexWrapperPattern {
    let parts = alts
        .iter()
        .map(|s| regex::escape(s.as_ref()))
        .collect::<Vec<_>>();
    RegexWrapperPattern::Basic(format!("({})", parts.join("|")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::RegexWrapper;

    #[test]
    fn test_special_literal_union() {
        let alternatives = ["<|endoftext|>", "<|fim_prefix|>"];

        let pattern = exact_match_union_regex_pattern(&alternatives);
        assert_eq!(pattern.as_str(), r"(<\|endoftext\|>|<\|fim_prefix\|>)");

        let re: RegexWrapper = pattern.compile().unwrap();
        assert!(re.is_basic());

        let text = "a<|endoftext|>b <|fim_prefix|><|endoftext|>";
        assert_eq!(
            re.find_iter(text).collect::<Result<Vec<_>, _>>().unwrap(),
            vec![1..14, 16..30, 30..43]
        );
    }
}
