//! # Special Tokens

use crate::{
    errors::{RBResult, RankBpeError},
    types::TokenType,
    vocab::SpecialVocab,
};

macro_rules! declare_carrot_special {
    ($(($name:ident, $value:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Special token: `<|", $value, "|>`")]
            pub const $name: &str = concat!("<|", $value, "|>");
        )*
    };
}

declare_carrot_special!(
    (ENDOFTEXT, "endoftext"),
    (ENDOFPROMPT, "endofprompt"),
    (FIM_PREFIX, "fim_prefix"),
    (FIM_MIDDLE, "fim_middle"),
    (FIM_SUFFIX, "fim_suffix"),
);

/// The "`r50k_base`" special tokens.
pub const OA_R50K_BASE_SPECIALS: &[(&str, usize)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_base`" special tokens.
pub const OA_P50K_BASE_SPECIALS: &[(&str, usize)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_edit`" special tokens.
pub const OA_P50K_EDIT_SPECIALS: &[(&str, usize)] = &[
    (ENDOFTEXT, 50256),
    (FIM_PREFIX, 50281),
    (FIM_MIDDLE, 50282),
    (FIM_SUFFIX, 50283),
];

/// The "`cl100k_base`" special tokens.
pub const OA_CL100K_BASE_SPECIALS: &[(&str, usize)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];

/// The "`o200k_base`" special tokens.
pub const OA_O200K_BASE_SPECIALS: &[(&str, usize)] = &[(ENDOFTEXT, 199999), (ENDOFPROMPT, 200018)];

/// Build a [`SpecialVocab`] from a const special table.
///
/// ## Arguments
/// * `specials` - ``(literal, token)`` pairs.
///
/// ## Returns
/// The vocab; or [`RankBpeError::TokenOutOfRange`] if a token does not fit `T`.
pub fn special_vocab_from_table<T: TokenType>(
    specials: &[(&str, usize)]
) -> RBResult<SpecialVocab<T>> {
    let pairs = specials
        .iter()
        .map(|&(literal, token)| match T::from_usize(token) {
            Some(token) => Ok((literal, token)),
            None => Err(RankBpeError::TokenOutOfRange {
                rank: token as u64,
            }),
        })
        .collect::<RBResult<Vec<_>>>()?;

    SpecialVocab::from_pairs(pairs)
}
