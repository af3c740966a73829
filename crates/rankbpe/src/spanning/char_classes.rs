//! # Character Classes
//!
//! Code point predicates for the hand-coded cl100k splitter.
//!
//! The letter and number classes have hard ceilings: above them they are
//! `false` regardless of the Unicode category. The trained vocabulary was
//! built against tables with exactly this coverage.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Letters above this code point are not letters.
pub const LETTER_CEILING: u32 = 0x323AF;

/// Numbers above this code point are not numbers.
pub const NUMERIC_CEILING: u32 = 0x1FBF9;

/// Short contraction suffixes, including the long s.
pub const SHORT_CONTRACTIONS: &str = "sdtmSDTMſ";

/// Whitespace above ``U+0085``, sorted.
const WIDE_WHITESPACE: &[u32] = &[
    0x1680, 0x2000, 0x2001, 0x2002, 0x2003, 0x2004, 0x2005, 0x2006, 0x2007, 0x2008, 0x2009,
    0x200A, 0x2028, 0x2029, 0x202F, 0x205F, 0x3000,
];

#[inline]
fn is_category_letter(ch: char) -> bool {
    use GeneralCategory::*;
    matches!(
        get_general_category(ch),
        UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter | OtherLetter
    )
}

#[inline]
fn is_category_number(ch: char) -> bool {
    use GeneralCategory::*;
    matches!(
        get_general_category(ch),
        DecimalNumber | LetterNumber | OtherNumber
    )
}

/// Is `ch` a letter (``\p{L}``, up to [`LETTER_CEILING`])?
#[inline]
pub fn is_letter(ch: char) -> bool {
    let cp = ch as u32;
    if cp < 0xAA {
        ch.is_ascii_alphabetic()
    } else if cp <= LETTER_CEILING {
        is_category_letter(ch)
    } else {
        false
    }
}

/// Is `ch` a number (``\p{N}``, up to [`NUMERIC_CEILING`])?
#[inline]
pub fn is_numeric(ch: char) -> bool {
    let cp = ch as u32;
    if cp < 0xB2 {
        ch.is_ascii_digit()
    } else if cp <= NUMERIC_CEILING {
        is_category_number(ch)
    } else {
        false
    }
}

/// Is `ch` a letter or a number?
///
/// Note: between the two ceilings this uses the category test for both,
/// so it is not exactly ``is_letter(ch) || is_numeric(ch)``.
#[inline]
pub fn is_letter_or_numeric(ch: char) -> bool {
    let cp = ch as u32;
    if cp < 0xAA {
        ch.is_ascii_alphanumeric()
    } else if cp <= LETTER_CEILING {
        is_category_letter(ch) || is_category_number(ch)
    } else {
        false
    }
}

/// Is `ch` whitespace (``\s``)?
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    let cp = ch as u32;
    if ch <= '\r' {
        ('\t'..='\r').contains(&ch)
    } else if cp < 0x85 {
        ch == ' '
    } else {
        cp == 0x85
            || cp == 0xA0
            || ((0x1680..=0x3000).contains(&cp) && WIDE_WHITESPACE.binary_search(&cp).is_ok())
    }
}

/// Is `ch` a line break (``[\r\n]``)?
#[inline]
pub fn is_newline(ch: char) -> bool {
    ch == '\r' || ch == '\n'
}

/// ``[^\s\p{L}\p{N}]``
#[inline]
pub fn is_not_whitespace_or_letter_or_numeric(ch: char) -> bool {
    if ch < '0' {
        ch != ' ' && (ch > '\r' || ch < '\t')
    } else {
        !is_letter_or_numeric(ch) && !is_whitespace(ch)
    }
}

/// ``[^\r\n\p{L}\p{N}]``
#[inline]
pub fn is_not_newline_or_letter_or_numeric(ch: char) -> bool {
    if ch < '0' {
        !is_newline(ch)
    } else {
        !is_letter_or_numeric(ch)
    }
}

/// Is `ch` one of [`SHORT_CONTRACTIONS`]?
#[inline]
pub fn is_short_contraction(ch: char) -> bool {
    SHORT_CONTRACTIONS.contains(ch)
}

/// Is ``(a, b)`` one of ``ll``, ``ve``, ``re``, ignoring case?
pub fn is_long_contraction(
    a: char,
    b: char,
) -> bool {
    match (a, b) {
        ('l', 'l') | ('v', 'e') | ('r', 'e') => true,
        _ => {
            let a = single_uppercase(a);
            let b = single_uppercase(b);
            matches!(
                (a, b),
                (Some('L'), Some('L')) | (Some('V'), Some('E')) | (Some('R'), Some('E'))
            )
        }
    }
}

/// The simple uppercase mapping of `ch`, when it is a single char.
fn single_uppercase(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}
