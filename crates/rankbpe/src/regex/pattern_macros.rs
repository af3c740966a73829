//! # Pattern Macros

/// Concatenate string literals with a separator, at compile time.
///
/// ```rust
/// use rankbpe::join_strs;
///
/// assert_eq!(join_strs!(",", ("a", "b", "c")), "a,b,c");
/// assert_eq!(join_strs!(";", ("only")), "only");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// [`join_strs!()`] with "|" as the separator; builds alternations.
#[macro_export]
macro_rules! join_patterns {
    ($($e:expr),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!(r"\s+(?!\S)", r"\s+"), r"\s+(?!\S)|\s+");
    }

    #[test]
    fn test_join_strs() {
        assert_eq!(join_strs!("+", ("a", "b", "c")), "a+b+c");
    }
}
