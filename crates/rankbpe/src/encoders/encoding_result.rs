//! # Encoding Result

/// The result of encoding text, with an optional token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingResult<T> {
    /// The token ids.
    pub tokens: Vec<T>,

    /// Did the budget cut the encoding short of the full text?
    pub truncated: bool,

    /// Byte offset of the last input byte the tokens represent.
    ///
    /// `None` when no input was represented.
    pub last_processed_index: Option<usize>,
}

impl<T> Default for EncodingResult<T> {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            truncated: false,
            last_processed_index: None,
        }
    }
}

impl<T> EncodingResult<T> {
    /// Build a result.
    pub fn new(
        tokens: Vec<T>,
        truncated: bool,
        last_processed_index: Option<usize>,
    ) -> Self {
        Self {
            tokens,
            truncated,
            last_processed_index,
        }
    }

    /// A result covering all of a `text_len` byte input.
    pub fn complete(
        tokens: Vec<T>,
        text_len: usize,
    ) -> Self {
        Self::new(tokens, false, text_len.checked_sub(1))
    }

    /// The number of processed input bytes.
    pub fn processed_len(&self) -> usize {
        self.last_processed_index.map_or(0, |idx| idx + 1)
    }

    /// Take the token ids.
    pub fn into_tokens(self) -> Vec<T> {
        self.tokens
    }
}
