//! # Error Types

/// Errors from rankbpe operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RankBpeError {
    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    /// A special token literal was found on the strict encode path.
    #[error("encoding special tokens is not supported (found {token:?})")]
    SpecialTokenCollision {
        /// The special token literal found in the text.
        token: String,
    },

    /// A special token literal is missing the `<|` / `|>` markers.
    #[error("special tokens must contain \"<|\" and \"|>\" (but was {token:?})")]
    InvalidSpecialToken {
        /// The offending literal.
        token: String,
    },

    /// An internal consistency check failed.
    ///
    /// This indicates a corrupted rank table or a logic defect.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Vocabulary data is inconsistent.
    #[error("vocab conflict: {0}")]
    VocabConflict(String),

    /// A rank does not fit the token type, or collides with a reserved sentinel.
    #[error("rank {rank} is out of range for the token type")]
    TokenOutOfRange {
        /// The offending rank.
        rank: u64,
    },

    /// Decoding did not consume all tokens.
    #[error("incomplete decode: {remaining} remaining tokens")]
    IncompleteDecode {
        /// The number of remaining tokens.
        remaining: usize,
    },

    /// No encoding is registered under this name.
    #[error("encoding {0} not found")]
    UnknownEncoding(String),

    /// No model is known under this name.
    #[error("model {0} not found")]
    UnknownModel(String),

    /// An encoding with this name is already registered.
    #[error("encoding {0} already registered")]
    DuplicateEncoding(String),

    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A split pattern failed to compile or run.
    #[error("regex error: {0}")]
    Regex(String),

    /// Parse error (base64, integer, line shape).
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for rankbpe operations.
pub type RBResult<T> = core::result::Result<T, RankBpeError>;

/// Build an [`RankBpeError::InvariantViolation`], logging it on the way out.
pub(crate) fn invariant_violation(message: impl Into<String>) -> RankBpeError {
    let message = message.into();
    log::error!("invariant violation: {message}");
    RankBpeError::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RankBpeError::SpecialTokenCollision {
                token: "<|endoftext|>".to_string()
            }
            .to_string(),
            "encoding special tokens is not supported (found \"<|endoftext|>\")"
        );
        assert_eq!(
            RankBpeError::IncompleteDecode { remaining: 3 }.to_string(),
            "incomplete decode: 3 remaining tokens"
        );
        assert_eq!(
            invariant_violation("bad rank").to_string(),
            "invariant violation: bad rank"
        );
    }

    #[test]
    fn test_io_from() {
        let err: RankBpeError = std::io::Error::other("boom").into();
        assert!(matches!(err, RankBpeError::Io(_)));
    }
}
