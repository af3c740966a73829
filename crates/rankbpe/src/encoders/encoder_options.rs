//! Token Encoder Options
//!
//! Options for building a [`TokenEncoder`].

use std::sync::Arc;

use crate::{
    TokenEncoder,
    TokenType,
    encoders::{BpeEncoder, FragmentMerger},
    errors::{RBResult, RankBpeError},
    spanning::TextSpanner,
    vocab::{RankTable, SpecialVocab},
};

/// The default fragment byte length at which
/// [`MergeStrategy::RankLevels`](crate::encoders::merge::MergeStrategy::RankLevels) is used.
pub const DEFAULT_LARGE_SPAN_THRESHOLD: usize = 500;

/// Environment variable read by [`TokenEncoderOptions::from_env`].
pub const LARGE_SPAN_THRESHOLD_ENV: &str = "VERY_LARGE_TOKENIZER_BYTE_THRESHOLD";

/// Options for configuring a [`TokenEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEncoderOptions {
    /// Fragments of at least this many bytes use the rank-level merge.
    ///
    /// Only selects an algorithm; the tokens do not change.
    pub large_span_threshold: usize,

    /// Should the encoder be threaded?
    pub parallel: bool,
}

impl Default for TokenEncoderOptions {
    fn default() -> Self {
        Self {
            large_span_threshold: DEFAULT_LARGE_SPAN_THRESHOLD,
            parallel: false,
        }
    }
}

impl TokenEncoderOptions {
    /// Default options, with the threshold overridden by
    /// [`LARGE_SPAN_THRESHOLD_ENV`] when it is set.
    ///
    /// ## Returns
    /// The options; or a parse error if the variable is not an integer.
    pub fn from_env() -> RBResult<Self> {
        let mut options = Self::default();
        if let Ok(value) = std::env::var(LARGE_SPAN_THRESHOLD_ENV) {
            let threshold = value.trim().parse::<usize>().map_err(|err| {
                RankBpeError::Parse(format!("{LARGE_SPAN_THRESHOLD_ENV}={value:?}: {err}"))
            })?;
            log::debug!("{LARGE_SPAN_THRESHOLD_ENV}: large span threshold is {threshold}");
            options.set_large_span_threshold(threshold);
        }
        Ok(options)
    }

    /// Gets the large span threshold.
    pub fn large_span_threshold(&self) -> usize {
        self.large_span_threshold
    }

    /// Sets the large span threshold.
    pub fn set_large_span_threshold(
        &mut self,
        large_span_threshold: usize,
    ) {
        self.large_span_threshold = large_span_threshold;
    }

    /// Sets the large span threshold and returns the options.
    pub fn with_large_span_threshold(
        mut self,
        large_span_threshold: usize,
    ) -> Self {
        self.set_large_span_threshold(large_span_threshold);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded implementations.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenEncoder`].
    ///
    /// ## Arguments
    /// * `table` - the rank table.
    /// * `specials` - the special tokens.
    /// * `spanner` - the fragment splitter.
    pub fn build<T: TokenType>(
        &self,
        table: Arc<RankTable<T>>,
        specials: Arc<SpecialVocab<T>>,
        spanner: TextSpanner,
    ) -> Arc<dyn TokenEncoder<T>> {
        let merger = FragmentMerger::new(table, self.large_span_threshold());

        #[allow(unused_mut)]
        let mut enc: Arc<dyn TokenEncoder<T>> =
            Arc::new(BpeEncoder::new(spanner, specials, merger));

        #[cfg(feature = "rayon")]
        if self.parallel() {
            enc = Arc::new(crate::rayon::ParallelRayonEncoder::new(enc));
        }

        enc
    }
}
