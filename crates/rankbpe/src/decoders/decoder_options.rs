//! Token Decoder Options
//!
//! Options for building a [`TokenDecoder`].

use std::sync::Arc;

use crate::{
    TokenDecoder,
    TokenType,
    decoders::RankTableDecoder,
    vocab::{RankTable, SpecialVocab},
};

/// Options for configuring a [`TokenDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenDecoderOptions {
    /// Should the decoder be threaded?
    ///
    /// Enabling parallelism will request a threaded implementation.
    pub parallel: bool,
}

impl TokenDecoderOptions {
    /// Gets the configured parallelism value.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenDecoder`].
    pub fn build<T: TokenType>(
        &self,
        table: Arc<RankTable<T>>,
        specials: Arc<SpecialVocab<T>>,
    ) -> Arc<dyn TokenDecoder<T>> {
        #[allow(unused_mut)]
        let mut dec: Arc<dyn TokenDecoder<T>> = Arc::new(RankTableDecoder::new(table, specials));

        #[cfg(feature = "rayon")]
        if self.parallel() {
            dec = Arc::new(crate::rayon::ParallelRayonDecoder::new(dec));
        }

        dec
    }
}
