//! # `OpenAI` Pretrained Vocabulary Loaders

use std::path::{Path, PathBuf};

use crate::{
    encoding::EncodingParams,
    errors::RBResult,
    pretrained::openai::{EncodingType, specials::special_vocab_from_table},
    spanning::SpannerPattern,
    types::TokenType,
    vocab::io::load_base64_rank_table_path,
};

fn load_common_params_path<T: TokenType>(
    name: &str,
    vocab_path: &Path,
    pattern: SpannerPattern,
    specials: &[(&str, usize)],
) -> RBResult<EncodingParams<T>> {
    let ranks = load_base64_rank_table_path(vocab_path)?;
    let specials = special_vocab_from_table(specials)?;

    Ok(EncodingParams::new(name, pattern, ranks, specials))
}

impl EncodingType {
    /// The vocabulary file path under `vocab_dir`.
    pub fn vocab_path(
        self,
        vocab_dir: impl AsRef<Path>,
    ) -> PathBuf {
        vocab_dir.as_ref().join(self.vocab_file_name())
    }

    /// Load this encoding's parameters from a vocabulary file.
    ///
    /// ## Arguments
    /// * `vocab_path` - the `.tiktoken` rank file.
    pub fn load_params_path<T: TokenType>(
        self,
        vocab_path: impl AsRef<Path>,
    ) -> RBResult<EncodingParams<T>> {
        load_common_params_path(
            self.name(),
            vocab_path.as_ref(),
            self.spanner_pattern(),
            self.specials(),
        )
    }

    /// Load this encoding's parameters from a vocabulary directory.
    ///
    /// ## Arguments
    /// * `vocab_dir` - a directory holding [`EncodingType::vocab_file_name`].
    pub fn load_params_from_dir<T: TokenType>(
        self,
        vocab_dir: impl AsRef<Path>,
    ) -> RBResult<EncodingParams<T>> {
        self.load_params_path(self.vocab_path(vocab_dir))
    }
}
