use std::{path::PathBuf, sync::Arc};

use rankbpe::{
    BpeEncoding,
    TokenEncoderOptions,
    pretrained::{EncodingRegistry, VOCAB_DIR_ENV, openai::EncodingType},
};

/// The encoding used when neither `--encoding` nor `--model` is given.
const DEFAULT_ENCODING: EncodingType = EncodingType::Cl100kBase;

/// Encoding selector arg group.
#[derive(clap::Args, Debug)]
pub struct EncodingSelectorArgs {
    /// Encoding name, e.g. "`o200k_base`".
    #[arg(long, conflicts_with = "model")]
    encoding: Option<String>,

    /// Model name, e.g. "gpt-4o"; selects the model's encoding.
    #[arg(long)]
    model: Option<String>,

    /// Directory holding the `.tiktoken` vocabulary files.
    #[arg(long, env = VOCAB_DIR_ENV)]
    vocab_dir: PathBuf,

    /// Fragments of at least this many bytes use the rank-level merge.
    #[arg(long)]
    large_span_threshold: Option<usize>,
}

impl EncodingSelectorArgs {
    /// Load the selected encoding.
    pub fn load_encoding(&self) -> Result<Arc<BpeEncoding<u32>>, Box<dyn std::error::Error>> {
        let mut options = TokenEncoderOptions::from_env()?;
        if let Some(threshold) = self.large_span_threshold {
            options.set_large_span_threshold(threshold);
        }

        let registry = EncodingRegistry::lazy(&self.vocab_dir).with_encoder_options(options);

        let encoding = match (&self.model, &self.encoding) {
            (Some(model), _) => registry.get_encoding_for_model(model)?,
            (None, Some(name)) => registry.get_encoding(name)?,
            (None, None) => registry.get_encoding_by_type(DEFAULT_ENCODING)?,
        };
        log::info!("using {encoding:?}");

        Ok(encoding)
    }
}
