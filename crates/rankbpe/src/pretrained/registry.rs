//! # Encoding Registry

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use strum::IntoEnumIterator;

use crate::{
    decoders::TokenDecoderOptions,
    encoders::TokenEncoderOptions,
    encoding::{BpeEncoding, EncodingParams},
    errors::{RBResult, RankBpeError},
    pretrained::openai::{EncodingType, ModelType},
    types::RBHashMap,
};

/// Environment variable read by [`EncodingRegistry::from_env`].
pub const VOCAB_DIR_ENV: &str = "RANKBPE_VOCAB_DIR";

/// Thread-safe ``{ name -> encoding }`` registry.
///
/// Built-in encodings are loaded from ``{vocab_dir}/{name}.tiktoken`` files;
/// see [`EncodingType::vocab_file_name`].
///
/// * [`EncodingRegistry::new`] starts empty; built-ins are loaded
///   only through [`EncodingRegistry::add_encoding`].
/// * [`EncodingRegistry::lazy`] loads a built-in on its first request.
/// * [`EncodingRegistry::with_defaults`] loads every built-in whose
///   vocabulary file is present.
pub struct EncodingRegistry {
    vocab_dir: PathBuf,
    lazy: bool,
    encoder_options: TokenEncoderOptions,
    decoder_options: TokenDecoderOptions,
    encodings: RwLock<RBHashMap<String, Arc<BpeEncoding<u32>>>>,
}

impl core::fmt::Debug for EncodingRegistry {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("EncodingRegistry")
            .field("vocab_dir", &self.vocab_dir)
            .field("lazy", &self.lazy)
            .field("encodings", &self.encoding_names())
            .finish()
    }
}

impl EncodingRegistry {
    fn build(
        vocab_dir: PathBuf,
        lazy: bool,
    ) -> Self {
        Self {
            vocab_dir,
            lazy,
            encoder_options: TokenEncoderOptions::default(),
            decoder_options: TokenDecoderOptions::default(),
            encodings: RwLock::new(RBHashMap::default()),
        }
    }

    /// Create an empty registry.
    ///
    /// ## Arguments
    /// * `vocab_dir` - the directory holding the built-in vocabulary files.
    pub fn new(vocab_dir: impl Into<PathBuf>) -> Self {
        Self::build(vocab_dir.into(), false)
    }

    /// Create a registry which loads built-in encodings on first request.
    ///
    /// ## Arguments
    /// * `vocab_dir` - the directory holding the built-in vocabulary files.
    pub fn lazy(vocab_dir: impl Into<PathBuf>) -> Self {
        Self::build(vocab_dir.into(), true)
    }

    /// Create a registry and load every built-in encoding whose
    /// vocabulary file exists under `vocab_dir`.
    ///
    /// ## Returns
    /// The registry; or the first load error of a present file.
    pub fn with_defaults(vocab_dir: impl Into<PathBuf>) -> RBResult<Self> {
        let registry = Self::new(vocab_dir);
        for ty in EncodingType::iter() {
            if ty.vocab_path(&registry.vocab_dir).is_file() {
                registry.add_encoding(ty)?;
            } else {
                log::debug!(
                    "{ty}: no vocabulary at {}",
                    ty.vocab_path(&registry.vocab_dir).display()
                );
            }
        }
        Ok(registry)
    }

    /// Create a lazy registry over the directory named by [`VOCAB_DIR_ENV`].
    ///
    /// The encoder options come from [`TokenEncoderOptions::from_env`].
    ///
    /// ## Returns
    /// The registry; or [`RankBpeError::Config`] if the variable is unset.
    pub fn from_env() -> RBResult<Self> {
        let vocab_dir = std::env::var_os(VOCAB_DIR_ENV)
            .ok_or_else(|| RankBpeError::Config(format!("{VOCAB_DIR_ENV} is not set")))?;
        Ok(Self::lazy(vocab_dir).with_encoder_options(TokenEncoderOptions::from_env()?))
    }

    /// Set the options used to build encoders for new encodings.
    pub fn with_encoder_options(
        mut self,
        options: TokenEncoderOptions,
    ) -> Self {
        self.encoder_options = options;
        self
    }

    /// Set the options used to build decoders for new encodings.
    pub fn with_decoder_options(
        mut self,
        options: TokenDecoderOptions,
    ) -> Self {
        self.decoder_options = options;
        self
    }

    /// The built-in vocabulary directory.
    pub fn vocab_dir(&self) -> &Path {
        &self.vocab_dir
    }

    /// Does this registry load built-ins on request?
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// The registered encoding names, sorted.
    pub fn encoding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.encodings.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Load a built-in encoding, unless its name is already registered.
    ///
    /// ## Returns
    /// The registered encoding under `ty`'s name.
    pub fn add_encoding(
        &self,
        ty: EncodingType,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        if let Some(encoding) = self.encodings.read().get(ty.name()) {
            return Ok(encoding.clone());
        }

        log::debug!("loading {ty} from {}", self.vocab_dir.display());
        let params = ty.load_params_from_dir(&self.vocab_dir)?;
        let encoding = Arc::new(self.build_encoding(params)?);

        // Another thread may have won the race; keep the first.
        let mut writer = self.encodings.write();
        Ok(writer
            .entry(ty.name().to_string())
            .or_insert(encoding)
            .clone())
    }

    /// Get an encoding by name.
    ///
    /// ## Returns
    /// The encoding; or [`RankBpeError::UnknownEncoding`].
    pub fn get_encoding(
        &self,
        name: &str,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        if self.lazy
            && let Some(ty) = EncodingType::from_name(name)
        {
            return self.add_encoding(ty);
        }

        self.encodings
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RankBpeError::UnknownEncoding(name.to_string()))
    }

    /// Get a built-in encoding.
    pub fn get_encoding_by_type(
        &self,
        ty: EncodingType,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        self.get_encoding(ty.name())
    }

    /// Get the encoding used by a model.
    ///
    /// Unknown names fall back to a known model name prefix;
    /// see [`ModelType::resolve`].
    ///
    /// ## Returns
    /// The encoding; or [`RankBpeError::UnknownModel`].
    pub fn get_encoding_for_model(
        &self,
        model_name: &str,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        let model = ModelType::resolve(model_name)
            .ok_or_else(|| RankBpeError::UnknownModel(model_name.to_string()))?;
        self.get_encoding_for_model_type(model)
    }

    /// Get the encoding used by a model.
    pub fn get_encoding_for_model_type(
        &self,
        model: ModelType,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        self.get_encoding_by_type(model.encoding())
    }

    /// Register a custom encoding.
    ///
    /// ## Returns
    /// The registered encoding; or [`RankBpeError::DuplicateEncoding`]
    /// if the name is taken.
    pub fn register_encoding(
        &self,
        encoding: BpeEncoding<u32>,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        let mut writer = self.encodings.write();
        if writer.contains_key(encoding.name()) {
            return Err(RankBpeError::DuplicateEncoding(encoding.name().to_string()));
        }

        log::debug!("registered {encoding:?}");
        let encoding = Arc::new(encoding);
        writer.insert(encoding.name().to_string(), encoding.clone());
        Ok(encoding)
    }

    /// Build and register an encoding from parameters.
    pub fn register_params(
        &self,
        params: EncodingParams<u32>,
    ) -> RBResult<Arc<BpeEncoding<u32>>> {
        if self.encodings.read().contains_key(&params.name) {
            return Err(RankBpeError::DuplicateEncoding(params.name));
        }
        self.register_encoding(self.build_encoding(params)?)
    }

    fn build_encoding(
        &self,
        params: EncodingParams<u32>,
    ) -> RBResult<BpeEncoding<u32>> {
        BpeEncoding::from_params_with_options(params, self.encoder_options, self.decoder_options)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::{
        TokenDecoder,
        TokenEncoder,
        spanning::SpannerPattern,
        vocab::{
            SpecialVocab,
            io::save_base64_rank_table_path,
            testing::{test_rank_table, test_special_vocab},
        },
    };

    fn vocab_dir(types: &[EncodingType]) -> TempDir {
        let dir = TempDir::new("registry").unwrap();
        let table = test_rank_table::<u32>();
        for ty in types {
            save_base64_rank_table_path(&table, ty.vocab_path(dir.path())).unwrap();
        }
        dir
    }

    fn custom_params(name: &str) -> EncodingParams<u32> {
        EncodingParams::new(
            name,
            SpannerPattern::Cl100k,
            test_rank_table(),
            test_special_vocab(),
        )
    }

    #[test]
    fn test_lazy() {
        let dir = vocab_dir(&[EncodingType::Cl100kBase]);
        let registry = EncodingRegistry::lazy(dir.path());
        assert!(registry.is_lazy());
        assert!(registry.encoding_names().is_empty());

        let encoding = registry.get_encoding("cl100k_base").unwrap();
        assert_eq!(encoding.name(), "cl100k_base");
        assert_eq!(registry.encoding_names(), vec!["cl100k_base".to_string()]);
        assert!(Arc::ptr_eq(
            &encoding,
            &registry
                .get_encoding_by_type(EncodingType::Cl100kBase)
                .unwrap()
        ));

        let tokens = encoding.try_encode("hello world").unwrap();
        assert_eq!(
            encoding
                .try_decode_to_string(&tokens)
                .unwrap()
                .try_result()
                .unwrap(),
            "hello world"
        );

        // Built-in name, but no file.
        assert!(matches!(
            registry.get_encoding("o200k_base"),
            Err(RankBpeError::Io(_))
        ));
        assert!(matches!(
            registry.get_encoding("nope"),
            Err(RankBpeError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_new_is_empty_until_added() {
        let dir = vocab_dir(&[EncodingType::R50kBase]);
        let registry = EncodingRegistry::new(dir.path());
        assert!(!registry.is_lazy());
        assert_eq!(registry.vocab_dir(), dir.path());

        assert!(matches!(
            registry.get_encoding("r50k_base"),
            Err(RankBpeError::UnknownEncoding(_))
        ));

        let added = registry.add_encoding(EncodingType::R50kBase).unwrap();
        let found = registry.get_encoding("r50k_base").unwrap();
        assert!(Arc::ptr_eq(&added, &found));
    }

    #[test]
    fn test_with_defaults() {
        let dir = vocab_dir(&[EncodingType::P50kBase, EncodingType::O200kBase]);
        let registry = EncodingRegistry::with_defaults(dir.path()).unwrap();

        assert_eq!(
            registry.encoding_names(),
            vec![
                "o200k_base".to_string(),
                "p50k_base".to_string(),
                "p50k_edit".to_string(),
            ]
        );
        assert_eq!(
            registry
                .get_encoding("p50k_edit")
                .unwrap()
                .specials()
                .len(),
            4
        );
    }

    #[test]
    fn test_models() {
        let dir = vocab_dir(&[EncodingType::Cl100kBase, EncodingType::O200kBase]);
        let registry = EncodingRegistry::lazy(dir.path());

        assert_eq!(
            registry.get_encoding_for_model("gpt-4").unwrap().name(),
            "cl100k_base"
        );
        assert_eq!(
            registry
                .get_encoding_for_model("gpt-4o-2024-05-13")
                .unwrap()
                .name(),
            "o200k_base"
        );
        assert_eq!(
            registry
                .get_encoding_for_model_type(ModelType::TEXT_EMBEDDING_3_SMALL)
                .unwrap()
                .name(),
            "cl100k_base"
        );
        assert!(matches!(
            registry.get_encoding_for_model("llama-3"),
            Err(RankBpeError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_register() {
        let registry = EncodingRegistry::new("unused");

        let encoding = registry.register_params(custom_params("custom")).unwrap();
        assert_eq!(encoding.name(), "custom");
        assert!(Arc::ptr_eq(
            &encoding,
            &registry.get_encoding("custom").unwrap()
        ));

        assert!(matches!(
            registry.register_params(custom_params("custom")),
            Err(RankBpeError::DuplicateEncoding(name)) if name == "custom"
        ));

        let other = BpeEncoding::from_params(
            custom_params("custom").with_specials(SpecialVocab::default()),
        )
        .unwrap();
        assert!(matches!(
            registry.register_encoding(other),
            Err(RankBpeError::DuplicateEncoding(_))
        ));
    }

    #[test]
    fn test_registered_builtin_name_wins() {
        let dir = vocab_dir(&[EncodingType::Cl100kBase]);
        let registry = EncodingRegistry::lazy(dir.path());

        let custom = registry.register_params(custom_params("cl100k_base")).unwrap();
        assert!(Arc::ptr_eq(
            &custom,
            &registry.get_encoding("cl100k_base").unwrap()
        ));
    }

    #[test]
    fn test_encoder_options() {
        let dir = vocab_dir(&[EncodingType::R50kBase]);
        let registry = EncodingRegistry::lazy(dir.path())
            .with_encoder_options(TokenEncoderOptions::default().with_large_span_threshold(1))
            .with_decoder_options(TokenDecoderOptions::default().with_parallel(true));

        let encoding = registry.get_encoding("r50k_base").unwrap();
        let text = "hello san francisco";
        let tokens = encoding.try_encode(text).unwrap();
        assert_eq!(
            encoding.try_decode_to_bytes(&tokens).unwrap().try_result().unwrap(),
            text.as_bytes()
        );
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let dir = vocab_dir(&[EncodingType::R50kBase]);

        // SAFETY: serialized with every other test touching these variables.
        unsafe { std::env::remove_var(VOCAB_DIR_ENV) };
        assert!(matches!(
            EncodingRegistry::from_env(),
            Err(RankBpeError::Config(_))
        ));

        unsafe { std::env::set_var(VOCAB_DIR_ENV, dir.path()) };
        let registry = EncodingRegistry::from_env().unwrap();
        assert!(registry.is_lazy());
        assert_eq!(registry.vocab_dir(), dir.path());
        assert!(registry.get_encoding("r50k_base").is_ok());

        unsafe { std::env::remove_var(VOCAB_DIR_ENV) };
    }
}
