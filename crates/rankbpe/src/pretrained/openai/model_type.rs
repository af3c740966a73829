//! # `OpenAI` Model Table

use crate::pretrained::openai::EncodingType;

/// A known model: its encoding and context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelType {
    name: &'static str,
    encoding: EncodingType,
    max_context_length: usize,
}

macro_rules! declare_models {
    ($(($id:ident, $name:literal, $encoding:ident, $context:literal)),* $(,)?) => {
        impl ModelType {
            $(
                #[doc = concat!("The `", $name, "` model.")]
                pub const $id: ModelType = ModelType::new($name, EncodingType::$encoding, $context);
            )*
        }

        /// Every known model.
        pub const OA_MODEL_TYPES: &[ModelType] = &[$(ModelType::$id),*];
    };
}

declare_models!(
    // Chat
    (GPT_4, "gpt-4", Cl100kBase, 8192),
    (GPT_4O, "gpt-4o", O200kBase, 128000),
    (GPT_4O_MINI, "gpt-4o-mini", O200kBase, 128000),
    (GPT_4_32K, "gpt-4-32k", Cl100kBase, 32768),
    (GPT_4_TURBO, "gpt-4-turbo", Cl100kBase, 128000),
    (GPT_3_5_TURBO, "gpt-3.5-turbo", Cl100kBase, 16385),
    (GPT_3_5_TURBO_16K, "gpt-3.5-turbo-16k", Cl100kBase, 16385),
    // Text
    (TEXT_DAVINCI_003, "text-davinci-003", P50kBase, 4097),
    (TEXT_DAVINCI_002, "text-davinci-002", P50kBase, 4097),
    (TEXT_DAVINCI_001, "text-davinci-001", R50kBase, 2049),
    (TEXT_CURIE_001, "text-curie-001", R50kBase, 2049),
    (TEXT_BABBAGE_001, "text-babbage-001", R50kBase, 2049),
    (TEXT_ADA_001, "text-ada-001", R50kBase, 2049),
    (DAVINCI, "davinci", R50kBase, 2049),
    (CURIE, "curie", R50kBase, 2049),
    (BABBAGE, "babbage", R50kBase, 2049),
    (ADA, "ada", R50kBase, 2049),
    // Code
    (CODE_DAVINCI_002, "code-davinci-002", P50kBase, 8001),
    (CODE_DAVINCI_001, "code-davinci-001", P50kBase, 8001),
    (CODE_CUSHMAN_002, "code-cushman-002", P50kBase, 2048),
    (CODE_CUSHMAN_001, "code-cushman-001", P50kBase, 2048),
    (DAVINCI_CODEX, "davinci-codex", P50kBase, 4096),
    (CUSHMAN_CODEX, "cushman-codex", P50kBase, 2048),
    // Edit
    (TEXT_DAVINCI_EDIT_001, "text-davinci-edit-001", P50kEdit, 3000),
    (CODE_DAVINCI_EDIT_001, "code-davinci-edit-001", P50kEdit, 3000),
    // Embeddings
    (TEXT_EMBEDDING_ADA_002, "text-embedding-ada-002", Cl100kBase, 8191),
    (TEXT_EMBEDDING_3_SMALL, "text-embedding-3-small", Cl100kBase, 8191),
    (TEXT_EMBEDDING_3_LARGE, "text-embedding-3-large", Cl100kBase, 8191),
    // Legacy embeddings
    (TEXT_SIMILARITY_DAVINCI_001, "text-similarity-davinci-001", R50kBase, 2046),
    (TEXT_SIMILARITY_CURIE_001, "text-similarity-curie-001", R50kBase, 2046),
    (TEXT_SIMILARITY_BABBAGE_001, "text-similarity-babbage-001", R50kBase, 2046),
    (TEXT_SIMILARITY_ADA_001, "text-similarity-ada-001", R50kBase, 2046),
    (TEXT_SEARCH_DAVINCI_DOC_001, "text-search-davinci-doc-001", R50kBase, 2046),
    (TEXT_SEARCH_CURIE_DOC_001, "text-search-curie-doc-001", R50kBase, 2046),
    (TEXT_SEARCH_BABBAGE_DOC_001, "text-search-babbage-doc-001", R50kBase, 2046),
    (TEXT_SEARCH_ADA_DOC_001, "text-search-ada-doc-001", R50kBase, 2046),
    (CODE_SEARCH_BABBAGE_CODE_001, "code-search-babbage-code-001", R50kBase, 2046),
    (CODE_SEARCH_ADA_CODE_001, "code-search-ada-code-001", R50kBase, 2046),
);

/// Prefix families for model names not in the table; checked in order.
const PREFIX_FALLBACKS: &[ModelType] = &[
    ModelType::GPT_4O,
    ModelType::GPT_4_32K,
    ModelType::GPT_4,
    ModelType::GPT_3_5_TURBO_16K,
    ModelType::GPT_3_5_TURBO,
];

impl ModelType {
    /// Build a model entry.
    pub const fn new(
        name: &'static str,
        encoding: EncodingType,
        max_context_length: usize,
    ) -> Self {
        Self {
            name,
            encoding,
            max_context_length,
        }
    }

    /// The model name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The encoding the model uses.
    pub fn encoding(&self) -> EncodingType {
        self.encoding
    }

    /// The maximum context length, in tokens.
    pub fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    /// Look up a model by exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        OA_MODEL_TYPES.iter().find(|m| m.name == name).copied()
    }

    /// Resolve a model name, falling back to known name prefixes.
    ///
    /// `"gpt-4o-2024-08-06"` resolves to [`ModelType::GPT_4O`];
    /// `"gpt-4-0613"` to [`ModelType::GPT_4`].
    pub fn resolve(name: &str) -> Option<Self> {
        Self::from_name(name).or_else(|| {
            PREFIX_FALLBACKS
                .iter()
                .find(|m| name.starts_with(m.name))
                .copied()
        })
    }
}
