pub mod config;
pub mod hash_embedder;
pub mod pretrained;
pub mod similarity;
pub mod tokenizer;

pub use config::EmbedderConfig;
pub use hash_embedder::HashEmbedder;
pub use pretrained::{ModelLoadError, PretrainedEmbedder};
pub use similarity::cosine_similarity;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Fixed-dimension vector for one skill string.
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub dimension: usize,
    pub source: EmbeddingSource,
    pub created_at: DateTime<Utc>,
}

impl Embedding {
    pub fn new(vector: Vec<f32>, source: EmbeddingSource) -> Self {
        Self {
            dimension: vector.len(),
            vector,
            source,
            created_at: Utc::now(),
        }
    }
}

/// Which input text an embedding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingSource {
    JobDescription,
    Resume,
}

/// Abstract interface over the embedding implementations.
///
/// - HashEmbedder: deterministic subword feature hashing, no weights
/// - PretrainedEmbedder: word2vec-format weights loaded from disk
///
/// Reports record `name()` and `version()` next to every score.
pub trait SkillEmbedder: std::fmt::Debug + Send + Sync {
    /// Implementation name ("hash", "pretrained").
    fn name(&self) -> &'static str;

    /// Version marker for the model generation.
    fn version(&self) -> &str;

    /// Embedding dimension.
    fn dimension(&self) -> usize;

    /// Embeds one skill string.
    fn embed(&self, text: &str, source: EmbeddingSource) -> Embedding;

    /// Embeds a batch of skills (default: loop).
    fn embed_all(&self, texts: &[String], source: EmbeddingSource) -> Vec<Embedding> {
        texts.iter().map(|t| self.embed(t, source)).collect()
    }

    /// Similarity of two embeddings on [0, 1].
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        if a.dimension != b.dimension {
            warn!(
                source_a = ?a.source,
                source_b = ?b.source,
                a_dimension = a.dimension,
                b_dimension = b.dimension,
                "embedding dimension mismatch; returning zero similarity"
            );
            return 0.0;
        }
        cosine_similarity(&a.vector, &b.vector)
    }
}

/// Builds an embedder by name. "pretrained" requires a weights path (config
/// or `SM_EMBEDDING_MODEL_PATH`) and surfaces the load failure; every other
/// name falls back to the hash embedder, which cannot fail.
pub fn create_embedder(
    name: &str,
    config: EmbedderConfig,
) -> Result<Box<dyn SkillEmbedder>, ModelLoadError> {
    match name {
        "pretrained" => {
            let path = config
                .model_path
                .clone()
                .or_else(|| std::env::var("SM_EMBEDDING_MODEL_PATH").ok().map(Into::into))
                .ok_or(ModelLoadError::MissingPath)?;
            Ok(Box::new(PretrainedEmbedder::load(&path)?))
        }
        "hash" => Ok(Box::new(HashEmbedder::new(config))),
        other => {
            warn!(embedder = other, "unknown embedder name; using hash");
            Ok(Box::new(HashEmbedder::new(config)))
        }
    }
}

/// Reads embedder settings from the environment.
pub fn load_config_from_env() -> EmbedderConfig {
    EmbedderConfig {
        dimension: std::env::var("SM_EMBEDDING_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| EmbedderConfig::default().dimension),
        model_path: std::env::var("SM_EMBEDDING_MODEL_PATH")
            .ok()
            .map(Into::into),
    }
}
