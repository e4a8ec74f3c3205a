use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Embedding dimension for the hash embedder (powers of two work best).
    /// The pretrained embedder takes its dimension from the weights file.
    pub dimension: usize,
    /// Path to word2vec-format weights, required by the pretrained embedder.
    pub model_path: Option<PathBuf>,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            dimension: 256,
            model_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimension_is_reasonable() {
        let config = EmbedderConfig::default();
        assert_eq!(config.dimension, 256);
        assert!(config.model_path.is_none());
    }
}
