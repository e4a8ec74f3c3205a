use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{tokenizer, Embedding, EmbedderConfig, EmbeddingSource, SkillEmbedder};

/// Fixed seed for deterministic hashing.
/// Changing these values changes every embedding; bump `version()` with them.
const HASH_SEED_K0: u64 = 0x9e37_79b9_7f4a_7c15;
const HASH_SEED_K1: u64 = 0x6a09_e667_f3bc_c908;

/// Deterministic subword feature-hashing embedder.
///
/// - no weights to load, so construction cannot fail
/// - O(n) in the token count
/// - SipHash13 with fixed keys keeps vectors stable across Rust versions
#[derive(Debug)]
pub struct HashEmbedder {
    config: EmbedderConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbedderConfig) -> Self {
        let mut cfg = config;
        cfg.dimension = cfg.dimension.max(1);
        Self { config: cfg }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }

    fn tokens_to_embedding(
        &self,
        tokens: Vec<tokenizer::WeightedToken>,
        source: EmbeddingSource,
    ) -> Embedding {
        let mut vector = vec![0.0f32; self.config.dimension];

        for wt in &tokens {
            let idx = self.hash_token(&wt.token);
            // Sign hashing keeps collision noise centered on zero.
            let sign = if self.hash_token(&format!("{}_sign", wt.token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign * wt.weight;
        }

        // L2 normalize
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding::new(vector, source)
    }
}

impl SkillEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        // Bump when the token layout or hash seeds change.
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str, source: EmbeddingSource) -> Embedding {
        self.tokens_to_embedding(tokenizer::tokenize_skill(text), source)
    }
}
