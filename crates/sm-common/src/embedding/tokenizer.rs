/// Weighted subword token feeding the hash embedder.
#[derive(Debug, Clone)]
pub struct WeightedToken {
    pub token: String,
    pub weight: f32,
}

impl WeightedToken {
    pub fn new(token: impl Into<String>, weight: f32) -> Self {
        Self {
            token: token.into(),
            weight,
        }
    }
}

const NGRAM_MIN: usize = 3;
const NGRAM_MAX: usize = 4;
const WORD_WEIGHT: f32 = 2.0;
const NGRAM_WEIGHT: f32 = 1.0;

/// Token layout per word of the skill string:
/// - word:<token>   the whole word, weight 2.0
/// - ng:<gram>      boundary-padded character 3/4-grams, weight 1.0
///
/// The n-grams give near-identical spellings overlapping features while
/// unrelated skills share almost none, so cosine scores separate cleanly.
pub fn tokenize_skill(skill: &str) -> Vec<WeightedToken> {
    let mut tokens = Vec::new();

    for word in skill.split_whitespace() {
        let word = word.to_lowercase();
        tokens.push(WeightedToken::new(format!("word:{word}"), WORD_WEIGHT));

        let padded: Vec<char> = format!("<{word}>").chars().collect();
        for n in NGRAM_MIN..=NGRAM_MAX {
            if padded.len() < n {
                continue;
            }
            for gram in padded.windows(n) {
                let gram: String = gram.iter().collect();
                tokens.push(WeightedToken::new(format!("ng:{gram}"), NGRAM_WEIGHT));
            }
        }
    }

    tokens
}
