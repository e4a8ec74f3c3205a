use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::skill_normalizer::{canonicalize_with, FuzzyConfig};

lazy_static! {
    // Word tokens keeping the symbols that carry meaning in skill names:
    // "c++", "c#", "node.js", ".net", "ci-cd".
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z0-9+#.][a-z0-9+#.\-]*").unwrap();
}

/// Noise words that never start or join a skill phrase. Small on purpose:
/// an overly aggressive list costs recall on multi-word aliases.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "for", "to", "in", "on", "with", "by", "at", "from",
    "as", "is", "are", "be", "being", "been", "that", "this", "it", "its", "you", "your", "we",
    "our", "us",
];

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Longest token window tested against the vocabulary. 3 covers every
    /// multi-word alias in the table ("amazon web services").
    pub max_window: usize,
    pub fuzzy: FuzzyConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_window: 3,
            fuzzy: FuzzyConfig::from_env(),
        }
    }
}

/// Scans free text for vocabulary skills.
///
/// Tokenizes the lowercased input, drops stopwords, then slides
/// 1..=`max_window` token windows through the canonical lookup chain
/// (exact alias, compact form, fuzzy). Single-character tokens stay in:
/// they can be stray fragments of a skill name ("pytho n") that the
/// compact lookup reassembles. Output is sorted and deduped. Empty or
/// unparseable text yields an empty vec, never an error.
pub fn extract_skills(text: &str, config: &ExtractorConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOPWORDS.contains(t))
        .collect();

    let mut found: HashSet<String> = HashSet::new();
    for width in 1..=config.max_window.max(1) {
        for window in tokens.windows(width) {
            let segment = window.join(" ");
            if let Some(canonical) = canonicalize_with(&segment, &config.fuzzy) {
                found.insert(canonical);
            }
        }
    }

    let mut skills: Vec<String> = found.into_iter().collect();
    skills.sort();
    skills
}
