use std::collections::HashSet;

use strsim::damerau_levenshtein;
use unicode_normalization::UnicodeNormalization;

use crate::vocabulary::{compact_key, ALIAS_TO_CANONICAL, COMPACT_TO_CANONICAL};

/// Tolerance for the Damerau-Levenshtein fallback.
///
/// A candidate matches an alias when `1 - distance / max_len >= tolerance`.
/// Tokens, aliases and canonicals shorter than `min_len` are never
/// fuzzy-matched; short names like "java" or "rust" only match via the
/// exact and compact lookups, which keeps near-misses ("javaa", "rustt")
/// from resolving to a vocabulary skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyConfig {
    pub min_len: usize,
    pub tolerance: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            min_len: 5,
            tolerance: 0.8,
        }
    }
}

impl FuzzyConfig {
    /// Reads `SM_FUZZY_MIN_LEN` / `SM_FUZZY_TOLERANCE`, falling back to the
    /// defaults on absent or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_len: std::env::var("SM_FUZZY_MIN_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_len),
            tolerance: std::env::var("SM_FUZZY_TOLERANCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.tolerance),
        }
    }
}

fn nfkc_lower_trim(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

/// Resolves a token to its canonical vocabulary skill, or `None` when the
/// token is not in the vocabulary. Lookup chain: exact alias, compact
/// (separator-stripped) alias, Damerau-Levenshtein against compact aliases.
pub fn canonicalize(token: &str) -> Option<String> {
    canonicalize_with(token, &FuzzyConfig::from_env())
}

pub fn canonicalize_with(token: &str, fuzzy: &FuzzyConfig) -> Option<String> {
    let normalized = nfkc_lower_trim(token);
    if normalized.is_empty() {
        return None;
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(normalized.as_str()) {
        return Some((*canonical).to_string());
    }

    let compact = compact_key(&normalized);
    if let Some(canonical) = COMPACT_TO_CANONICAL.get(&compact) {
        return Some((*canonical).to_string());
    }

    fuzzy_match_canonical(&compact, fuzzy)
}

fn fuzzy_match_canonical(compact: &str, fuzzy: &FuzzyConfig) -> Option<String> {
    if compact.len() < fuzzy.min_len {
        return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for (alias, canonical) in COMPACT_TO_CANONICAL.iter() {
        if alias.len() < fuzzy.min_len || canonical.len() < fuzzy.min_len {
            continue;
        }

        let distance = damerau_levenshtein(compact, alias);
        if distance == 0 {
            return Some((*canonical).to_string());
        }

        let len = compact.len().max(alias.len());
        let ratio = 1.0 - distance as f64 / len as f64;
        if ratio < fuzzy.tolerance {
            continue;
        }

        match best {
            None => best = Some((*canonical, ratio)),
            Some((_, best_ratio)) if ratio > best_ratio => best = Some((*canonical, ratio)),
            _ => {}
        }
    }

    best.map(|(canonical, _)| canonical.to_string())
}

fn split_segments(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| matches!(c, ' ' | '/' | ',' | ';' | '|' | '&' | '+'))
        .map(nfkc_lower_trim)
        .filter(|s| !s.is_empty())
}

/// Converts a skill string to its canonical form. Unknown skills pass
/// through NFKC-lowercased so downstream set operations stay consistent.
pub fn normalize_skill(skill: &str) -> String {
    let fuzzy = FuzzyConfig::from_env();
    let normalized = nfkc_lower_trim(skill);
    if let Some(canonical) = canonicalize_with(&normalized, &fuzzy) {
        return canonical;
    }

    for segment in split_segments(skill) {
        if let Some(canonical) = canonicalize_with(&segment, &fuzzy) {
            return canonical;
        }
    }

    normalized
}

/// Normalizes a skill slice into a set, dropping blanks.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_skill(s))
        .collect()
}

/// Normalizes a skill slice into a sorted, deduped vec (report order).
pub fn normalize_skills_vec(skills: &[String]) -> Vec<String> {
    let mut result: Vec<String> = skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| s.len() >= 2)
        .collect();
    result.sort();
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_and_case_are_equivalent() {
        assert_eq!(normalize_skill("JavaScript"), "javascript");
        assert_eq!(normalize_skill("js"), "javascript");
        assert_eq!(normalize_skill("K8s"), "kubernetes");
        assert_eq!(normalize_skill("C#"), "csharp");
    }

    #[test]
    fn separators_and_fullwidth_forms_normalize() {
        assert_eq!(normalize_skill("Ｐｙｔｈｏｎ"), "python");
        assert_eq!(normalize_skill("React JS"), "react");
        assert_eq!(normalize_skill("Python/Django"), "python");
        assert_eq!(normalize_skill("node-js"), "nodejs");
    }

    #[test]
    fn small_typos_resolve_for_long_aliases() {
        assert_eq!(normalize_skill("javascirpt"), "javascript");
        assert_eq!(normalize_skill("pytroch"), "pytorch");
        assert_eq!(normalize_skill("kuberntes"), "kubernetes");
    }

    #[test]
    fn split_tokens_still_reach_the_compact_form() {
        // The spacing typo collapses to an exact compact key.
        assert_eq!(normalize_skill("Pytho n"), "python");
    }

    #[test]
    fn short_tokens_are_never_fuzzed() {
        assert_eq!(normalize_skill("javaa"), "javaa");
        assert_eq!(normalize_skill("rustt"), "rustt");
        assert_eq!(normalize_skill("ab"), "ab");
    }

    #[test]
    fn unknown_skills_pass_through_lowercased() {
        assert_eq!(normalize_skill("MyInternalFramework"), "myinternalframework");
        assert_eq!(canonicalize("myinternalframework"), None);
    }

    #[test]
    fn tight_tolerance_disables_fuzzy_matching() {
        let strict = FuzzyConfig {
            min_len: 5,
            tolerance: 1.0,
        };
        assert_eq!(canonicalize_with("javascirpt", &strict), None);
        // Exact lookups are unaffected by the tolerance.
        assert_eq!(
            canonicalize_with("javascript", &strict).as_deref(),
            Some("javascript")
        );
    }

    #[test]
    fn normalization_is_bidirectional_across_sets() {
        let jd = vec!["React.js".to_string(), "K8s".to_string()];
        let resume = vec!["react".to_string(), "kubernetes".to_string()];
        assert_eq!(normalize_skill_set(&jd), normalize_skill_set(&resume));
    }

    #[test]
    fn vec_form_dedupes_and_sorts() {
        let normalized = normalize_skills_vec(&[
            "Python".to_string(),
            "python".to_string(),
            "  JS ".to_string(),
            "javascript".to_string(),
        ]);
        assert_eq!(normalized, vec!["javascript".to_string(), "python".to_string()]);
    }
}
