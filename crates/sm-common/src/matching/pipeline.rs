use std::cmp::Ordering;

use tracing::debug;

use crate::embedding::{
    create_embedder, load_config_from_env, EmbeddingSource, ModelLoadError, SkillEmbedder,
};
use crate::matching::skills::overlap_skills;
use crate::skill_normalizer::normalize_skills_vec;

const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

fn env_similarity_threshold() -> f64 {
    std::env::var("SM_SIMILARITY_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SIMILARITY_THRESHOLD)
}

#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Minimum [0, 1] similarity for a JD skill to count as covered.
    /// 0.75 here is a raw cosine of 0.5 after the similarity mapping.
    pub similarity_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: env_similarity_threshold(),
        }
    }
}

/// One JD skill paired with its best resume skill.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillPair {
    pub jd_skill: String,
    pub resume_skill: String,
    pub similarity: f64,
}

/// Outcome of one JD/resume comparison. `matched` and `missing` always
/// partition the normalized JD skill set.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub pairs: Vec<SkillPair>,
    pub coverage: f64,
    pub reason: String,
    pub embedder: String,
    pub embedder_version: String,
    pub threshold: f64,
}

pub struct MatchEngine {
    embedder: Box<dyn SkillEmbedder>,
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(embedder: Box<dyn SkillEmbedder>, config: MatchingConfig) -> Self {
        Self { embedder, config }
    }

    /// Engine wired entirely from the environment
    /// (`SM_EMBEDDER`, `SM_EMBEDDING_*`, `SM_SIMILARITY_THRESHOLD`).
    pub fn from_env() -> Result<Self, ModelLoadError> {
        let name = std::env::var("SM_EMBEDDER").unwrap_or_else(|_| "hash".into());
        let embedder = create_embedder(&name, load_config_from_env())?;
        Ok(Self::new(embedder, MatchingConfig::default()))
    }

    /// Partitions the JD skills into matched and missing.
    ///
    /// Both sides are canonical-normalized first. Exact set membership
    /// matches at similarity 1.0 without touching the embedder; every
    /// remaining JD skill is scored against all resume skills and the
    /// maximum decides. The argmax resume skill is recorded as the
    /// pairing, so one JD skill never counts twice however many resume
    /// skills resemble it.
    pub fn match_skills(&self, jd_skills: &[String], resume_skills: &[String]) -> MatchResult {
        let jd = normalize_skills_vec(jd_skills);
        let resume = normalize_skills_vec(resume_skills);

        if jd.is_empty() {
            return self.finish(vec![], vec![], vec![], 0.0, "no job description skills to match".into());
        }

        // Exact pass first: verbatim (post-normalization) overlap matches
        // at similarity 1.0 without touching the embedder.
        let overlap = overlap_skills(&jd, &resume);
        let mut matched = overlap.matched;
        let mut missing = Vec::new();
        let mut pairs: Vec<SkillPair> = matched
            .iter()
            .map(|skill| SkillPair {
                jd_skill: skill.clone(),
                resume_skill: skill.clone(),
                similarity: 1.0,
            })
            .collect();

        let resume_embeddings = self.embedder.embed_all(&resume, EmbeddingSource::Resume);

        for jd_skill in &overlap.missing {
            let jd_embedding = self.embedder.embed(jd_skill, EmbeddingSource::JobDescription);
            let mut best: Option<(usize, f64)> = None;
            for (idx, resume_embedding) in resume_embeddings.iter().enumerate() {
                let similarity = self.embedder.similarity(&jd_embedding, resume_embedding) as f64;
                match best {
                    None => best = Some((idx, similarity)),
                    Some((_, top)) if similarity > top => best = Some((idx, similarity)),
                    _ => {}
                }
            }

            match best {
                Some((idx, similarity)) if similarity >= self.config.similarity_threshold => {
                    debug!(
                        jd_skill = %jd_skill,
                        resume_skill = %resume[idx],
                        similarity,
                        "semantic match"
                    );
                    matched.push(jd_skill.clone());
                    pairs.push(SkillPair {
                        jd_skill: jd_skill.clone(),
                        resume_skill: resume[idx].clone(),
                        similarity,
                    });
                }
                _ => missing.push(jd_skill.clone()),
            }
        }

        matched.sort();
        missing.sort();
        pairs.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });

        let coverage = matched.len() as f64 / jd.len() as f64;
        let reason = format!(
            "matched {} of {} job description skills ({:.0}%) (matched: {} / missing: {})",
            matched.len(),
            jd.len(),
            coverage * 100.0,
            if matched.is_empty() {
                "none".to_string()
            } else {
                matched.join(", ")
            },
            if missing.is_empty() {
                "none".to_string()
            } else {
                missing.join(", ")
            }
        );

        self.finish(matched, missing, pairs, coverage, reason)
    }

    fn finish(
        &self,
        matched: Vec<String>,
        missing: Vec<String>,
        pairs: Vec<SkillPair>,
        coverage: f64,
        reason: String,
    ) -> MatchResult {
        MatchResult {
            matched,
            missing,
            pairs,
            coverage,
            reason,
            embedder: self.embedder.name().to_string(),
            embedder_version: self.embedder.version().to_string(),
            threshold: self.config.similarity_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbedderConfig, HashEmbedder};

    fn engine() -> MatchEngine {
        MatchEngine::new(
            Box::new(HashEmbedder::new(EmbedderConfig::default())),
            MatchingConfig {
                similarity_threshold: 0.75,
            },
        )
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partitions_jd_skills_by_coverage() {
        let result = engine().match_skills(
            &skills(&["python", "aws", "docker"]),
            &skills(&["python", "docker"]),
        );

        assert_eq!(result.matched, skills(&["docker", "python"]));
        assert_eq!(result.missing, skills(&["aws"]));
        assert!((result.coverage - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn matched_and_missing_partition_the_jd_set() {
        let jd = skills(&["python", "aws", "docker", "kubernetes"]);
        let result = engine().match_skills(&jd, &skills(&["docker"]));

        let mut union: Vec<String> = result
            .matched
            .iter()
            .chain(result.missing.iter())
            .cloned()
            .collect();
        union.sort();
        assert_eq!(union, skills(&["aws", "docker", "kubernetes", "python"]));
        assert!(result.matched.iter().all(|s| !result.missing.contains(s)));
        assert!(result.coverage >= 0.0 && result.coverage <= 1.0);
    }

    #[test]
    fn aliases_match_exactly_after_normalization() {
        let result = engine().match_skills(&skills(&["K8s", "React.js"]), &skills(&["kubernetes", "react"]));

        assert_eq!(result.matched, skills(&["kubernetes", "react"]));
        assert!(result.missing.is_empty());
        assert!((result.coverage - 1.0).abs() < f64::EPSILON);
        assert!(result.pairs.iter().all(|p| (p.similarity - 1.0).abs() < 1e-9));
    }

    #[test]
    fn empty_jd_set_scores_zero_coverage() {
        let result = engine().match_skills(&[], &skills(&["python"]));

        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.coverage, 0.0);
        assert!(result.reason.contains("no job description skills"));
    }

    #[test]
    fn empty_resume_leaves_all_jd_skills_missing() {
        let result = engine().match_skills(&skills(&["python", "aws"]), &[]);

        assert!(result.matched.is_empty());
        assert_eq!(result.missing, skills(&["aws", "python"]));
        assert_eq!(result.coverage, 0.0);
    }

    #[test]
    fn threshold_of_one_rejects_semantic_matches_only() {
        let strict = MatchEngine::new(
            Box::new(HashEmbedder::new(EmbedderConfig::default())),
            MatchingConfig {
                similarity_threshold: 1.0,
            },
        );
        let result = strict.match_skills(&skills(&["python", "cobol"]), &skills(&["python"]));

        // Exact membership still matches; nothing semantic can reach 1.0.
        assert_eq!(result.matched, skills(&["python"]));
        assert_eq!(result.missing, skills(&["cobol"]));
    }

    #[test]
    fn pairs_are_sorted_by_similarity() {
        let result = engine().match_skills(
            &skills(&["python", "docker"]),
            &skills(&["python", "docker"]),
        );

        assert!(result
            .pairs
            .windows(2)
            .all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn engine_from_env_defaults_to_hash() {
        if std::env::var("SM_EMBEDDER").is_ok() {
            return;
        }
        let engine = MatchEngine::from_env().expect("hash engine needs no weights");
        let result = engine.match_skills(&skills(&["python"]), &skills(&["python"]));
        assert_eq!(result.embedder, "hash");
    }

    #[test]
    fn metadata_records_the_embedder() {
        let result = engine().match_skills(&skills(&["python"]), &skills(&["python"]));
        assert_eq!(result.embedder, "hash");
        assert_eq!(result.embedder_version, "v1");
        assert!((result.threshold - 0.75).abs() < f64::EPSILON);
    }
}
