use std::collections::HashSet;

use crate::skill_normalizer::normalize_skill_set;

/// Exact-overlap partition of two normalized skill sets.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub overlap_ratio: f64,
    pub reason: String,
}

/// Partitions the JD skill set by exact membership in the resume set
/// (after canonical normalization on both sides). The embedding pass in
/// the pipeline only ever sees the `missing` remainder.
pub fn overlap_skills(jd_skills: &[String], resume_skills: &[String]) -> SkillOverlap {
    let jd_set = normalize_skill_set(jd_skills);
    if jd_set.is_empty() {
        return SkillOverlap {
            matched: vec![],
            missing: vec![],
            overlap_ratio: 0.0,
            reason: "no job description skills to match".into(),
        };
    }

    let resume_set = normalize_skill_set(resume_skills);
    let matched_set: HashSet<_> = jd_set.intersection(&resume_set).cloned().collect();
    let overlap_ratio = matched_set.len() as f64 / jd_set.len() as f64;

    let mut matched: Vec<_> = matched_set.into_iter().collect();
    matched.sort();
    let mut missing: Vec<_> = jd_set.difference(&resume_set).cloned().collect();
    missing.sort();

    let reason = format!(
        "{} of {} job skills present verbatim ({:.0}%) (matched: {} / missing: {})",
        matched.len(),
        jd_set.len(),
        overlap_ratio * 100.0,
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

    SkillOverlap {
        matched,
        missing,
        overlap_ratio,
        reason,
    }
}
