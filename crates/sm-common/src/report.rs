use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::matching::MatchResult;
use crate::run_id;

/// Response-size caps carried over from the original service limits.
const MAX_LISTED_SKILLS: usize = 50;
const MAX_TOP_MATCHES: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct TopMatch {
    pub jd_skill: String,
    pub resume_skill: String,
    pub similarity: f64,
}

/// Final per-run report. Serializes to the JSON shape consumers expect:
/// a 0-100 `overall_match_score`, capped skill lists and the ten best
/// pairings.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub overall_match_score: f64,
    pub coverage: f64,
    pub jd_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub top_matches: Vec<TopMatch>,
    pub reason: String,
    pub threshold: f64,
    pub embedder: String,
    pub embedder_version: String,
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capped(skills: &[String]) -> Vec<String> {
    skills.iter().take(MAX_LISTED_SKILLS).cloned().collect()
}

fn join_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.join(", ")
    }
}

impl MatchReport {
    pub fn build(
        jd_skills: &[String],
        resume_skills: &[String],
        result: &MatchResult,
    ) -> Self {
        let top_matches = result
            .pairs
            .iter()
            .take(MAX_TOP_MATCHES)
            .map(|pair| TopMatch {
                jd_skill: pair.jd_skill.clone(),
                resume_skill: pair.resume_skill.clone(),
                similarity: round2(pair.similarity),
            })
            .collect();

        Self {
            overall_match_score: round2(result.coverage * 100.0),
            coverage: result.coverage,
            jd_skills: capped(jd_skills),
            resume_skills: capped(resume_skills),
            matched_skills: capped(&result.matched),
            missing_skills: capped(&result.missing),
            top_matches,
            reason: result.reason.clone(),
            threshold: result.threshold,
            embedder: result.embedder.clone(),
            embedder_version: result.embedder_version.clone(),
            run_id: run_id::get().to_string(),
            generated_at: Utc::now(),
        }
    }

    /// Renders the human-readable report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("skill match report (run {})\n", self.run_id));
        out.push_str(&format!(
            "  embedder      : {}/{} (threshold {:.2})\n",
            self.embedder, self.embedder_version, self.threshold
        ));
        out.push_str(&format!(
            "  jd skills     : {}\n",
            join_or_none(&self.jd_skills)
        ));
        out.push_str(&format!(
            "  resume skills : {}\n",
            join_or_none(&self.resume_skills)
        ));
        out.push_str(&format!(
            "  matched ({})   : {}\n",
            self.matched_skills.len(),
            join_or_none(&self.matched_skills)
        ));
        out.push_str(&format!(
            "  missing ({})   : {}\n",
            self.missing_skills.len(),
            join_or_none(&self.missing_skills)
        ));
        out.push_str(&format!(
            "  coverage      : {:.2}%\n",
            self.overall_match_score
        ));
        out
    }
}
