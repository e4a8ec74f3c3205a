use sm_common::embedding::{EmbedderConfig, HashEmbedder};
use sm_common::extraction::{extract_skills, ExtractorConfig};
use sm_common::matching::{MatchEngine, MatchingConfig};
use sm_common::report::MatchReport;

fn engine() -> MatchEngine {
    MatchEngine::new(
        Box::new(HashEmbedder::new(EmbedderConfig::default())),
        MatchingConfig {
            similarity_threshold: 0.75,
        },
    )
}

#[test]
fn jd_and_resume_texts_produce_the_expected_report() {
    let jd_text = "We are hiring a backend engineer. Must know Python, AWS, Docker.";
    let resume_text = "Python developer with Docker experience shipping services.";

    let extractor = ExtractorConfig::default();
    let jd_skills = extract_skills(jd_text, &extractor);
    let resume_skills = extract_skills(resume_text, &extractor);

    assert_eq!(jd_skills, vec!["aws", "docker", "python"]);
    assert_eq!(resume_skills, vec!["docker", "python"]);

    let result = engine().match_skills(&jd_skills, &resume_skills);
    assert_eq!(result.matched, vec!["docker", "python"]);
    assert_eq!(result.missing, vec!["aws"]);
    assert!((result.coverage - 2.0 / 3.0).abs() < 1e-9);

    let report = MatchReport::build(&jd_skills, &resume_skills, &result);
    assert!((report.overall_match_score - 66.67).abs() < 1e-9);

    let text = report.render_text();
    assert!(text.contains("docker, python"));
    assert!(text.contains("aws"));
    assert!(text.contains("66.67%"));
}

#[test]
fn matched_and_missing_always_partition_the_jd_skills() {
    let jd_text = "Kubernetes, Terraform, PostgreSQL and Kafka in production.";
    let resume_text = "Ran postgres clusters and k8s deployments.";

    let extractor = ExtractorConfig::default();
    let jd_skills = extract_skills(jd_text, &extractor);
    let resume_skills = extract_skills(resume_text, &extractor);

    let result = engine().match_skills(&jd_skills, &resume_skills);

    let mut union: Vec<String> = result
        .matched
        .iter()
        .chain(result.missing.iter())
        .cloned()
        .collect();
    union.sort();
    assert_eq!(union, jd_skills);
    assert!(result.matched.iter().all(|s| !result.missing.contains(s)));
    assert!(result.coverage >= 0.0 && result.coverage <= 1.0);

    // Alias normalization on the resume side covers k8s and postgres.
    assert!(result.matched.contains(&"kubernetes".to_string()));
    assert!(result.matched.contains(&"postgresql".to_string()));
}

#[test]
fn misspelled_resume_skill_still_counts() {
    let extractor = ExtractorConfig::default();
    let jd_skills = extract_skills("Python is required.", &extractor);
    let resume_skills = extract_skills("Years of Pytho n scripting.", &extractor);

    let result = engine().match_skills(&jd_skills, &resume_skills);
    assert_eq!(result.matched, vec!["python"]);
    assert!(result.missing.is_empty());
}

#[test]
fn empty_inputs_yield_an_empty_zero_coverage_report() {
    let extractor = ExtractorConfig::default();
    let jd_skills = extract_skills("", &extractor);
    let resume_skills = extract_skills("", &extractor);

    let result = engine().match_skills(&jd_skills, &resume_skills);
    let report = MatchReport::build(&jd_skills, &resume_skills, &result);

    assert!(report.matched_skills.is_empty());
    assert!(report.missing_skills.is_empty());
    assert_eq!(report.overall_match_score, 0.0);
}
