use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use sm_common::embedding::{create_embedder, load_config_from_env};
use sm_common::extraction::{extract_skills, ExtractorConfig};
use sm_common::matching::{MatchEngine, MatchingConfig};
use sm_common::report::MatchReport;
use sm_common::{logging, run_id};
use tracing::info;

mod error;

use error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sm-match",
    about = "Compare a job description and a resume, report matched and missing skills"
)]
struct Cli {
    /// Path to the job description text file ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    jd: Option<PathBuf>,

    /// Job description supplied inline
    #[arg(long, value_name = "TEXT", conflicts_with = "jd")]
    jd_text: Option<String>,

    /// Path to the resume text file ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    resume: Option<PathBuf>,

    /// Resume supplied inline
    #[arg(long, value_name = "TEXT", conflicts_with = "resume")]
    resume_text: Option<String>,

    /// Minimum [0, 1] similarity for a JD skill to count as covered
    #[arg(long, env = "SM_SIMILARITY_THRESHOLD")]
    threshold: Option<f64>,

    /// Embedder implementation: hash | pretrained
    #[arg(long, env = "SM_EMBEDDER", default_value = "hash")]
    embedder: String,

    /// Path to word2vec-format weights (pretrained embedder only)
    #[arg(long, env = "SM_EMBEDDING_MODEL_PATH", value_name = "PATH")]
    model_path: Option<PathBuf>,

    /// Embedding dimension (hash embedder)
    #[arg(long, env = "SM_EMBEDDING_DIMENSION")]
    dimension: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,
}

fn read_stdin(label: &str) -> Result<String, CliError> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| CliError::Io {
            path: PathBuf::from(format!("<stdin:{label}>")),
            source,
        })?;
    Ok(text)
}

/// Resolves one input side: inline text wins, then a file path, with "-"
/// meaning stdin. Missing both is an error (both texts are required, even
/// if their content turns out to be empty).
fn load_input(
    path: Option<&PathBuf>,
    inline: Option<String>,
    label: &str,
    stdin_taken: &mut bool,
) -> Result<String, CliError> {
    if let Some(text) = inline {
        return Ok(text);
    }

    let Some(path) = path else {
        return Err(CliError::InvalidInput(format!(
            "either --{label} or --{label}-text is required"
        )));
    };

    if path.to_str() == Some("-") {
        if *stdin_taken {
            return Err(CliError::InvalidInput(
                "only one input may read from stdin".into(),
            ));
        }
        *stdin_taken = true;
        return read_stdin(label);
    }

    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })
}

fn run() -> Result<(), CliError> {
    dotenv().ok();
    logging::init_tracing_subscriber("sm-match");
    logging::install_tracing_panic_hook("sm-match");

    let cli = Cli::parse();

    if let Some(threshold) = cli.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CliError::InvalidInput(format!(
                "--threshold must be within [0, 1], got {threshold}"
            )));
        }
    }

    let mut stdin_taken = false;
    let jd_text = load_input(cli.jd.as_ref(), cli.jd_text.clone(), "jd", &mut stdin_taken)?;
    let resume_text = load_input(
        cli.resume.as_ref(),
        cli.resume_text.clone(),
        "resume",
        &mut stdin_taken,
    )?;

    let extractor = ExtractorConfig::default();
    let jd_skills = extract_skills(&jd_text, &extractor);
    let resume_skills = extract_skills(&resume_text, &extractor);
    info!(
        run_id = run_id::get(),
        jd_skills = jd_skills.len(),
        resume_skills = resume_skills.len(),
        "extracted skills"
    );

    let mut embedder_config = load_config_from_env();
    if let Some(dimension) = cli.dimension {
        embedder_config.dimension = dimension;
    }
    if let Some(model_path) = cli.model_path.clone() {
        embedder_config.model_path = Some(model_path);
    }
    let embedder = create_embedder(&cli.embedder, embedder_config)?;

    let mut matching_config = MatchingConfig::default();
    if let Some(threshold) = cli.threshold {
        matching_config.similarity_threshold = threshold;
    }

    let engine = MatchEngine::new(embedder, matching_config);
    let result = engine.match_skills(&jd_skills, &resume_skills);
    info!(
        coverage = result.coverage,
        matched = result.matched.len(),
        missing = result.missing.len(),
        "match complete"
    );

    let report = MatchReport::build(&jd_skills, &resume_skills, &result);
    match cli.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = %err, "sm-match failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
