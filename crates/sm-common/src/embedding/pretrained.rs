use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{Embedding, EmbeddingSource, SkillEmbedder};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read embedding weights at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed weights header {header:?}: expected \"<vocab> <dimension>\"")]
    Header { header: String },
    #[error("malformed weights row at line {line}: {reason}")]
    Row { line: usize, reason: String },
    #[error("weights declare dimension {declared} but line {line} carries {actual} values")]
    DimensionMismatch {
        declared: usize,
        line: usize,
        actual: usize,
    },
    #[error("weights file contains no vectors")]
    Empty,
    #[error("no embedding model path configured; set SM_EMBEDDING_MODEL_PATH or pass --model-path")]
    MissingPath,
}

/// Pretrained word-vector embedder.
///
/// Loads word2vec text-format weights once at construction: a
/// `<vocab> <dimension>` header followed by `token v1 .. vdim` rows. A
/// skill embeds as the L2-normalized mean of its known word vectors;
/// fully out-of-vocabulary skills embed to the zero vector, which scores
/// 0.0 against everything.
#[derive(Debug)]
pub struct PretrainedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
    version: String,
}

impl PretrainedEmbedder {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let file = File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => {
                return Err(ModelLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
            None => return Err(ModelLoadError::Empty),
        };

        let parsed_dimension = {
            let mut parts = header.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(_vocab), Some(dim), None) => dim.parse::<usize>().ok(),
                _ => None,
            }
        };
        let dimension = match parsed_dimension {
            Some(dim) if dim > 0 => dim,
            _ => return Err(ModelLoadError::Header { header }),
        };

        let mut vectors = HashMap::new();
        for (idx, line) in lines.enumerate() {
            let line_no = idx + 2;
            let line = line.map_err(|source| ModelLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let token = fields
                .next()
                .ok_or_else(|| ModelLoadError::Row {
                    line: line_no,
                    reason: "missing token".into(),
                })?
                .to_lowercase();

            let values: Vec<f32> = fields
                .map(|raw| {
                    raw.parse::<f32>().map_err(|_| ModelLoadError::Row {
                        line: line_no,
                        reason: format!("non-numeric value {raw:?}"),
                    })
                })
                .collect::<Result<_, _>>()?;

            if values.len() != dimension {
                return Err(ModelLoadError::DimensionMismatch {
                    declared: dimension,
                    line: line_no,
                    actual: values.len(),
                });
            }

            vectors.insert(token, values);
        }

        if vectors.is_empty() {
            return Err(ModelLoadError::Empty);
        }

        let version = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".into());

        tracing::info!(
            vocab = vectors.len(),
            dimension,
            model = %version,
            "loaded pretrained embedding weights"
        );

        Ok(Self {
            vectors,
            dimension,
            version,
        })
    }
}

impl SkillEmbedder for PretrainedEmbedder {
    fn name(&self) -> &'static str {
        "pretrained"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str, source: EmbeddingSource) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];
        let mut hits = 0usize;

        for word in text.split_whitespace() {
            if let Some(values) = self.vectors.get(&word.to_lowercase()) {
                for (acc, v) in vector.iter_mut().zip(values.iter()) {
                    *acc += v;
                }
                hits += 1;
            }
        }

        if hits > 0 {
            let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for v in &mut vector {
                    *v /= norm;
                }
            }
        }

        Embedding::new(vector, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_model(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp model file");
        file.write_all(content.as_bytes()).expect("write model");
        file
    }

    #[test]
    fn loads_word2vec_text_format() {
        let model = write_model("3 2\npython 1.0 0.0\ndocker 0.0 1.0\naws 0.7 0.7\n");
        let embedder = PretrainedEmbedder::load(model.path()).expect("model loads");

        assert_eq!(embedder.dimension(), 2);
        assert_eq!(embedder.name(), "pretrained");

        let emb = embedder.embed("python", EmbeddingSource::Resume);
        assert!((emb.vector[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn multiword_skills_average_and_normalize() {
        let model = write_model("2 2\nmachine 1.0 0.0\nlearning 0.0 1.0\n");
        let embedder = PretrainedEmbedder::load(model.path()).expect("model loads");

        let emb = embedder.embed("machine learning", EmbeddingSource::JobDescription);
        let norm: f32 = emb.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert!((emb.vector[0] - emb.vector[1]).abs() < 1e-6);
    }

    #[test]
    fn out_of_vocabulary_skill_embeds_to_zero() {
        let model = write_model("1 2\npython 1.0 0.0\n");
        let embedder = PretrainedEmbedder::load(model.path()).expect("model loads");

        let emb = embedder.embed("cobol", EmbeddingSource::Resume);
        assert!(emb.vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = PretrainedEmbedder::load(Path::new("/nonexistent/weights.vec"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ModelLoadError::Io { .. }));
    }

    #[test]
    fn garbled_header_is_rejected() {
        let model = write_model("not a header\npython 1.0 0.0\n");
        let err = PretrainedEmbedder::load(model.path()).expect_err("bad header must fail");
        assert!(matches!(err, ModelLoadError::Header { .. }));
    }

    #[test]
    fn short_row_is_rejected() {
        let model = write_model("1 3\npython 1.0 0.0\n");
        let err = PretrainedEmbedder::load(model.path()).expect_err("short row must fail");
        assert!(matches!(err, ModelLoadError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_body_is_rejected() {
        let model = write_model("0 2\n");
        let err = PretrainedEmbedder::load(model.path()).expect_err("empty body must fail");
        assert!(matches!(err, ModelLoadError::Empty));
    }
}
