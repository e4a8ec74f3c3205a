//! Core library for sm-match: skill vocabulary, extraction, embeddings,
//! matching and report building.

pub mod embedding;
pub mod extraction;
pub mod logging;
pub mod matching;
pub mod report;
pub mod run_id;
pub mod skill_normalizer;
pub mod vocabulary;
