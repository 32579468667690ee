// file: src/extractor/mod.rs
// description: feature extraction module exports
// reference: internal module structure

pub mod features;
pub mod keywords;

pub use features::FeatureExtractor;
pub use keywords::{ImportKeyword, KeywordSets};
