// file: src/nlp/mod.rs
// description: text analysis module exports
// reference: internal module structure

pub mod document;
pub mod lexicon;
pub mod segmenter;

pub use document::{ParsedDocument, Sentence, TextAnalyzer, Token};
pub use lexicon::Lexicon;
pub use segmenter::SegmentingAnalyzer;
