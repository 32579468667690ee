// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod nlp;
pub mod outreach;
pub mod pipeline;
pub mod storage;
pub mod utils;

pub use config::{
    Config, ExtractionConfig, InputConfig, OutreachConfig, PipelineConfig, SourceFormat,
    StorageConfig,
};
pub use error::{EnrichmentError, Result};
pub use extractor::FeatureExtractor;
pub use models::{
    Confidence, FeatureRecord, ImporterVerdict, OutreachDraft, RecordId, SentStatus,
    ValidationRecord,
};
pub use nlp::{Lexicon, ParsedDocument, SegmentingAnalyzer, TextAnalyzer};
pub use outreach::{DraftBatch, EmailComposer, compose_batch};
pub use pipeline::{
    EnrichmentOutcome, EnrichmentPipeline, EnrichmentReport, PipelineStats, ProgressTracker,
};
pub use storage::{FeatureStore, SourceRow, ValidationStore, read_source, write_drafts};
pub use utils::Validator;
