// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;
mod report;

pub use orchestrator::{EnrichmentOutcome, EnrichmentPipeline};
pub use progress::{PipelineStats, ProgressTracker};
pub use report::EnrichmentReport;
