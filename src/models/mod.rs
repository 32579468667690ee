// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod feature_record;
pub mod outreach;
pub mod validation;

pub use feature_record::{FeatureRecord, RecordId};
pub use outreach::{OutreachDraft, SentStatus};
pub use validation::{Confidence, ImporterVerdict, ValidationRecord};
