// file: src/outreach/mod.rs
// description: outreach module exports
// reference: draft composition

mod batch;
mod composer;

pub use batch::{DraftBatch, compose_batch};
pub use composer::EmailComposer;
