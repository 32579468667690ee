// file: src/storage/mod.rs
// description: persistence module exports
// reference: internal module structure

pub mod feature_store;
pub mod list_codec;
pub mod source;
pub mod validation_store;

pub use feature_store::{FeatureStore, StoredEntry, text_fingerprint};
pub use list_codec::{join_list, parse_list};
pub use source::{SourceRow, SourceRows, read_source};
pub use validation_store::{ValidationStore, write_drafts};
