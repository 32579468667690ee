// file: src/models/feature_record.rs
// description: extracted feature record keyed by company identifier
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque company identifier. Integer keys (e.g. INN) are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub company_id: RecordId,
    pub is_importer: bool,
    pub product_mentions: BTreeSet<String>,
    pub mentioned_countries: BTreeSet<String>,
    pub activity_indicators: u32,
    pub processed: bool,
    pub has_financial_indicators: bool,
    pub recent_activity: bool,
}

impl FeatureRecord {
    /// Record for text that was missing, too short, or failed to tokenize.
    pub fn unprocessed(company_id: RecordId) -> Self {
        Self {
            company_id,
            is_importer: false,
            product_mentions: BTreeSet::new(),
            mentioned_countries: BTreeSet::new(),
            activity_indicators: 0,
            processed: false,
            has_financial_indicators: false,
            recent_activity: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.is_importer
            && self.product_mentions.is_empty()
            && self.mentioned_countries.is_empty()
            && self.activity_indicators == 0
            && !self.has_financial_indicators
            && !self.recent_activity
    }
}
