// file: src/models/outreach.rs
// description: drafted outreach message ready for export
// reference: internal data structures

use crate::models::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachDraft {
    pub company_id: RecordId,
    pub company_name: String,
    pub subject: String,
    pub body: String,
    pub personalization_score: u8,
    pub generated_at: DateTime<Utc>,
    pub sent_status: SentStatus,
}
