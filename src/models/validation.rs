// file: src/models/validation.rs
// description: human review record confirming extracted features
// reference: internal data structures

use crate::error::{EnrichmentError, Result};
use crate::models::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImporterVerdict {
    #[serde(rename = "Да")]
    Yes,
    #[serde(rename = "Нет")]
    No,
    #[serde(rename = "Неизвестно")]
    Unknown,
}

impl ImporterVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImporterVerdict::Yes => "Да",
            ImporterVerdict::No => "Нет",
            ImporterVerdict::Unknown => "Неизвестно",
        }
    }
}

impl FromStr for ImporterVerdict {
    type Err = EnrichmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "да" => Ok(ImporterVerdict::Yes),
            "no" | "n" | "нет" => Ok(ImporterVerdict::No),
            "unknown" | "?" | "неизвестно" => Ok(ImporterVerdict::Unknown),
            other => Err(EnrichmentError::Validation(format!(
                "unknown importer verdict: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "Низкая")]
    Low,
    #[serde(rename = "Средняя")]
    Medium,
    #[serde(rename = "Высокая")]
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Низкая",
            Confidence::Medium => "Средняя",
            Confidence::High => "Высокая",
        }
    }
}

impl FromStr for Confidence {
    type Err = EnrichmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "низкая" => Ok(Confidence::Low),
            "medium" | "средняя" => Ok(Confidence::Medium),
            "high" | "высокая" => Ok(Confidence::High),
            other => Err(EnrichmentError::Validation(format!(
                "unknown confidence level: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub company_id: RecordId,
    pub validator_name: String,
    pub is_active_importer: ImporterVerdict,
    pub confidence: Confidence,
    #[serde(default)]
    pub comment: String,
    pub validated_at: DateTime<Utc>,
}

impl ValidationRecord {
    pub fn new(
        company_id: RecordId,
        validator_name: String,
        is_active_importer: ImporterVerdict,
        confidence: Confidence,
        comment: String,
    ) -> Self {
        Self {
            company_id,
            validator_name,
            is_active_importer,
            confidence,
            comment,
            validated_at: Utc::now(),
        }
    }

    pub fn confirms_importer(&self) -> bool {
        self.is_active_importer == ImporterVerdict::Yes
    }
}
