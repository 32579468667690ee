// file: src/pipeline/report.rs
// description: summary report over stored feature records
// reference: https://docs.rs/serde_json

use crate::error::Result;
use crate::models::FeatureRecord;
use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub total_companies: usize,
    pub importers: usize,
    pub average_activity_score: f64,
}

impl EnrichmentReport {
    pub fn from_records(records: &[FeatureRecord]) -> Self {
        let total_companies = records.len();
        let importers = records.iter().filter(|r| r.is_importer).count();
        let activity: u64 = records.iter().map(|r| r.activity_indicators as u64).sum();

        let average_activity_score = if total_companies == 0 {
            0.0
        } else {
            activity as f64 / total_companies as f64
        };

        Self {
            total_companies,
            importers,
            average_activity_score,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("total_companies: {}", self.total_companies),
            format!("importers: {}", self.importers),
            format!("average_activity_score: {:.2}", self.average_activity_score),
        ]
    }

    /// Four-space indented json, non-ASCII text written as is.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        Validator::ensure_parent_dir(path)?;

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;

        fs::write(path, buffer)?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(id: &str, importer: bool, activity: u32) -> FeatureRecord {
        let mut record = FeatureRecord::unprocessed(RecordId::from(id));
        record.processed = true;
        record.is_importer = importer;
        record.activity_indicators = activity;
        record
    }

    #[test]
    fn test_report_totals() {
        let records = vec![record("1", true, 3), record("2", false, 0), record("3", true, 6)];
        let report = EnrichmentReport::from_records(&records);

        assert_eq!(
            report,
            EnrichmentReport {
                total_companies: 3,
                importers: 2,
                average_activity_score: 3.0,
            }
        );
    }

    #[test]
    fn test_empty_report() {
        let report = EnrichmentReport::from_records(&[]);
        assert_eq!(report.total_companies, 0);
        assert_eq!(report.average_activity_score, 0.0);
    }

    #[test]
    fn test_write_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("processed/enrichment_report.json");
        let report = EnrichmentReport::from_records(&[record("1", true, 2)]);

        report.write_json(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("    \"importers\": 1"));
        let parsed: EnrichmentReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
    }
}
